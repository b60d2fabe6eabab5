// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! # Tracing configuration setup.
//!
//! Schema derivation and view resolution are instrumented with Rust's `tracing` framework.
//!
//! Calling [`init`] installs a global subscriber whose filter comes from the `VIEWS_LOG`
//! variable of the supplied [`Environment`]. The variable follows the same conventions as
//! `RUST_LOG`, for example `VIEWS_LOG=views_model_builder=debug` to see which view displays
//! were excluded from the schema and why.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};
use views_env::Environment;

pub const VIEWS_LOG: &str = "VIEWS_LOG";

/// Initialize the tracing subscriber with a compact console layer.
///
/// Without a `VIEWS_LOG` value only warnings and errors are reported.
pub fn init(env: &dyn Environment) -> Result<(), LoggingError> {
    let fmt_layer = tracing_subscriber::fmt::layer().compact();

    tracing_subscriber::registry()
        .with(env_filter(env))
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn env_filter(env: &dyn Environment) -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into());

    match env.get(VIEWS_LOG) {
        Some(directives) => builder.parse_lossy(directives),
        None => builder.parse_lossy(""),
    }
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Unable to install the tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use views_env::MapEnvironment;

    #[test]
    fn default_filter_is_warn() {
        let filter = env_filter(&MapEnvironment::default());
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn filter_follows_views_log() {
        let env = MapEnvironment::from([(VIEWS_LOG, "debug")]);
        assert_eq!(env_filter(&env).max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
