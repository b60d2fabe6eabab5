// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;
use views_env::EnvError;
use views_model::derived::ViewDisplayKey;

#[derive(Error, Debug)]
pub enum ViewDerivationError {
    #[error("Invalid configuration for {key}: {message}")]
    Configuration {
        key: ViewDisplayKey,
        message: String,
    },

    #[error("{key} refers to unknown entity type '{entity_type}'")]
    UnknownEntityType {
        key: ViewDisplayKey,
        entity_type: String,
    },

    #[error("Field '{name}' on '{parent}' is derived by both '{first}' and '{second}'")]
    NameCollision {
        parent: String,
        name: String,
        first: String,
        second: String,
    },

    #[error("Type '{name}' is derived by both {first} and {second}")]
    TypeNameCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error("{0}")]
    Env(#[from] EnvError),
}

impl ViewDerivationError {
    pub fn configuration(key: &ViewDisplayKey, message: impl Into<String>) -> Self {
        ViewDerivationError::Configuration {
            key: key.clone(),
            message: message.into(),
        }
    }

    /// Errors confined to a single display. Those exclude the display instead of failing the
    /// build.
    pub fn is_isolated(&self) -> bool {
        matches!(
            self,
            ViewDerivationError::Configuration { .. } | ViewDerivationError::UnknownEntityType { .. }
        )
    }
}
