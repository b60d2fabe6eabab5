// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Configuration source for the views subsystem.
//!
//! Schema derivation options (collision handling, entity fallback type, log filter) are read
//! through [`Environment`] so that hosts can supply them from the process environment or
//! from an explicit map (tests, embedding).

use std::collections::HashMap;
use std::sync::Arc;

pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn get_or_else(&self, key: &str, default_value: &str) -> String {
        self.get(key).unwrap_or_else(|| default_value.to_string())
    }

    fn enabled(&self, key: &str, default_value: bool) -> Result<bool, EnvError> {
        match self.get(key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(EnvError::InvalidBoolean {
                    key: key.to_string(),
                    value,
                }),
            },
            None => Ok(default_value),
        }
    }

    /// Look up `key` and map it (case-insensitively) onto one of `choices`.
    fn get_choice<T: Copy>(
        &self,
        key: &'static str,
        choices: &[(&str, T)],
        default_value: T,
    ) -> Result<T, EnvError>
    where
        Self: Sized,
    {
        match self.get(key) {
            Some(value) => {
                let normalized = value.trim().to_lowercase();
                choices
                    .iter()
                    .find(|(name, _)| *name == normalized)
                    .map(|(_, choice)| *choice)
                    .ok_or_else(|| EnvError::InvalidEnum {
                        env_key: key,
                        env_value: value,
                        message: format!(
                            "expected one of {}",
                            choices
                                .iter()
                                .map(|(name, _)| *name)
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                    })
            }
            None => Ok(default_value),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("Invalid value for {key}: {value}. Expected true, 1, yes, on OR false, 0, no, off")]
    InvalidBoolean { key: String, value: String },

    #[error("Invalid env value {env_value} for {env_key}: {message}")]
    InvalidEnum {
        env_key: &'static str,
        env_value: String,
        message: String,
    },
}

pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// An environment backed by explicit values, optionally deferring to another environment for
/// keys it does not hold.
#[derive(Clone, Default)]
pub struct MapEnvironment {
    values: HashMap<String, String>,
    fallback: Option<Arc<dyn Environment>>,
}

impl MapEnvironment {
    pub fn new_with_fallback(fallback: Arc<dyn Environment>) -> Self {
        Self {
            values: HashMap::new(),
            fallback: Some(fallback),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl Environment for MapEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| self.fallback.as_ref().and_then(|fb| fb.get(key)))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MapEnvironment {
    fn from(values: [(&str, &str); N]) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            fallback: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Mode {
        Strict,
        Lenient,
    }

    const MODES: [(&str, Mode); 2] = [("strict", Mode::Strict), ("lenient", Mode::Lenient)];

    #[test]
    fn choice_is_case_insensitive() {
        let env = MapEnvironment::from([("MODE", "Strict")]);
        assert_eq!(env.get_choice("MODE", &MODES, Mode::Lenient).unwrap(), Mode::Strict);
    }

    #[test]
    fn missing_choice_uses_default() {
        let env = MapEnvironment::default();
        assert_eq!(env.get_choice("MODE", &MODES, Mode::Lenient).unwrap(), Mode::Lenient);
    }

    #[test]
    fn unknown_choice_is_rejected() {
        let env = MapEnvironment::from([("MODE", "sloppy")]);
        let err = env.get_choice("MODE", &MODES, Mode::Lenient).unwrap_err();
        assert!(err.to_string().contains("strict, lenient"));
    }

    #[test]
    fn fallback_is_consulted() {
        let base = Arc::new(MapEnvironment::from([("A", "1"), ("B", "2")]));
        let mut env = MapEnvironment::new_with_fallback(base);
        env.set("A", "override");

        assert_eq!(env.get("A").as_deref(), Some("override"));
        assert_eq!(env.get("B").as_deref(), Some("2"));
        assert!(env.enabled("B", false).is_err());
    }
}
