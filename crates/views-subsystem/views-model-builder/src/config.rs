// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use views_env::Environment;

use crate::error::ViewDerivationError;

/// How to handle two displays deriving the same field name on the same parent (or the same type
/// name).
pub const NAME_COLLISION_ENV: &str = "VIEWS_NAME_COLLISION";
/// Row type for entity rows whose base entity type has no GraphQL interface. Empty or `none`
/// excludes such displays.
pub const ENTITY_FALLBACK_TYPE_ENV: &str = "VIEWS_ENTITY_FALLBACK_TYPE";

pub const DEFAULT_ENTITY_FALLBACK_TYPE: &str = "Entity";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Rename the later field to `<name><View><Display>` (or the later type likewise)
    #[default]
    Qualify,
    /// Fail the build
    Fail,
}

const COLLISION_POLICIES: [(&str, CollisionPolicy); 2] = [
    ("qualify", CollisionPolicy::Qualify),
    ("fail", CollisionPolicy::Fail),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationConfig {
    pub collision_policy: CollisionPolicy,
    pub entity_fallback_type: Option<String>,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            collision_policy: CollisionPolicy::default(),
            entity_fallback_type: Some(DEFAULT_ENTITY_FALLBACK_TYPE.to_string()),
        }
    }
}

impl DerivationConfig {
    pub fn from_env(env: &impl Environment) -> Result<Self, ViewDerivationError> {
        let collision_policy =
            env.get_choice(NAME_COLLISION_ENV, &COLLISION_POLICIES, CollisionPolicy::default())?;

        let entity_fallback_type = match env.get(ENTITY_FALLBACK_TYPE_ENV) {
            Some(value) => {
                let value = value.trim();
                if value.is_empty() || value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            None => Some(DEFAULT_ENTITY_FALLBACK_TYPE.to_string()),
        };

        Ok(Self {
            collision_policy,
            entity_fallback_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use views_env::MapEnvironment;

    #[test]
    fn defaults_without_env() {
        let config = DerivationConfig::from_env(&MapEnvironment::default()).unwrap();
        assert_eq!(config, DerivationConfig::default());
        assert_eq!(config.entity_fallback_type.as_deref(), Some("Entity"));
    }

    #[test]
    fn reads_env() {
        let env = MapEnvironment::from([
            (NAME_COLLISION_ENV, "FAIL"),
            (ENTITY_FALLBACK_TYPE_ENV, "none"),
        ]);
        let config = DerivationConfig::from_env(&env).unwrap();

        assert_eq!(config.collision_policy, CollisionPolicy::Fail);
        assert_eq!(config.entity_fallback_type, None);
    }

    #[test]
    fn rejects_unknown_policy() {
        let env = MapEnvironment::from([(NAME_COLLISION_ENV, "ignore")]);
        assert!(matches!(
            DerivationConfig::from_env(&env),
            Err(ViewDerivationError::Env(_))
        ));
    }
}
