// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Name collisions between displays.
//!
//! Derived ids never collide, but GraphQL names can: two displays with the same query name both
//! derive a `Root` field (and a result type) with that name.
//!
//! Type names are claimed while displays are resolved, so every reference to a type uses its
//! final name. Field names are checked once all fields are derived, per parent.

use std::collections::HashMap;

use core_model::mapped_arena::MappedArena;
use tracing::warn;
use views_model::{
    derived::{DerivedField, ViewDisplayKey},
    types::{FILTER_VALUE_SCALAR, SORT_DIRECTION_ENUM, VIEW_RESULT_UNION, VIEW_UNION},
};

use crate::{
    config::CollisionPolicy,
    error::ViewDerivationError,
    naming::DisplayNames,
};

const SHARED_TYPES_OWNER: &str = "shared view types";

pub struct TypeNameClaims {
    policy: CollisionPolicy,
    /// Type name to a description of its owner
    claimed: HashMap<String, String>,
}

impl TypeNameClaims {
    pub fn new(policy: CollisionPolicy) -> Self {
        let claimed = [
            SORT_DIRECTION_ENUM,
            FILTER_VALUE_SCALAR,
            VIEW_UNION,
            VIEW_RESULT_UNION,
        ]
        .into_iter()
        .map(|name| (name.to_string(), SHARED_TYPES_OWNER.to_string()))
        .collect();

        Self { policy, claimed }
    }

    /// Claim `name` for the display, qualifying it if another display holds it already.
    pub fn claim(
        &mut self,
        name: String,
        key: &ViewDisplayKey,
        names: &DisplayNames,
    ) -> Result<String, ViewDerivationError> {
        let owner = key.to_string();

        let name = match self.claimed.get(&name) {
            None => name,
            Some(existing) if existing == &owner => return Ok(name),
            Some(existing) => match self.policy {
                CollisionPolicy::Fail => {
                    return Err(ViewDerivationError::TypeNameCollision {
                        name,
                        first: existing.clone(),
                        second: owner,
                    });
                }
                CollisionPolicy::Qualify => {
                    let qualified = names.qualified_type_name(&name);
                    warn!("Type '{name}' of {owner} is already derived by {existing}; using '{qualified}'");

                    if let Some(existing) = self.claimed.get(&qualified) {
                        return Err(ViewDerivationError::TypeNameCollision {
                            name: qualified,
                            first: existing.clone(),
                            second: owner,
                        });
                    }
                    qualified
                }
            },
        };

        self.claimed.insert(name.clone(), owner);
        Ok(name)
    }
}

/// Ensure field names are unique within each parent.
///
/// Fields are checked in order. Under [`CollisionPolicy::Qualify`] a field colliding with an
/// earlier field is renamed to `<name><View><Display>`; under [`CollisionPolicy::Fail`] the first
/// collision is an error.
pub fn resolve_field_collisions(
    fields: &mut MappedArena<DerivedField>,
    policy: CollisionPolicy,
) -> Result<(), ViewDerivationError> {
    let ids: Vec<String> = fields.keys().map(str::to_string).collect();
    // (parent, name) to the id of the field holding it
    let mut taken: HashMap<(String, String), String> = HashMap::new();

    for id in ids {
        let Some(field) = fields.get_by_key_mut(&id) else {
            continue;
        };

        if let Some((parent, first)) = find_collision(&taken, field) {
            if policy == CollisionPolicy::Fail {
                return Err(ViewDerivationError::NameCollision {
                    parent,
                    name: field.name.clone(),
                    first,
                    second: field.id.clone(),
                });
            }

            let qualified = DisplayNames::new(&field.key, None).qualified_field_name(&field.name);
            warn!(
                "Field '{}' on '{parent}' is already derived by '{first}'; renaming '{}' to '{qualified}'",
                field.name, field.id
            );
            field.name = qualified;

            if let Some((parent, first)) = find_collision(&taken, field) {
                return Err(ViewDerivationError::NameCollision {
                    parent,
                    name: field.name.clone(),
                    first,
                    second: field.id.clone(),
                });
            }
        }

        for parent in &field.parents {
            taken.insert((parent.clone(), field.name.clone()), field.id.clone());
        }
    }

    Ok(())
}

/// The first parent on which the field's name is taken, with the id of the field holding it
fn find_collision(
    taken: &HashMap<(String, String), String>,
    field: &DerivedField,
) -> Option<(String, String)> {
    field.parents.iter().find_map(|parent| {
        taken
            .get(&(parent.clone(), field.name.clone()))
            .map(|first| (parent.clone(), first.clone()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_model::types::FieldType;
    use indexmap::IndexMap;
    use views_model::{cache::CacheMetadata, derived::DerivedFieldKind};

    fn view_field(view_id: &str, display_id: &str, name: &str, parents: &[&str]) -> DerivedField {
        let key = ViewDisplayKey::new(view_id, display_id);
        DerivedField {
            id: key.derived_id("view"),
            name: name.to_string(),
            return_type: FieldType::optional("Result"),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            arguments: IndexMap::new(),
            paged: false,
            cache: CacheMetadata::default(),
            key,
            kind: DerivedFieldKind::View,
            arguments_info: vec![],
            description: None,
        }
    }

    fn arena(fields: Vec<DerivedField>) -> MappedArena<DerivedField> {
        let mut arena = MappedArena::default();
        for field in fields {
            arena.add(&field.id.clone(), field);
        }
        arena
    }

    #[test]
    fn later_field_is_qualified() {
        let mut fields = arena(vec![
            view_field("blog", "list", "items", &["Root"]),
            view_field("news", "list", "items", &["Root", "Node"]),
            view_field("tags", "all", "items", &["Node"]),
        ]);

        resolve_field_collisions(&mut fields, CollisionPolicy::Qualify).unwrap();

        let names: Vec<_> = fields.iter().map(|(_, f)| f.name.as_str()).collect();
        assert_eq!(names, vec!["items", "itemsNewsList", "items"]);
    }

    #[test]
    fn fail_policy_reports_collision() {
        let mut fields = arena(vec![
            view_field("blog", "list", "items", &["Root"]),
            view_field("news", "list", "items", &["Root"]),
        ]);

        let error = resolve_field_collisions(&mut fields, CollisionPolicy::Fail).unwrap_err();
        assert!(matches!(
            error,
            ViewDerivationError::NameCollision { ref parent, ref first, ref second, .. }
                if parent == "Root" && first == "blog-list-view" && second == "news-list-view"
        ));
    }

    #[test]
    fn type_names_are_claimed_once() {
        let blog = ViewDisplayKey::new("blog", "list");
        let news = ViewDisplayKey::new("news", "list");
        let blog_names = DisplayNames::new(&blog, Some("items"));
        let news_names = DisplayNames::new(&news, Some("items"));

        let mut claims = TypeNameClaims::new(CollisionPolicy::Qualify);
        assert_eq!(
            claims.claim("ItemsResult".to_string(), &blog, &blog_names).unwrap(),
            "ItemsResult"
        );
        assert_eq!(
            claims.claim("ItemsResult".to_string(), &news, &news_names).unwrap(),
            "ItemsResultNewsList"
        );
        assert_eq!(
            claims.claim("View".to_string(), &blog, &blog_names).unwrap(),
            "ViewBlogList"
        );

        let mut strict = TypeNameClaims::new(CollisionPolicy::Fail);
        strict.claim("ItemsResult".to_string(), &blog, &blog_names).unwrap();
        assert!(
            strict
                .claim("ItemsResult".to_string(), &news, &news_names)
                .is_err()
        );
    }
}
