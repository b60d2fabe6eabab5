// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Access to the host's view and entity type configuration.

use serde::{Deserialize, Serialize};
use views_model::{
    display::ViewDefinition, entity::EntityTypeInfo, reference::ViewReferenceFieldInfo,
};

pub trait ConfigStore {
    /// All views, in a stable order.
    fn views(&self) -> Vec<&ViewDefinition>;

    fn view(&self, view_id: &str) -> Option<&ViewDefinition>;

    fn entity_types(&self) -> Vec<&EntityTypeInfo>;

    fn entity_type(&self, id: &str) -> Option<&EntityTypeInfo>;

    /// Whether the GraphQL schema has an interface (or type) with this name, such as `Node`
    fn interface_exists(&self, name: &str) -> bool;

    /// Entity fields whose items refer to a view display
    fn view_reference_fields(&self) -> Vec<&ViewReferenceFieldInfo> {
        vec![]
    }

    /// `(viewId, displayId)` of every display using the GraphQL display plugin
    fn exposed_view_displays(&self) -> Vec<(String, String)> {
        self.views()
            .into_iter()
            .flat_map(|view| {
                view.displays
                    .iter()
                    .filter(|(_, display)| display.is_graphql())
                    .map(|(display_id, _)| (view.id.clone(), display_id.clone()))
            })
            .collect()
    }

    fn entity_type_bundles(&self, id: &str) -> Vec<String> {
        self.entity_type(id)
            .map(|entity_type| entity_type.bundles.clone())
            .unwrap_or_default()
    }

    fn entity_type_supports_bundles(&self, id: &str) -> bool {
        self.entity_type(id)
            .is_some_and(|entity_type| entity_type.supports_bundles())
    }

    fn entity_type_for_table(&self, table: &str) -> Option<String> {
        self.entity_types()
            .into_iter()
            .find(|entity_type| entity_type.tables().any(|t| t == table))
            .map(|entity_type| entity_type.id.clone())
    }
}

/// A `ConfigStore` holding its configuration in memory, deserializable from JSON such as:
///
/// ```json
/// {
///   "views": [{"id": "blog", "baseTable": "node_field_data", "displays": {...}}],
///   "entityTypes": [{"id": "node", "idKey": "nid", "bundleKey": "type", "bundles": ["page"]}],
///   "interfaces": ["Node", "NodePage"],
///   "viewReferenceFields": [{"entityType": "node", "field": "field_related"}]
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct InMemoryConfigStore {
    pub views: Vec<ViewDefinition>,
    pub entity_types: Vec<EntityTypeInfo>,
    pub interfaces: Vec<String>,
    pub view_reference_fields: Vec<ViewReferenceFieldInfo>,
}

impl InMemoryConfigStore {
    pub fn with_view(mut self, view: ViewDefinition) -> Self {
        self.views.push(view);
        self
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn views(&self) -> Vec<&ViewDefinition> {
        self.views.iter().collect()
    }

    fn view(&self, view_id: &str) -> Option<&ViewDefinition> {
        self.views.iter().find(|view| view.id == view_id)
    }

    fn entity_types(&self) -> Vec<&EntityTypeInfo> {
        self.entity_types.iter().collect()
    }

    fn entity_type(&self, id: &str) -> Option<&EntityTypeInfo> {
        self.entity_types
            .iter()
            .find(|entity_type| entity_type.id == id)
    }

    fn interface_exists(&self, name: &str) -> bool {
        self.interfaces.iter().any(|interface| interface == name)
    }

    fn view_reference_fields(&self) -> Vec<&ViewReferenceFieldInfo> {
        self.view_reference_fields.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lists_graphql_displays_in_order() {
        let store: InMemoryConfigStore = serde_json::from_value(json!({
            "views": [
                {"id": "blog", "displays": {
                    "page_1": {"displayPlugin": "page"},
                    "list": {"displayPlugin": "graphql"},
                    "feed": {"displayPlugin": "graphql"}
                }},
                {"id": "news", "displays": {"block": {"displayPlugin": "block"}}},
                {"id": "tags", "displays": {"all": {"displayPlugin": "graphql"}}}
            ]
        }))
        .unwrap();

        assert_eq!(
            store.exposed_view_displays(),
            vec![
                ("blog".to_string(), "list".to_string()),
                ("blog".to_string(), "feed".to_string()),
                ("tags".to_string(), "all".to_string()),
            ]
        );
    }

    #[test]
    fn entity_lookups() {
        let store: InMemoryConfigStore = serde_json::from_value(json!({
            "entityTypes": [
                {"id": "node", "idKey": "nid", "bundleKey": "type",
                 "dataTable": "node_field_data", "baseTable": "node", "bundles": ["page", "article"]},
                {"id": "user", "idKey": "uid", "dataTable": "users_field_data"}
            ],
            "interfaces": ["Node"]
        }))
        .unwrap();

        assert_eq!(store.entity_type_for_table("node").as_deref(), Some("node"));
        assert_eq!(
            store.entity_type_for_table("users_field_data").as_deref(),
            Some("user")
        );
        assert_eq!(store.entity_type_for_table("comment"), None);
        assert!(store.entity_type_supports_bundles("node"));
        assert!(!store.entity_type_supports_bundles("user"));
        assert!(!store.entity_type_supports_bundles("missing"));
        assert_eq!(store.entity_type_bundles("node"), vec!["page", "article"]);
        assert!(store.interface_exists("Node"));
        assert!(!store.interface_exists("User"));
    }
}
