// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::cell::OnceCell;

use indexmap::IndexSet;
use tracing::debug;
use views_model::{
    derived::ViewDisplayKey,
    display::{DisplayConfig, ViewDefinition},
};

use crate::store::ConfigStore;

/// The displays exposed through GraphQL.
///
/// The list is computed on first use and kept for the lifetime of the registry, which is owned by
/// a single schema build.
pub struct ViewRegistry<'a> {
    store: &'a dyn ConfigStore,
    exposed: OnceCell<Vec<ViewDisplayKey>>,
}

impl<'a> ViewRegistry<'a> {
    pub fn new(store: &'a dyn ConfigStore) -> Self {
        Self {
            store,
            exposed: OnceCell::new(),
        }
    }

    pub fn list_exposed_view_displays(&self) -> &[ViewDisplayKey] {
        self.exposed.get_or_init(|| {
            let keys: IndexSet<ViewDisplayKey> = self
                .store
                .exposed_view_displays()
                .into_iter()
                .map(|(view_id, display_id)| ViewDisplayKey::new(view_id, display_id))
                .filter(|key| match self.lookup(key) {
                    Some((_, display)) => display.is_graphql(),
                    None => {
                        debug!("Skipping {key}: view or display not found");
                        false
                    }
                })
                .collect();

            keys.into_iter().collect()
        })
    }

    pub fn lookup(&self, key: &ViewDisplayKey) -> Option<(&'a ViewDefinition, &'a DisplayConfig)> {
        let view = self.store.view(&key.view_id)?;
        let display = view.display(&key.display_id)?;
        Some((view, display))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryConfigStore;
    use views_model::display::GRAPHQL_DISPLAY_PLUGIN;

    /// A store whose exposed list disagrees with its views
    struct StaleStore(InMemoryConfigStore);

    impl ConfigStore for StaleStore {
        fn views(&self) -> Vec<&ViewDefinition> {
            self.0.views()
        }

        fn view(&self, view_id: &str) -> Option<&ViewDefinition> {
            self.0.view(view_id)
        }

        fn entity_types(&self) -> Vec<&views_model::entity::EntityTypeInfo> {
            vec![]
        }

        fn entity_type(&self, _id: &str) -> Option<&views_model::entity::EntityTypeInfo> {
            None
        }

        fn interface_exists(&self, _name: &str) -> bool {
            false
        }

        fn exposed_view_displays(&self) -> Vec<(String, String)> {
            vec![
                ("blog".to_string(), "list".to_string()),
                ("blog".to_string(), "missing".to_string()),
                ("gone".to_string(), "list".to_string()),
                ("blog".to_string(), "list".to_string()),
                ("blog".to_string(), "page".to_string()),
            ]
        }
    }

    #[test]
    fn skips_absent_and_duplicate_displays() {
        let mut view = ViewDefinition {
            id: "blog".to_string(),
            ..Default::default()
        };
        view.displays.insert(
            "list".to_string(),
            DisplayConfig {
                display_plugin: GRAPHQL_DISPLAY_PLUGIN.to_string(),
                ..Default::default()
            },
        );
        view.displays
            .insert("page".to_string(), DisplayConfig::default());

        let store = StaleStore(InMemoryConfigStore::default().with_view(view));
        let registry = ViewRegistry::new(&store);

        assert_eq!(
            registry.list_exposed_view_displays(),
            &[ViewDisplayKey::new("blog", "list")]
        );
    }
}
