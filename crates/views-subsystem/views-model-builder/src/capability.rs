// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Capabilities of a display that depend on the entity type configuration.

use views_model::{
    capability::entity_validation_target,
    derived::{ContextualArgumentInfo, ViewDisplayKey},
    display::{DisplayConfig, RowPlugin, ViewDefinition},
    entity::EntityTypeInfo,
};

use crate::{
    error::ViewDerivationError,
    naming::{DisplayNames, bundle_type_name, entity_type_name},
    system_builder::BuildContext,
};

/// Describe the contextual arguments of a display, in positional order.
///
/// An argument refers to an entity type only when it is bound to that entity type's id field.
/// Its bundles are recorded when validation against `entity:<type>` is specified with a bundle
/// restriction.
pub fn contextual_arguments_info(
    context: &BuildContext,
    key: &ViewDisplayKey,
    display: &DisplayConfig,
) -> Result<Vec<ContextualArgumentInfo>, ViewDerivationError> {
    display
        .arguments
        .iter()
        .enumerate()
        .map(|(index, argument)| -> Result<ContextualArgumentInfo, ViewDerivationError> {
            let validation_target = entity_validation_target(argument).map_err(|validate_type| {
                ViewDerivationError::configuration(
                    key,
                    format!(
                        "argument '{}' validates against '{validate_type}', which names no entity type",
                        argument.id
                    ),
                )
            })?;

            if let Some(target) = validation_target {
                lookup_entity_type(context, key, target)?;
            }

            let mut info = ContextualArgumentInfo {
                argument_id: argument.id.clone(),
                index,
                entity_type: None,
                bundles: vec![],
            };

            if let (Some(entity_type_id), Some(entity_field)) =
                (&argument.entity_type, &argument.entity_field)
            {
                let entity_type = lookup_entity_type(context, key, entity_type_id)?;

                if &entity_type.id_key == entity_field {
                    info.entity_type = Some(entity_type_id.clone());

                    if argument.specify_validation
                        && validation_target.is_some()
                        && !argument.validate_bundles.is_empty()
                    {
                        info.bundles = argument.validate_bundles.clone();
                    }
                }
            }

            Ok(info)
        })
        .collect()
}

pub fn lookup_entity_type<'a>(
    context: &BuildContext<'a>,
    key: &ViewDisplayKey,
    entity_type: &str,
) -> Result<&'a EntityTypeInfo, ViewDerivationError> {
    context
        .store
        .entity_type(entity_type)
        .ok_or_else(|| ViewDerivationError::UnknownEntityType {
            key: key.clone(),
            entity_type: entity_type.to_string(),
        })
}

/// The type each row of the display resolves to. `None` excludes the display from the schema.
pub fn row_resolve_type(
    context: &BuildContext,
    view: &ViewDefinition,
    display: &DisplayConfig,
    names: &DisplayNames,
) -> Option<String> {
    match &display.row {
        RowPlugin::FieldRow { .. } => Some(names.row_type_name()),
        RowPlugin::EntityRow => entity_row_type(context, view, display)
            .or_else(|| context.config.entity_fallback_type.clone()),
        RowPlugin::Other { .. } => None,
    }
}

/// The interface of the view's base entity type, narrowed to a bundle type when a fixed,
/// single-valued filter on the bundle field restricts the view to one bundle.
fn entity_row_type(
    context: &BuildContext,
    view: &ViewDefinition,
    display: &DisplayConfig,
) -> Option<String> {
    let entity_type_id = context.entity_type_for_table(view.base_table.as_deref()?)?;
    let entity_type = context.store.entity_type(&entity_type_id)?;

    let interface = entity_type_name(&entity_type.id);
    if !context.store.interface_exists(&interface) {
        return None;
    }

    let bundle = display.filters.iter().find_map(|filter| {
        let is_bundle_filter = filter.table.is_some()
            && filter.table == entity_type.data_table
            && filter.field.is_some()
            && filter.field == entity_type.bundle_key;

        if is_bundle_filter && !filter.exposed {
            filter.single_value()
        } else {
            None
        }
    });

    Some(match bundle {
        Some(bundle) => bundle_type_name(&entity_type.id, bundle),
        None => interface,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DerivationConfig, store::InMemoryConfigStore};
    use serde_json::json;

    fn store() -> InMemoryConfigStore {
        serde_json::from_value(json!({
            "entityTypes": [
                {"id": "node", "idKey": "nid", "bundleKey": "type",
                 "dataTable": "node_field_data", "baseTable": "node", "bundles": ["page", "article"]},
                {"id": "comment", "idKey": "cid", "dataTable": "comment_field_data"}
            ],
            "interfaces": ["Node"]
        }))
        .unwrap()
    }

    fn view(display: serde_json::Value, base_table: &str) -> ViewDefinition {
        serde_json::from_value(json!({
            "id": "content",
            "baseTable": base_table,
            "displays": {"graphql_1": display}
        }))
        .unwrap()
    }

    fn row_type(
        store: &InMemoryConfigStore,
        config: &DerivationConfig,
        view: &ViewDefinition,
    ) -> Option<String> {
        let context = BuildContext::new(store, config);
        let key = ViewDisplayKey::new("content", "graphql_1");
        let display = view.display("graphql_1").unwrap();
        let names = DisplayNames::new(&key, display.query_name());

        row_resolve_type(&context, view, display, &names)
    }

    #[test]
    fn bundle_filter_refines_entity_row() {
        let store = store();
        let config = DerivationConfig::default();

        let single = view(
            json!({"filters": [
                {"id": "status", "value": "1", "table": "node_field_data", "field": "status"},
                {"id": "type", "value": {"page": "page"}, "table": "node_field_data", "field": "type"}
            ]}),
            "node_field_data",
        );
        assert_eq!(row_type(&store, &config, &single).as_deref(), Some("NodePage"));

        let exposed = view(
            json!({"filters": [
                {"id": "type", "exposed": true, "value": ["page"], "table": "node_field_data", "field": "type"}
            ]}),
            "node_field_data",
        );
        assert_eq!(row_type(&store, &config, &exposed).as_deref(), Some("Node"));

        let multiple = view(
            json!({"filters": [
                {"id": "type", "value": ["page", "article"], "table": "node_field_data", "field": "type"}
            ]}),
            "node",
        );
        assert_eq!(row_type(&store, &config, &multiple).as_deref(), Some("Node"));
    }

    #[test]
    fn entity_row_fallback() {
        let store = store();

        // No `Comment` interface
        let comments = view(json!({}), "comment_field_data");
        assert_eq!(
            row_type(&store, &DerivationConfig::default(), &comments).as_deref(),
            Some("Entity")
        );

        let no_fallback = DerivationConfig {
            entity_fallback_type: None,
            ..Default::default()
        };
        assert_eq!(row_type(&store, &no_fallback, &comments), None);

        let unknown_table = view(json!({}), "watchdog");
        assert_eq!(row_type(&store, &no_fallback, &unknown_table), None);
    }

    #[test]
    fn field_and_other_rows() {
        let store = store();
        let config = DerivationConfig::default();

        let fields = view(json!({"row": {"type": "fieldRow"}}), "node_field_data");
        assert_eq!(
            row_type(&store, &config, &fields).as_deref(),
            Some("ContentGraphql1ViewRow")
        );

        let other = view(
            json!({"row": {"type": "other", "pluginId": "rss"}}),
            "node_field_data",
        );
        assert_eq!(row_type(&store, &config, &other), None);
    }

    #[test]
    fn arguments_info() {
        let store = store();
        let config = DerivationConfig::default();
        let context = BuildContext::new(&store, &config);
        let key = ViewDisplayKey::new("content", "graphql_1");

        let display: DisplayConfig = serde_json::from_value(json!({
            "arguments": [
                {"id": "nid", "entityType": "node", "entityField": "nid",
                 "specifyValidation": true, "validateType": "entity:node", "validateBundles": ["article"]},
                {"id": "title", "entityType": "node", "entityField": "title"},
                {"id": "uid", "entityType": "node", "entityField": "nid",
                 "specifyValidation": false, "validateType": "entity:node", "validateBundles": ["page"]}
            ]
        }))
        .unwrap();

        let info = contextual_arguments_info(&context, &key, &display).unwrap();

        assert_eq!(info.len(), 3);
        assert_eq!(info[0].index, 0);
        assert_eq!(info[0].entity_type.as_deref(), Some("node"));
        assert_eq!(info[0].bundles, vec!["article"]);
        // Not bound to the id field
        assert_eq!(info[1].entity_type, None);
        // Validation not specified
        assert_eq!(info[2].index, 2);
        assert_eq!(info[2].entity_type.as_deref(), Some("node"));
        assert!(info[2].bundles.is_empty());
    }

    #[test]
    fn invalid_arguments() {
        let store = store();
        let config = DerivationConfig::default();
        let context = BuildContext::new(&store, &config);
        let key = ViewDisplayKey::new("content", "graphql_1");

        let empty_target: DisplayConfig = serde_json::from_value(json!({
            "arguments": [{"id": "nid", "validateType": "entity:"}]
        }))
        .unwrap();
        assert!(matches!(
            contextual_arguments_info(&context, &key, &empty_target),
            Err(ViewDerivationError::Configuration { .. })
        ));

        let unknown: DisplayConfig = serde_json::from_value(json!({
            "arguments": [{"id": "tid", "entityType": "taxonomy_term", "entityField": "tid"}]
        }))
        .unwrap();
        assert!(matches!(
            contextual_arguments_info(&context, &key, &unknown),
            Err(ViewDerivationError::UnknownEntityType { entity_type, .. }) if entity_type == "taxonomy_term"
        ));
    }
}
