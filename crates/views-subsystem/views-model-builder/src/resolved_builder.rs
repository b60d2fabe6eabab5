// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Resolve each exposed display into everything the derivers need: names, row type, attachment
//! parents and cache metadata.

use core_model::types::FieldType;
use heck::ToLowerCamelCase;
use indexmap::IndexSet;
use tracing::{debug, warn};
use views_model::{
    cache::CacheMetadata,
    capability::{entity_validation_target, exposed_filters, exposed_sorts, is_paged},
    derived::{ContextualArgumentInfo, KEY_SEPARATORS, ROOT_PARENT, ViewDisplayKey},
    display::{DisplayConfig, RowPlugin, ViewDefinition},
    subsystem::BuildDiagnostic,
};

use crate::{
    capability::{contextual_arguments_info, lookup_entity_type, row_resolve_type},
    collision::TypeNameClaims,
    error::ViewDerivationError,
    naming::{DisplayNames, bundle_type_name, entity_type_name},
    system_builder::{BuildContext, SystemContextBuilding},
};

/// A display that will be part of the schema.
#[derive(Debug)]
pub struct ResolvedDisplay<'a> {
    pub key: ViewDisplayKey,
    pub display: &'a DisplayConfig,
    pub names: DisplayNames,
    /// GraphQL name of the view field (and the sub-view field)
    pub field_name: String,
    pub row_type: String,
    /// Fields of a field-row type; empty for entity rows
    pub row_fields: Vec<ResolvedRowField>,
    pub result_type: String,
    pub filter_input: Option<String>,
    pub sort_by_enum: Option<String>,
    pub contextual_input: Option<String>,
    pub paged: bool,
    pub arguments_info: Vec<ContextualArgumentInfo>,
    pub parents: Vec<String>,
    /// Parents (of the view field or the sub-view field) that are entity interfaces
    pub interface_parents: Vec<String>,
    pub sub_view: Option<SubViewTarget>,
    /// Display and view cache metadata, without url contexts
    pub cache: CacheMetadata,
}

impl ResolvedDisplay<'_> {
    /// Whether the row type is defined by this subsystem (rather than being an entity type)
    pub fn has_row_type(&self) -> bool {
        matches!(self.display.row, RowPlugin::FieldRow { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRowField {
    pub field: String,
    pub alias: String,
    pub typ: FieldType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubViewTarget {
    pub entity_type: String,
    pub parents: Vec<String>,
}

/// Resolve every exposed display.
///
/// Displays without a row type are skipped. Displays whose configuration is invalid are skipped
/// and recorded as diagnostics. Any other error fails the build.
pub fn build<'a>(
    context: &BuildContext<'a>,
    building: &mut SystemContextBuilding,
) -> Result<Vec<ResolvedDisplay<'a>>, ViewDerivationError> {
    let mut claims = TypeNameClaims::new(context.config.collision_policy);
    let mut resolved = vec![];

    for key in context.registry.list_exposed_view_displays() {
        let Some((view, display)) = context.registry.lookup(key) else {
            continue;
        };

        match resolve_display(context, key, view, display) {
            Ok(Some(display)) => resolved.push(claim_type_names(display, &mut claims)?),
            Ok(None) => {
                debug!("Skipping {key}: its rows have no GraphQL type");
            }
            Err(error) if error.is_isolated() => {
                warn!("Excluding {key} from the schema: {error}");
                building.diagnostics.push(BuildDiagnostic {
                    key: key.clone(),
                    message: error.to_string(),
                });
            }
            Err(error) => return Err(error),
        }
    }

    Ok(resolved)
}

fn resolve_display<'a>(
    context: &BuildContext<'a>,
    key: &ViewDisplayKey,
    view: &'a ViewDefinition,
    display: &'a DisplayConfig,
) -> Result<Option<ResolvedDisplay<'a>>, ViewDerivationError> {
    validate_key(key)?;

    let names = DisplayNames::new(key, display.query_name());

    let Some(row_type) = row_resolve_type(context, view, display, &names) else {
        return Ok(None);
    };

    let arguments_info = contextual_arguments_info(context, key, display)?;
    let row_fields = row_fields(key, display)?;
    let (parents, mut interface_parents) = attachment_parents(context, &arguments_info);
    let sub_view = sub_view_target(context, key, display, &parents)?;

    if let Some(sub_view) = &sub_view {
        let interface = entity_type_name(&sub_view.entity_type);
        if sub_view.parents.contains(&interface) && !interface_parents.contains(&interface) {
            interface_parents.push(interface);
        }
    }

    let cache = display
        .cache
        .clone()
        .merged(&view.cache)
        .without_url_contexts();

    Ok(Some(ResolvedDisplay {
        key: key.clone(),
        display,
        field_name: names.query_name(),
        result_type: names.result_type_name(),
        filter_input: exposed_filters(display)
            .next()
            .is_some()
            .then(|| names.filter_input_name()),
        sort_by_enum: (!exposed_sorts(display).is_empty()).then(|| names.sort_by_enum_name()),
        contextual_input: (!display.arguments.is_empty())
            .then(|| names.contextual_filter_input_name()),
        names,
        row_type,
        row_fields,
        paged: is_paged(display),
        arguments_info,
        parents,
        interface_parents,
        sub_view,
        cache,
    }))
}

/// Settle the names of the types this display defines against those claimed by earlier displays.
fn claim_type_names<'a>(
    mut resolved: ResolvedDisplay<'a>,
    claims: &mut TypeNameClaims,
) -> Result<ResolvedDisplay<'a>, ViewDerivationError> {
    let key = &resolved.key;
    let names = &resolved.names;

    resolved.result_type = claims.claim(resolved.result_type, key, names)?;

    if resolved.has_row_type() {
        resolved.row_type = claims.claim(resolved.row_type, key, names)?;
    }

    resolved.filter_input = resolved
        .filter_input
        .map(|name| claims.claim(name, key, names))
        .transpose()?;
    resolved.sort_by_enum = resolved
        .sort_by_enum
        .map(|name| claims.claim(name, key, names))
        .transpose()?;
    resolved.contextual_input = resolved
        .contextual_input
        .map(|name| claims.claim(name, key, names))
        .transpose()?;

    Ok(resolved)
}

/// View and display ids must not contain the separators of derived ids and display keys, which
/// would let two displays derive the same ids.
fn validate_key(key: &ViewDisplayKey) -> Result<(), ViewDerivationError> {
    for (kind, id) in [("view", &key.view_id), ("display", &key.display_id)] {
        if let Some(separator) = id.chars().find(|c| KEY_SEPARATORS.contains(c)) {
            return Err(ViewDerivationError::configuration(
                key,
                format!("{kind} id '{id}' contains the reserved character '{separator}'"),
            ));
        }
    }

    Ok(())
}

fn row_fields(
    key: &ViewDisplayKey,
    display: &DisplayConfig,
) -> Result<Vec<ResolvedRowField>, ViewDerivationError> {
    let RowPlugin::FieldRow { fields } = &display.row else {
        return Ok(vec![]);
    };

    if fields.is_empty() {
        return Err(ViewDerivationError::configuration(
            key,
            "field rows must have at least one field",
        ));
    }

    fields
        .iter()
        .map(|(field, handler)| {
            let alias = handler
                .alias
                .as_deref()
                .map(str::trim)
                .filter(|alias| !alias.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| field.to_lower_camel_case());

            let typ = match handler.typ.as_deref() {
                Some(sdl) => FieldType::from_sdl(sdl).ok_or_else(|| {
                    ViewDerivationError::configuration(
                        key,
                        format!("field '{field}' has an invalid type '{sdl}'"),
                    )
                })?,
                None => FieldType::optional("String"),
            };

            Ok(ResolvedRowField {
                field: field.clone(),
                alias,
                typ,
            })
        })
        .collect()
}

/// `Root` followed by the entity types the contextual arguments refer to.
///
/// Returns the parents and, separately, those of them that are entity interfaces.
fn attachment_parents(
    context: &BuildContext,
    arguments_info: &[ContextualArgumentInfo],
) -> (Vec<String>, Vec<String>) {
    let mut parents = IndexSet::from([ROOT_PARENT.to_string()]);
    let mut interfaces = IndexSet::new();

    for info in arguments_info {
        let Some(entity_type) = &info.entity_type else {
            continue;
        };

        if info.bundles.is_empty() {
            let interface = entity_type_name(entity_type);
            interfaces.insert(interface.clone());
            parents.insert(interface);

            parents.extend(all_bundle_types(context, entity_type));
        } else {
            parents.extend(
                info.bundles
                    .iter()
                    .map(|bundle| bundle_type_name(entity_type, bundle)),
            );
        }
    }

    (parents.into_iter().collect(), interfaces.into_iter().collect())
}

fn all_bundle_types(context: &BuildContext, entity_type: &str) -> Vec<String> {
    if !context.store.entity_type_supports_bundles(entity_type) {
        return vec![];
    }

    context
        .store
        .entity_type_bundles(entity_type)
        .iter()
        .map(|bundle| bundle_type_name(entity_type, bundle))
        .collect()
}

/// The entity types a display with a single `entity:<type>` argument is attached to as a
/// sub-view, minus those the view field is attached to already.
fn sub_view_target(
    context: &BuildContext,
    key: &ViewDisplayKey,
    display: &DisplayConfig,
    view_field_parents: &[String],
) -> Result<Option<SubViewTarget>, ViewDerivationError> {
    let [argument] = display.arguments.as_slice() else {
        return Ok(None);
    };

    let Some(entity_type_id) = entity_validation_target(argument).ok().flatten() else {
        return Ok(None);
    };

    let entity_type = lookup_entity_type(context, key, entity_type_id)?;

    let bundles: &[String] = if entity_type.supports_bundles() {
        &argument.validate_bundles
    } else {
        &[]
    };

    let candidates = if bundles.is_empty() {
        std::iter::once(entity_type_name(entity_type_id))
            .chain(all_bundle_types(context, entity_type_id))
            .collect::<Vec<_>>()
    } else {
        bundles
            .iter()
            .map(|bundle| bundle_type_name(entity_type_id, bundle))
            .collect()
    };

    let parents: Vec<String> = candidates
        .into_iter()
        .filter(|parent| !view_field_parents.contains(parent))
        .collect();

    Ok((!parents.is_empty()).then(|| SubViewTarget {
        entity_type: entity_type_id.to_string(),
        parents,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DerivationConfig, store::InMemoryConfigStore};
    use serde_json::json;

    fn store(displays: serde_json::Value) -> InMemoryConfigStore {
        serde_json::from_value(json!({
            "views": [{"id": "related", "baseTable": "node_field_data", "displays": displays}],
            "entityTypes": [
                {"id": "node", "idKey": "nid", "bundleKey": "type",
                 "dataTable": "node_field_data", "bundles": ["page", "article"]},
                {"id": "user", "idKey": "uid", "dataTable": "users_field_data"}
            ],
            "interfaces": ["Node"]
        }))
        .unwrap()
    }

    fn resolve(store: &InMemoryConfigStore) -> (Vec<String>, Vec<BuildDiagnostic>) {
        let config = DerivationConfig::default();
        let context = BuildContext::new(store, &config);
        let mut building = SystemContextBuilding::default();

        let resolved = build(&context, &mut building).unwrap();
        let keys = resolved.iter().map(|r| r.key.to_string()).collect();
        (keys, building.diagnostics)
    }

    #[test]
    fn parents_follow_contextual_arguments() {
        let store = store(json!({
            "graphql_1": {
                "displayPlugin": "graphql",
                "arguments": [
                    {"id": "nid", "entityType": "node", "entityField": "nid"},
                    {"id": "uid", "entityType": "user", "entityField": "uid"},
                    {"id": "type", "entityType": "node", "entityField": "nid",
                     "specifyValidation": true, "validateType": "entity:node", "validateBundles": ["article"]}
                ]
            }
        }));
        let config = DerivationConfig::default();
        let context = BuildContext::new(&store, &config);
        let mut building = SystemContextBuilding::default();

        let resolved = build(&context, &mut building).unwrap();
        let display = &resolved[0];

        assert_eq!(
            display.parents,
            vec!["Root", "Node", "NodePage", "NodeArticle", "User"]
        );
        assert_eq!(display.interface_parents, vec!["Node", "User"]);
        assert_eq!(
            display.contextual_input.as_deref(),
            Some("RelatedGraphql1ViewContextualFilterInput")
        );
        // Several arguments: no sub-view
        assert!(display.sub_view.is_none());
    }

    #[test]
    fn sub_view_skips_view_field_parents() {
        let store = store(json!({
            "restricted": {
                "displayPlugin": "graphql",
                "arguments": [
                    {"id": "nid", "specifyValidation": true, "validateType": "entity:node",
                     "validateBundles": ["article"]}
                ]
            },
            "bound": {
                "displayPlugin": "graphql",
                "arguments": [
                    {"id": "nid", "entityType": "node", "entityField": "nid", "validateType": "entity:node"}
                ]
            }
        }));
        let config = DerivationConfig::default();
        let context = BuildContext::new(&store, &config);
        let mut building = SystemContextBuilding::default();

        let resolved = build(&context, &mut building).unwrap();

        let restricted = &resolved[0];
        assert_eq!(restricted.parents, vec!["Root"]);
        assert_eq!(
            restricted.sub_view,
            Some(SubViewTarget {
                entity_type: "node".to_string(),
                parents: vec!["NodeArticle".to_string()],
            })
        );

        // The view field already covers the interface and every bundle type
        let bound = &resolved[1];
        assert_eq!(bound.parents, vec!["Root", "Node", "NodePage", "NodeArticle"]);
        assert!(bound.sub_view.is_none());
    }

    #[test]
    fn invalid_displays_become_diagnostics() {
        let store = store(json!({
            "broken": {
                "displayPlugin": "graphql",
                "arguments": [{"id": "tid", "entityType": "taxonomy_term", "entityField": "tid"}]
            },
            "bad_field": {
                "displayPlugin": "graphql",
                "row": {"type": "fieldRow", "fields": {"title": {"type": "[String"}}}
            },
            "rss": {"displayPlugin": "graphql", "row": {"type": "other", "pluginId": "rss"}},
            "page_1": {"displayPlugin": "page"},
            "graphql_1": {"displayPlugin": "graphql"}
        }));

        let (keys, diagnostics) = resolve(&store);

        assert_eq!(keys, vec!["related:graphql_1"]);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].key, ViewDisplayKey::new("related", "broken"));
        assert!(diagnostics[1].message.contains("[String"));
    }

    #[test]
    fn row_fields_default_alias_and_type() {
        let display: DisplayConfig = serde_json::from_value(json!({
            "row": {"type": "fieldRow", "fields": {
                "field_tags": {},
                "title": {"alias": "heading", "type": "String!"}
            }}
        }))
        .unwrap();

        let fields = row_fields(&ViewDisplayKey::new("related", "graphql_1"), &display).unwrap();

        assert_eq!(
            fields,
            vec![
                ResolvedRowField {
                    field: "field_tags".to_string(),
                    alias: "fieldTags".to_string(),
                    typ: FieldType::optional("String"),
                },
                ResolvedRowField {
                    field: "title".to_string(),
                    alias: "heading".to_string(),
                    typ: FieldType::plain("String"),
                },
            ]
        );
    }
}
