// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! View and display configuration as authored by the host.
//!
//! All types deserialize from camelCase JSON (or any serde format), so a host can feed its parsed
//! configuration directly. Absent options take their defaults: no pager, no sorts, no filters, no
//! contextual arguments, an entity row.

use common::value::Val;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::cache::CacheMetadata;

/// The display plugin that marks a display as exposed through GraphQL.
pub const GRAPHQL_DISPLAY_PLUGIN: &str = "graphql";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewDefinition {
    pub id: String,
    /// Table the view queries, used to find the view's base entity type
    #[serde(default)]
    pub base_table: Option<String>,
    #[serde(default)]
    pub cache: CacheMetadata,
    #[serde(default)]
    pub displays: IndexMap<String, DisplayConfig>,
}

impl ViewDefinition {
    pub fn display(&self, display_id: &str) -> Option<&DisplayConfig> {
        self.displays.get(display_id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayConfig {
    pub display_plugin: String,
    pub pager: PagerConfig,
    pub sorts: Vec<SortOption>,
    pub filters: Vec<FilterOption>,
    pub arguments: Vec<ArgumentOption>,
    pub row: RowPlugin,
    /// User override for the GraphQL names derived from this display
    pub query_name: Option<String>,
    pub cache: CacheMetadata,
    pub argument_mode: TokenMode,
    pub limit_mode: TokenMode,
}

impl DisplayConfig {
    pub fn is_graphql(&self) -> bool {
        self.display_plugin == GRAPHQL_DISPLAY_PLUGIN
    }

    /// The query name override, ignoring blank values.
    pub fn query_name(&self) -> Option<&str> {
        self.query_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PagerConfig {
    #[serde(rename = "type")]
    pub pager_type: PagerType,
    pub offset: Option<i64>,
    pub items_per_page: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PagerType {
    #[default]
    None,
    Some,
    Full,
    Mini,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SortOption {
    pub id: String,
    #[serde(default)]
    pub exposed: bool,
    #[serde(default)]
    pub label: Option<String>,
}

impl SortOption {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FilterOption {
    pub id: String,
    #[serde(default)]
    pub exposed: bool,
    /// Exposed form identifier; the filter id when absent
    #[serde(default)]
    pub identifier: Option<String>,
    /// Configured value, used when the caller supplies none
    #[serde(default)]
    pub value: Val,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
}

impl FilterOption {
    pub fn identifier(&self) -> &str {
        self.identifier.as_deref().unwrap_or(&self.id)
    }

    /// The only configured value, if the filter holds exactly one.
    ///
    /// Multi-valued filters may be configured as a list (`["page"]`) or as a map keyed by value
    /// (`{"page": "page"}`).
    pub fn single_value(&self) -> Option<&str> {
        match &self.value {
            Val::List(values) if values.len() == 1 => values[0].as_str(),
            Val::Object(values) if values.len() == 1 => {
                values.values().next().and_then(Val::as_str)
            }
            _ => None,
        }
    }
}

/// A contextual (positional) argument.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ArgumentOption {
    pub id: String,
    /// Entity type the argument's field belongs to
    pub entity_type: Option<String>,
    /// Field the argument is bound to
    pub entity_field: Option<String>,
    pub specify_validation: bool,
    /// Such as `entity:node` or `numeric`
    pub validate_type: Option<String>,
    pub validate_bundles: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RowPlugin {
    /// Each row is an entity
    #[default]
    EntityRow,
    /// Each row is a set of configured fields
    FieldRow {
        #[serde(default)]
        fields: IndexMap<String, FieldHandler>,
    },
    Other {
        #[serde(rename = "pluginId")]
        plugin_id: String,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FieldHandler {
    pub alias: Option<String>,
    /// SDL type of the field, such as `String` or `[Int]`
    #[serde(rename = "type")]
    pub typ: Option<String>,
}

/// Where a display takes its contextual arguments or page size from, besides the caller.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum TokenMode {
    #[default]
    None,
    /// A token string such as `[node:nid]/all`
    Token { value: String },
}

impl TokenMode {
    pub fn token_string(&self) -> Option<&str> {
        match self {
            TokenMode::None => None,
            TokenMode::Token { value } => Some(value),
        }
    }
}
