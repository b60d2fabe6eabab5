// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::Display;

use async_graphql_parser::types::Type;
use async_graphql_value::ConstValue;
use common::value::Val;
use core_model::{
    type_normalization::{Operation, Parameter},
    types::FieldType,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::cache::CacheMetadata;

/// Parent name for fields of the query root.
pub const ROOT_PARENT: &str = "Root";

pub const CONTEXTUAL_FILTER_ARG: &str = "contextualFilter";
pub const PAGE_ARG: &str = "page";
pub const PAGE_SIZE_ARG: &str = "pageSize";
pub const SORT_DIRECTION_ARG: &str = "sortDirection";
pub const SORT_BY_ARG: &str = "sortBy";
pub const FILTER_ARG: &str = "filter";
/// Accepted at resolve time but not declared on derived fields
pub const OFFSET_ARG: &str = "offset";

pub const RESULTS_FIELD: &str = "results";
pub const COUNT_FIELD: &str = "count";

/// Separators of derived ids (`-`) and display keys (`:`), not allowed in view and display ids
pub const KEY_SEPARATORS: [char; 2] = ['-', ':'];

/// Identifies the view and display a schema artifact was derived from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewDisplayKey {
    pub view_id: String,
    pub display_id: String,
}

impl ViewDisplayKey {
    pub fn new(view_id: impl Into<String>, display_id: impl Into<String>) -> Self {
        Self {
            view_id: view_id.into(),
            display_id: display_id.into(),
        }
    }

    /// Derived ids have the form `<view>-<display>-<suffix>`
    pub fn derived_id(&self, suffix: &str) -> String {
        format!("{}-{}-{}", self.view_id, self.display_id, suffix)
    }

    pub fn matches(&self, view_id: &str, display_id: &str) -> bool {
        self.view_id == view_id && self.display_id == display_id
    }
}

impl Display for ViewDisplayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.view_id, self.display_id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum DerivedFieldKind {
    /// The view field, on `Root` and on entity types referenced by contextual arguments
    View,
    /// The view field on the entity type its single contextual argument validates against
    SubView,
    /// `results` of a result type
    ResultList,
    /// `count` of a paged result type
    ResultCount,
    /// A field of a field-row type, read from the row under `alias`
    RowField { field: String, alias: String },
    /// A views-reference item's field, bound to the display the item refers to
    ViewReference,
}

impl DerivedFieldKind {
    pub fn id_suffix(&self) -> String {
        match self {
            DerivedFieldKind::View => "view".to_string(),
            DerivedFieldKind::SubView => "sub-view".to_string(),
            DerivedFieldKind::ResultList => "result-list".to_string(),
            DerivedFieldKind::ResultCount => "result-count".to_string(),
            DerivedFieldKind::RowField { field, .. } => format!("field-{field}"),
            DerivedFieldKind::ViewReference => "view-reference".to_string(),
        }
    }
}

/// An argument of a derived field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArgSpec {
    pub name: String,
    pub typ: FieldType,
    pub default_value: Option<Val>,
}

impl ArgSpec {
    /// A nullable argument of the named type
    pub fn optional(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            typ: FieldType::optional(type_name),
            default_value: None,
        }
    }

    pub fn with_default(self, default_value: Val) -> Self {
        Self {
            default_value: Some(default_value),
            ..self
        }
    }
}

impl Parameter for ArgSpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn typ(&self) -> Type {
        self.typ.to_graphql_type()
    }

    fn default_value(&self) -> Option<ConstValue> {
        self.default_value.as_ref().map(Val::to_const_value)
    }
}

/// What a contextual argument refers to.
///
/// `index` is the argument's position; the backend receives contextual values in this order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContextualArgumentInfo {
    pub argument_id: String,
    pub index: usize,
    pub entity_type: Option<String>,
    pub bundles: Vec<String>,
}

impl ContextualArgumentInfo {
    /// Whether a parent entity of the given type and bundle supplies this argument.
    pub fn accepts_parent(&self, entity_type: &str, bundle: Option<&str>) -> bool {
        self.entity_type.as_deref() == Some(entity_type)
            && (self.bundles.is_empty()
                || bundle.is_some_and(|bundle| self.bundles.iter().any(|b| b == bundle)))
    }
}

/// A GraphQL field derived from a view display.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DerivedField {
    /// Unique across the schema: `<view>-<display>-<kind>`
    pub id: String,
    pub name: String,
    pub return_type: FieldType,
    /// Types this field is attached to. `Root` stands for the query root.
    pub parents: Vec<String>,
    pub arguments: IndexMap<String, ArgSpec>,
    pub paged: bool,
    pub cache: CacheMetadata,
    pub key: ViewDisplayKey,
    pub kind: DerivedFieldKind,
    pub arguments_info: Vec<ContextualArgumentInfo>,
    pub description: Option<String>,
}

impl DerivedField {
    pub fn is_attached_to(&self, parent: &str) -> bool {
        self.parents.iter().any(|p| p == parent)
    }

    pub fn argument(&self, name: &str) -> Option<&ArgSpec> {
        self.arguments.get(name)
    }
}

impl Operation for DerivedField {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Vec<&dyn Parameter> {
        self.arguments
            .values()
            .map(|argument| argument as &dyn Parameter)
            .collect()
    }

    fn return_type(&self) -> Type {
        self.return_type.to_graphql_type()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
