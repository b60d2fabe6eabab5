// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Fields of views-reference field items.
//!
//! An item of a views-reference field names a view and one of its displays. The item type gets a
//! `viewDerivative` field that executes that display and returns a member of the `ViewResult`
//! union. Which display runs is only known once the item is loaded, so the field is bound to a
//! display at request time.

use async_graphql_parser::types::Type;
use core_model::{
    type_normalization::{Operation, Parameter},
    types::FieldType,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    capability::is_paged,
    derived::{ArgSpec, DerivedField, DerivedFieldKind},
    display::DisplayConfig,
    types::VIEW_RESULT_UNION,
};

pub const VIEW_REFERENCE_FIELD: &str = "viewDerivative";

/// An entity field whose items refer to a view display, such as `field_related` of `node`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ViewReferenceFieldInfo {
    pub entity_type: String,
    pub field: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ViewReferenceField {
    /// `<entityType>-<field>-view-reference`
    pub id: String,
    pub name: String,
    /// Type of the field's items, such as `FieldNodeFieldRelated`
    pub parent: String,
    pub arguments: IndexMap<String, ArgSpec>,
}

impl ViewReferenceField {
    pub fn result_type(&self) -> FieldType {
        FieldType::optional(VIEW_RESULT_UNION)
    }

    /// The field to execute for an item referring to `display`.
    ///
    /// Arguments, contextual arguments and cache metadata come from the display's view field, so
    /// sort symbols resolve against the display's own sort-by enum.
    pub fn bind(&self, view_field: &DerivedField, display: &DisplayConfig) -> DerivedField {
        DerivedField {
            id: self.id.clone(),
            name: self.name.clone(),
            return_type: self.result_type(),
            parents: vec![self.parent.clone()],
            paged: is_paged(display),
            kind: DerivedFieldKind::ViewReference,
            description: None,
            ..view_field.clone()
        }
    }
}

impl Operation for ViewReferenceField {
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
        self.result_type().to_graphql_type()
    }

    fn description(&self) -> Option<&str> {
        Some("Results of the view display this item refers to")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cache::CacheMetadata,
        derived::{ContextualArgumentInfo, ROOT_PARENT, SORT_BY_ARG, ViewDisplayKey},
        display::{PagerConfig, PagerType},
    };

    #[test]
    fn binds_to_the_display_view_field() {
        let key = ViewDisplayKey::new("blog", "list");
        let view_field = DerivedField {
            id: key.derived_id("view"),
            name: "blogListView".to_string(),
            return_type: FieldType::optional("BlogListViewResult"),
            parents: vec![ROOT_PARENT.to_string()],
            arguments: [(
                SORT_BY_ARG.to_string(),
                ArgSpec::optional(SORT_BY_ARG, "BlogListViewSortBy"),
            )]
            .into_iter()
            .collect(),
            paged: false,
            cache: CacheMetadata::default(),
            key: key.clone(),
            kind: DerivedFieldKind::View,
            arguments_info: vec![ContextualArgumentInfo {
                argument_id: "nid".to_string(),
                index: 0,
                entity_type: None,
                bundles: vec![],
            }],
            description: None,
        };
        let reference = ViewReferenceField {
            id: "node-field_related-view-reference".to_string(),
            name: VIEW_REFERENCE_FIELD.to_string(),
            parent: "FieldNodeFieldRelated".to_string(),
            arguments: IndexMap::new(),
        };
        let display = DisplayConfig {
            pager: PagerConfig {
                pager_type: PagerType::Full,
                ..Default::default()
            },
            ..Default::default()
        };

        let bound = reference.bind(&view_field, &display);

        assert_eq!(bound.id, "node-field_related-view-reference");
        assert_eq!(bound.parents, vec!["FieldNodeFieldRelated"]);
        assert_eq!(bound.return_type.name(), VIEW_RESULT_UNION);
        assert_eq!(bound.kind, DerivedFieldKind::ViewReference);
        assert_eq!(bound.key, key);
        assert!(bound.paged);
        assert_eq!(
            bound.argument(SORT_BY_ARG).map(|a| a.typ.name()),
            Some("BlogListViewSortBy")
        );
        assert_eq!(bound.arguments_info, view_field.arguments_info);
    }
}
