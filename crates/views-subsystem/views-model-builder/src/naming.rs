// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use views_model::derived::ViewDisplayKey;

/// Join name parts and convert them to a GraphQL type name, such as `NodePage` for
/// `["node", "page"]`
pub fn type_name(parts: &[&str]) -> String {
    parts.join("_").to_upper_camel_case()
}

/// Join name parts and convert them to a GraphQL field name, such as `blogListView` for
/// `["blog", "list", "view"]`
pub fn field_name(parts: &[&str]) -> String {
    parts.join("_").to_lower_camel_case()
}

pub fn entity_type_name(entity_type: &str) -> String {
    type_name(&[entity_type])
}

pub fn bundle_type_name(entity_type: &str, bundle: &str) -> String {
    type_name(&[entity_type, bundle])
}

/// Type of the items of an entity field, such as `FieldNodeFieldRelated`
pub fn field_item_type_name(entity_type: &str, field: &str) -> String {
    type_name(&["field", entity_type, field])
}

/// Names derived from a display.
///
/// By default names are built from `[view, display, "view", suffix]`. A query name override
/// replaces the first three parts, except for the sort-by enum and the contextual filter input
/// whose names always follow the view and display.
#[derive(Debug, Clone)]
pub struct DisplayNames {
    key: ViewDisplayKey,
    query_name: Option<String>,
}

impl DisplayNames {
    pub fn new(key: &ViewDisplayKey, query_name: Option<&str>) -> Self {
        Self {
            key: key.clone(),
            query_name: query_name.map(str::to_string),
        }
    }

    fn parts<'a>(&'a self, suffix: Option<&'a str>) -> Vec<&'a str> {
        let mut parts = match &self.query_name {
            Some(query_name) => vec![query_name.as_str()],
            None => vec![
                self.key.view_id.as_str(),
                self.key.display_id.as_str(),
                "view",
            ],
        };
        parts.extend(suffix);
        parts
    }

    fn key_parts<'a>(&'a self, suffix: &[&'a str]) -> Vec<&'a str> {
        let mut parts = vec![
            self.key.view_id.as_str(),
            self.key.display_id.as_str(),
            "view",
        ];
        parts.extend_from_slice(suffix);
        parts
    }

    pub fn query_name(&self) -> String {
        field_name(&self.parts(None))
    }

    pub fn result_type_name(&self) -> String {
        type_name(&self.parts(Some("result")))
    }

    pub fn row_type_name(&self) -> String {
        type_name(&self.parts(Some("row")))
    }

    pub fn filter_input_name(&self) -> String {
        type_name(&self.parts(Some("filter_input")))
    }

    pub fn sort_by_enum_name(&self) -> String {
        type_name(&self.key_parts(&["sort", "by"]))
    }

    pub fn contextual_filter_input_name(&self) -> String {
        type_name(&self.key_parts(&["contextual", "filter", "input"]))
    }

    pub fn contextual_filter_input_id(&self) -> String {
        self.key_parts(&["contextual_filter_input"]).join("_")
    }

    /// Name used for a field that collides with another display's field
    pub fn qualified_field_name(&self, name: &str) -> String {
        field_name(&[name, self.key.view_id.as_str(), self.key.display_id.as_str()])
    }

    /// Name used for a type that collides with another display's type
    pub fn qualified_type_name(&self, name: &str) -> String {
        type_name(&[name, self.key.view_id.as_str(), self.key.display_id.as_str()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        let names = DisplayNames::new(&ViewDisplayKey::new("blog", "list"), None);

        assert_eq!(names.query_name(), "blogListView");
        assert_eq!(names.result_type_name(), "BlogListViewResult");
        assert_eq!(names.row_type_name(), "BlogListViewRow");
        assert_eq!(names.filter_input_name(), "BlogListViewFilterInput");
        assert_eq!(names.sort_by_enum_name(), "BlogListViewSortBy");
        assert_eq!(
            names.contextual_filter_input_name(),
            "BlogListViewContextualFilterInput"
        );
        assert_eq!(
            names.contextual_filter_input_id(),
            "blog_list_view_contextual_filter_input"
        );
    }

    #[test]
    fn query_name_override() {
        let names = DisplayNames::new(
            &ViewDisplayKey::new("content_recent", "graphql_1"),
            Some("recent_posts"),
        );

        assert_eq!(names.query_name(), "recentPosts");
        assert_eq!(names.result_type_name(), "RecentPostsResult");
        assert_eq!(names.row_type_name(), "RecentPostsRow");
        assert_eq!(names.filter_input_name(), "RecentPostsFilterInput");
        // Not affected by the override
        assert_eq!(names.sort_by_enum_name(), "ContentRecentGraphql1ViewSortBy");
        assert_eq!(
            names.qualified_field_name("recentPosts"),
            "recentPostsContentRecentGraphql1"
        );
    }

    #[test]
    fn entity_names() {
        assert_eq!(entity_type_name("node"), "Node");
        assert_eq!(bundle_type_name("node", "page"), "NodePage");
        assert_eq!(bundle_type_name("taxonomy_term", "tags"), "TaxonomyTermTags");
        assert_eq!(
            field_item_type_name("node", "field_related"),
            "FieldNodeFieldRelated"
        );
    }
}
