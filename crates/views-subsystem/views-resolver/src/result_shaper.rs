// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use common::value::Val;
use views_model::{
    cache::CacheMetadata, derived::ViewDisplayKey, subsystem::ViewsSubsystem,
};

use crate::{backend::BackendResult, error::ViewExecutionError};

/// The outcome of executing a view display, from which the fields of its result type are read.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedViewResult {
    pub key: ViewDisplayKey,
    pub rows: Vec<Val>,
    pub total_count: Option<i64>,
    pub cache: CacheMetadata,
}

impl ResolvedViewResult {
    pub fn from_backend(key: ViewDisplayKey, result: BackendResult) -> Self {
        Self {
            key,
            rows: result.rows,
            total_count: result.total_rows,
            cache: result.cache.without_url_contexts(),
        }
    }

    pub fn results(&self) -> &[Val] {
        &self.rows
    }

    /// The total row count, which backends must report for paged displays
    pub fn count(&self, field_id: &str) -> Result<i64, ViewExecutionError> {
        self.total_count
            .ok_or_else(|| ViewExecutionError::MissingCount {
                field: field_id.to_string(),
            })
    }

    /// The concrete type of this result within the `View` and `ViewResult` unions
    pub fn type_name<'a>(&self, subsystem: &'a ViewsSubsystem) -> Option<&'a str> {
        subsystem
            .type_resolver
            .resolve(&self.key.view_id, &self.key.display_id)
    }
}

/// Value of a field-row field, read from the row under the field's alias
pub fn row_field(row: &Val, alias: &str) -> Option<Val> {
    row.get(alias).filter(|value| !value.is_null()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use views_model::cache::MaxAge;

    #[test]
    fn strips_url_contexts_and_reads_count() {
        let result = ResolvedViewResult::from_backend(
            ViewDisplayKey::new("blog", "list"),
            BackendResult {
                rows: vec![Val::from("A")],
                total_rows: None,
                cache: CacheMetadata::new(
                    ["node_list"],
                    ["url", "url.path", "user.roles", "urlish"],
                    MaxAge::Seconds(10),
                ),
            },
        );

        assert_eq!(
            result.cache.contexts.iter().collect::<Vec<_>>(),
            vec!["user.roles", "urlish"]
        );
        assert_eq!(result.cache.tags.iter().collect::<Vec<_>>(), vec!["node_list"]);
        assert!(matches!(
            result.count("blog-list-result-count"),
            Err(ViewExecutionError::MissingCount { field }) if field == "blog-list-result-count"
        ));
    }

    #[test]
    fn row_fields_by_alias() {
        let row: Val = serde_json::from_value(json!({"heading": "Hello", "image": null})).unwrap();

        assert_eq!(row_field(&row, "heading"), Some(Val::from("Hello")));
        assert_eq!(row_field(&row, "image"), None);
        assert_eq!(row_field(&row, "missing"), None);
    }
}
