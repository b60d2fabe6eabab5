// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Capabilities of a display that depend on its configuration alone.
//!
//! Used both while deriving the schema and while translating arguments at request time.

use indexmap::IndexMap;

use crate::display::{ArgumentOption, DisplayConfig, FilterOption, PagerType};

const ENTITY_VALIDATION_PREFIX: &str = "entity:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PagerDefaults {
    pub offset: i64,
    pub limit: i64,
}

/// Only full and mini pagers accept a page and a page size.
pub fn is_paged(display: &DisplayConfig) -> bool {
    matches!(display.pager.pager_type, PagerType::Full | PagerType::Mini)
}

pub fn pager_defaults(display: &DisplayConfig) -> PagerDefaults {
    PagerDefaults {
        offset: display.pager.offset.unwrap_or(0),
        limit: display.pager.items_per_page.unwrap_or(0),
    }
}

/// Exposed sorts as `sort id -> label`, in configuration order.
pub fn exposed_sorts(display: &DisplayConfig) -> IndexMap<&str, &str> {
    display
        .sorts
        .iter()
        .filter(|sort| sort.exposed)
        .map(|sort| (sort.id.as_str(), sort.label()))
        .collect()
}

pub fn exposed_filters(display: &DisplayConfig) -> impl Iterator<Item = &FilterOption> {
    display.filters.iter().filter(|filter| filter.exposed)
}

/// Target entity type of an `entity:<type>` validation.
///
/// `Ok(None)` for other validation types (or none); `Err` with the offending validation type when
/// the target is missing.
pub fn entity_validation_target(argument: &ArgumentOption) -> Result<Option<&str>, &str> {
    match argument.validate_type.as_deref() {
        Some(validate_type) => match validate_type.strip_prefix(ENTITY_VALIDATION_PREFIX) {
            Some(target) if target.trim().is_empty() => Err(validate_type),
            Some(target) => Ok(Some(target.trim())),
            None => Ok(None),
        },
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{PagerConfig, SortOption};

    fn display_with_pager(pager_type: PagerType) -> DisplayConfig {
        DisplayConfig {
            pager: PagerConfig {
                pager_type,
                offset: Some(2),
                items_per_page: Some(3),
            },
            ..Default::default()
        }
    }

    #[test]
    fn paging() {
        assert!(is_paged(&display_with_pager(PagerType::Full)));
        assert!(is_paged(&display_with_pager(PagerType::Mini)));
        assert!(!is_paged(&display_with_pager(PagerType::Some)));
        assert!(!is_paged(&display_with_pager(PagerType::None)));

        assert_eq!(
            pager_defaults(&display_with_pager(PagerType::Full)),
            PagerDefaults {
                offset: 2,
                limit: 3
            }
        );
        assert_eq!(pager_defaults(&DisplayConfig::default()), PagerDefaults::default());
    }

    #[test]
    fn only_exposed_sorts() {
        let display = DisplayConfig {
            sorts: vec![
                SortOption {
                    id: "title".to_string(),
                    exposed: true,
                    label: Some("Title".to_string()),
                },
                SortOption {
                    id: "created".to_string(),
                    exposed: false,
                    label: None,
                },
                SortOption {
                    id: "nid".to_string(),
                    exposed: true,
                    label: None,
                },
            ],
            ..Default::default()
        };

        let sorts = exposed_sorts(&display);
        assert_eq!(
            sorts.into_iter().collect::<Vec<_>>(),
            vec![("title", "Title"), ("nid", "nid")]
        );
    }

    #[test]
    fn entity_validation() {
        let argument = |validate_type: Option<&str>| ArgumentOption {
            id: "nid".to_string(),
            validate_type: validate_type.map(str::to_string),
            ..Default::default()
        };

        assert_eq!(
            entity_validation_target(&argument(Some("entity:node"))),
            Ok(Some("node"))
        );
        assert_eq!(entity_validation_target(&argument(Some("numeric"))), Ok(None));
        assert_eq!(entity_validation_target(&argument(None)), Ok(None));
        assert_eq!(
            entity_validation_target(&argument(Some("entity:"))),
            Err("entity:")
        );
    }
}
