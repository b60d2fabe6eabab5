// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexSet;
use tracing::warn;
use views_model::{
    capability::exposed_sorts,
    types::{EnumValue, SORT_DIRECTION_ENUM, ViewEnumType},
};

use crate::{resolved_builder::ResolvedDisplay, system_builder::SystemContextBuilding};

pub fn build(resolved: &[ResolvedDisplay], building: &mut SystemContextBuilding) {
    for display in resolved {
        if let Some(name) = &display.sort_by_enum {
            building.enums.add(name, sort_by_enum(display, name));
        }
    }

    if resolved.iter().any(|display| display.sort_by_enum.is_some()) {
        add_sort_direction_enum(building);
    }
}

/// The shared `ViewSortDirection` enum; adding it again keeps the existing one
pub fn add_sort_direction_enum(building: &mut SystemContextBuilding) {
    building
        .enums
        .add(SORT_DIRECTION_ENUM, sort_direction_enum());
}

fn sort_by_enum(resolved: &ResolvedDisplay, name: &str) -> ViewEnumType {
    let mut symbols = IndexSet::new();

    let values = exposed_sorts(resolved.display)
        .into_iter()
        .filter_map(|(id, label)| {
            let symbol = enum_symbol(id);
            if !symbols.insert(symbol.clone()) {
                let key = &resolved.key;
                warn!("Sort '{id}' of {key} maps to the enum value {symbol} of another sort; ignoring it");
                return None;
            }

            Some(EnumValue {
                symbol,
                value: id.to_string(),
                description: Some(label.to_string()),
            })
        })
        .collect();

    ViewEnumType {
        name: name.to_string(),
        description: None,
        values,
        key: Some(resolved.key.clone()),
    }
}

fn sort_direction_enum() -> ViewEnumType {
    ViewEnumType {
        name: SORT_DIRECTION_ENUM.to_string(),
        description: Some("Sort direction of a view".to_string()),
        values: vec![
            EnumValue {
                symbol: "ASC".to_string(),
                value: "asc".to_string(),
                description: Some("Ascending".to_string()),
            },
            EnumValue {
                symbol: "DESC".to_string(),
                value: "desc".to_string(),
                description: Some("Descending".to_string()),
            },
        ],
        key: None,
    }
}

/// Upper-cased sort id, with characters not allowed in enum values replaced by `_`
fn enum_symbol(sort_id: &str) -> String {
    let symbol: String = sort_id
        .chars()
        .map(|c| match c.to_ascii_uppercase() {
            c @ ('A'..='Z' | '0'..='9' | '_') => c,
            _ => '_',
        })
        .collect();

    if symbol.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{symbol}")
    } else {
        symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_symbols() {
        assert_eq!(enum_symbol("title"), "TITLE");
        assert_eq!(enum_symbol("nid"), "NID");
        assert_eq!(enum_symbol("created-date"), "CREATED_DATE");
        assert_eq!(enum_symbol("1st"), "_1ST");
    }
}
