// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use core_model::types::FieldType;
use indexmap::IndexSet;
use views_model::{
    capability::exposed_filters,
    types::{FILTER_VALUE_SCALAR, InputField, ViewInputType, ViewScalarType},
};

use crate::{resolved_builder::ResolvedDisplay, system_builder::SystemContextBuilding};

/// Build the contextual filter and filter input types
pub fn build(resolved: &[ResolvedDisplay], building: &mut SystemContextBuilding) {
    for display in resolved {
        if let Some(name) = &display.contextual_input {
            let input = contextual_filter_input(display, name);
            building.input_types.add(&input.id.clone(), input);
        }

        if let Some(name) = &display.filter_input {
            let input = filter_input(display, name);
            building.input_types.add(&input.id.clone(), input);
        }
    }

    if resolved.iter().any(|display| display.filter_input.is_some()) {
        add_filter_value_scalar(building);
    }
}

/// The untyped `ViewFilterValue` scalar
pub fn add_filter_value_scalar(building: &mut SystemContextBuilding) {
    building.scalars.add(
        FILTER_VALUE_SCALAR,
        ViewScalarType {
            name: FILTER_VALUE_SCALAR.to_string(),
            description: Some(
                "Untyped view argument value: a string, a list or an object".to_string(),
            ),
        },
    );
}

/// One nullable `String` per contextual argument, in argument order
fn contextual_filter_input(display: &ResolvedDisplay, name: &str) -> ViewInputType {
    let fields = unique(display.display.arguments.iter().map(|a| a.id.as_str()))
        .map(|id| InputField {
            name: id.to_string(),
            typ: FieldType::optional("String"),
        })
        .collect();

    ViewInputType {
        id: display.names.contextual_filter_input_id(),
        name: name.to_string(),
        fields,
        key: display.key.clone(),
    }
}

fn filter_input(display: &ResolvedDisplay, name: &str) -> ViewInputType {
    let fields = unique(exposed_filters(display.display).map(|f| f.identifier()))
        .map(|identifier| InputField {
            name: identifier.to_string(),
            typ: FieldType::optional(FILTER_VALUE_SCALAR),
        })
        .collect();

    ViewInputType {
        id: display.key.derived_id("filter-input"),
        name: name.to_string(),
        fields,
        key: display.key.clone(),
    }
}

fn unique<'a>(names: impl Iterator<Item = &'a str>) -> impl Iterator<Item = &'a str> {
    names.collect::<IndexSet<_>>().into_iter()
}
