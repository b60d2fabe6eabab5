// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use common::value::Val;
use indexmap::IndexMap;
use tracing::{debug, warn};
use views_model::{
    derived::{
        ArgSpec, CONTEXTUAL_FILTER_ARG, FILTER_ARG, PAGE_ARG, PAGE_SIZE_ARG, SORT_BY_ARG,
        SORT_DIRECTION_ARG,
    },
    reference::{VIEW_REFERENCE_FIELD, ViewReferenceField, ViewReferenceFieldInfo},
    types::{FILTER_VALUE_SCALAR, SORT_DIRECTION_ENUM},
};

use crate::{
    argument_builder::DEFAULT_SORT_DIRECTION,
    input_type_builder,
    naming::field_item_type_name,
    resolved_builder::ResolvedDisplay,
    sort_by_type_builder,
    system_builder::{BuildContext, SystemContextBuilding},
};

/// Build the `viewDerivative` field of every views-reference field's items.
///
/// The field returns the `ViewResult` union, so it needs at least one exposed display.
pub fn build(
    context: &BuildContext,
    resolved: &[ResolvedDisplay],
    building: &mut SystemContextBuilding,
) {
    let references = context.store.view_reference_fields();

    if references.is_empty() {
        return;
    }

    if resolved.is_empty() {
        debug!(
            "Skipping {} views-reference fields: no view display is exposed",
            references.len()
        );
        return;
    }

    sort_by_type_builder::add_sort_direction_enum(building);
    input_type_builder::add_filter_value_scalar(building);

    for info in references {
        if context.store.entity_type(&info.entity_type).is_none() {
            warn!(
                "Skipping views-reference field '{}' of unknown entity type '{}'",
                info.field, info.entity_type
            );
            continue;
        }

        let field = view_reference_field(info);
        building.view_references.add(&field.id.clone(), field);
    }
}

fn view_reference_field(info: &ViewReferenceFieldInfo) -> ViewReferenceField {
    // The display is unknown until an item is loaded: everything but the pager is untyped
    let arguments: IndexMap<String, ArgSpec> = [
        ArgSpec::optional(FILTER_ARG, FILTER_VALUE_SCALAR),
        ArgSpec::optional(PAGE_ARG, "Int"),
        ArgSpec::optional(PAGE_SIZE_ARG, "Int"),
        ArgSpec::optional(SORT_BY_ARG, FILTER_VALUE_SCALAR),
        ArgSpec::optional(SORT_DIRECTION_ARG, SORT_DIRECTION_ENUM)
            .with_default(Val::Enum(DEFAULT_SORT_DIRECTION.to_string())),
        ArgSpec::optional(CONTEXTUAL_FILTER_ARG, FILTER_VALUE_SCALAR),
    ]
    .into_iter()
    .map(|argument| (argument.name.clone(), argument))
    .collect();

    ViewReferenceField {
        id: format!("{}-{}-view-reference", info.entity_type, info.field),
        name: VIEW_REFERENCE_FIELD.to_string(),
        parent: field_item_type_name(&info.entity_type, &info.field),
        arguments,
    }
}
