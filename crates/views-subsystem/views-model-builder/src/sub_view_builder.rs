// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use core_model::types::FieldType;
use views_model::derived::{DerivedField, DerivedFieldKind};

use crate::{
    argument_builder, resolved_builder::ResolvedDisplay, system_builder::SystemContextBuilding,
};

/// Build the field executing a display with its single contextual argument taken from the parent
/// entity
pub fn build(resolved: &[ResolvedDisplay], building: &mut SystemContextBuilding) {
    for display in resolved {
        let Some(sub_view) = &display.sub_view else {
            continue;
        };

        let kind = DerivedFieldKind::SubView;

        let field = DerivedField {
            id: display.key.derived_id(&kind.id_suffix()),
            name: display.field_name.clone(),
            return_type: FieldType::optional(&display.result_type),
            parents: sub_view.parents.clone(),
            arguments: argument_builder::sub_view_arguments(display),
            paged: display.paged,
            cache: display.cache.clone(),
            key: display.key.clone(),
            kind,
            arguments_info: display.arguments_info.clone(),
            description: Some(format!(
                "Results of the {} view display for this {}",
                display.key, sub_view.entity_type
            )),
        };

        building.fields.add(&field.id.clone(), field);
    }
}
