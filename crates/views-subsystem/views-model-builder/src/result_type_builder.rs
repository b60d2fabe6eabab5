// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use core_model::types::FieldType;
use indexmap::IndexMap;
use views_model::{
    cache::CacheMetadata,
    derived::{COUNT_FIELD, DerivedField, DerivedFieldKind, RESULTS_FIELD},
    types::{ObjectTypeKind, VIEW_RESULT_UNION, VIEW_UNION, ViewObjectType, ViewUnionType},
};

use crate::{resolved_builder::ResolvedDisplay, system_builder::SystemContextBuilding};

/// Build the result types, the unions they belong to and the table resolving a view result to
/// its type
pub fn build_shallow(resolved: &[ResolvedDisplay], building: &mut SystemContextBuilding) {
    for display in resolved {
        building.object_types.add(
            &display.result_type,
            ViewObjectType {
                id: display.key.derived_id("result"),
                name: display.result_type.clone(),
                kind: ObjectTypeKind::Result,
                key: display.key.clone(),
            },
        );

        building
            .type_resolver
            .register(display.key.clone(), &display.result_type);
    }

    if resolved.is_empty() {
        return;
    }

    let members: Vec<String> = resolved
        .iter()
        .map(|display| display.result_type.clone())
        .collect();

    for union in [VIEW_UNION, VIEW_RESULT_UNION] {
        building.unions.add(
            union,
            ViewUnionType {
                name: union.to_string(),
                members: members.clone(),
            },
        );
    }
}

/// Build the `results` and `count` fields of the result types
pub fn build_expanded(resolved: &[ResolvedDisplay], building: &mut SystemContextBuilding) {
    for display in resolved {
        let results = result_field(
            display,
            DerivedFieldKind::ResultList,
            RESULTS_FIELD,
            FieldType::optional_list(&display.row_type),
        );
        building.fields.add(&results.id.clone(), results);

        if display.paged {
            let count = result_field(
                display,
                DerivedFieldKind::ResultCount,
                COUNT_FIELD,
                FieldType::plain("Int"),
            );
            building.fields.add(&count.id.clone(), count);
        }
    }
}

fn result_field(
    display: &ResolvedDisplay,
    kind: DerivedFieldKind,
    name: &str,
    return_type: FieldType,
) -> DerivedField {
    DerivedField {
        id: display.key.derived_id(&kind.id_suffix()),
        name: name.to_string(),
        return_type,
        parents: vec![display.result_type.clone()],
        arguments: IndexMap::new(),
        paged: display.paged,
        // Read from the resolved result, whose cache metadata was collected by the view field
        cache: CacheMetadata::default(),
        key: display.key.clone(),
        kind,
        arguments_info: vec![],
        description: None,
    }
}
