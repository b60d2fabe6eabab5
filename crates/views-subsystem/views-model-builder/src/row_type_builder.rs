// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexMap;
use views_model::{
    cache::CacheMetadata,
    derived::{DerivedField, DerivedFieldKind},
    types::{ObjectTypeKind, ViewObjectType},
};

use crate::{resolved_builder::ResolvedDisplay, system_builder::SystemContextBuilding};

/// Build the row types of field-row displays
pub fn build_shallow(resolved: &[ResolvedDisplay], building: &mut SystemContextBuilding) {
    for display in resolved.iter().filter(|display| display.has_row_type()) {
        building.object_types.add(
            &display.row_type,
            ViewObjectType {
                id: display.key.derived_id("row"),
                name: display.row_type.clone(),
                kind: ObjectTypeKind::Row,
                key: display.key.clone(),
            },
        );
    }
}

/// Build one field per field handler, named by its alias
pub fn build_expanded(resolved: &[ResolvedDisplay], building: &mut SystemContextBuilding) {
    for display in resolved.iter().filter(|display| display.has_row_type()) {
        for row_field in &display.row_fields {
            let kind = DerivedFieldKind::RowField {
                field: row_field.field.clone(),
                alias: row_field.alias.clone(),
            };

            let field = DerivedField {
                id: display.key.derived_id(&kind.id_suffix()),
                name: row_field.alias.clone(),
                return_type: row_field.typ.clone(),
                parents: vec![display.row_type.clone()],
                arguments: IndexMap::new(),
                paged: false,
                cache: CacheMetadata::default(),
                key: display.key.clone(),
                kind,
                arguments_info: vec![],
                description: None,
            };

            building.fields.add(&field.id.clone(), field);
        }
    }
}
