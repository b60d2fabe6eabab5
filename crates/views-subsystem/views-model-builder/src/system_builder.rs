// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{cell::RefCell, collections::HashMap};

use core_model::mapped_arena::MappedArena;
use indexmap::IndexSet;
use tracing::{info, instrument};
use views_model::{
    derived::DerivedField,
    reference::ViewReferenceField,
    subsystem::{BuildDiagnostic, ExposedDisplay, ViewsSubsystem},
    type_resolution::TypeResolver,
    types::{ViewEnumType, ViewInputType, ViewObjectType, ViewScalarType, ViewUnionType},
};

use crate::{
    collision,
    config::DerivationConfig,
    error::ViewDerivationError,
    input_type_builder, reference_builder,
    registry::ViewRegistry,
    resolved_builder::{self, ResolvedDisplay},
    result_type_builder, row_type_builder, sort_by_type_builder,
    store::ConfigStore,
    sub_view_builder, view_field_builder,
};

/// Derive the views subsystem from the configuration in `store`.
///
/// Displays whose configuration cannot be derived are left out and reported in
/// `ViewsSubsystem::diagnostics`. The build itself fails only on name collisions under
/// [`crate::config::CollisionPolicy::Fail`].
#[instrument(name = "views_model_builder::build", skip_all)]
pub fn build(
    store: &dyn ConfigStore,
    config: &DerivationConfig,
) -> Result<ViewsSubsystem, ViewDerivationError> {
    let context = BuildContext::new(store, config);
    let mut building = SystemContextBuilding::default();

    let resolved = resolved_builder::build(&context, &mut building)?;

    build_shallow(&resolved, &mut building);
    build_expanded(&resolved, &mut building, config)?;
    reference_builder::build(&context, &resolved, &mut building);

    info!(
        "Derived {} fields from {} view displays ({} excluded)",
        building.fields.len(),
        resolved.len(),
        building.diagnostics.len()
    );

    Ok(ViewsSubsystem {
        fields: building.fields,
        enums: building.enums,
        input_types: building.input_types,
        object_types: building.object_types,
        unions: building.unions,
        scalars: building.scalars,
        type_resolver: building.type_resolver,
        displays: building.displays,
        view_references: building.view_references,
        interface_parents: building.interface_parents.into_iter().collect(),
        diagnostics: building.diagnostics,
    })
}

/// Build the types: enums, input types, result and row types, unions
fn build_shallow(resolved: &[ResolvedDisplay], building: &mut SystemContextBuilding) {
    for display in resolved {
        building.displays.add(
            &display.key.to_string(),
            ExposedDisplay {
                key: display.key.clone(),
                config: display.display.clone(),
            },
        );
    }

    sort_by_type_builder::build(resolved, building);
    input_type_builder::build(resolved, building);
    result_type_builder::build_shallow(resolved, building);
    row_type_builder::build_shallow(resolved, building);
}

/// Build the fields, then settle field name collisions between displays
fn build_expanded(
    resolved: &[ResolvedDisplay],
    building: &mut SystemContextBuilding,
    config: &DerivationConfig,
) -> Result<(), ViewDerivationError> {
    // View fields go first so that they keep their names when a later field collides
    view_field_builder::build(resolved, building);
    sub_view_builder::build(resolved, building);
    result_type_builder::build_expanded(resolved, building);
    row_type_builder::build_expanded(resolved, building);

    collision::resolve_field_collisions(&mut building.fields, config.collision_policy)
}

#[derive(Debug, Default)]
pub struct SystemContextBuilding {
    pub fields: MappedArena<DerivedField>,
    pub enums: MappedArena<ViewEnumType>,
    pub input_types: MappedArena<ViewInputType>,
    pub object_types: MappedArena<ViewObjectType>,
    pub unions: MappedArena<ViewUnionType>,
    pub scalars: MappedArena<ViewScalarType>,
    pub type_resolver: TypeResolver,
    pub displays: MappedArena<ExposedDisplay>,
    pub view_references: MappedArena<ViewReferenceField>,
    pub interface_parents: IndexSet<String>,
    pub diagnostics: Vec<BuildDiagnostic>,
}

/// Read-only inputs of a build, with lookups memoized for the duration of the build.
pub struct BuildContext<'a> {
    pub store: &'a dyn ConfigStore,
    pub config: &'a DerivationConfig,
    pub registry: ViewRegistry<'a>,
    table_entity_types: RefCell<HashMap<String, Option<String>>>,
}

impl<'a> BuildContext<'a> {
    pub fn new(store: &'a dyn ConfigStore, config: &'a DerivationConfig) -> Self {
        Self {
            store,
            config,
            registry: ViewRegistry::new(store),
            table_entity_types: RefCell::new(HashMap::new()),
        }
    }

    pub fn entity_type_for_table(&self, table: &str) -> Option<String> {
        self.table_entity_types
            .borrow_mut()
            .entry(table.to_string())
            .or_insert_with(|| self.store.entity_type_for_table(table))
            .clone()
    }
}
