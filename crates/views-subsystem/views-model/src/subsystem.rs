// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{
    FieldDefinition, InterfaceType, ObjectType, TypeDefinition, TypeKind,
};
use core_model::{
    mapped_arena::MappedArena,
    type_normalization::{
        FieldDefinitionProvider, TypeDefinitionProvider, default_positioned,
        default_positioned_name,
    },
};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{
    derived::{DerivedField, DerivedFieldKind, ROOT_PARENT, ViewDisplayKey},
    display::DisplayConfig,
    reference::ViewReferenceField,
    type_resolution::TypeResolver,
    types::{ViewEnumType, ViewInputType, ViewObjectType, ViewScalarType, ViewUnionType},
};

/// A display that made it into the schema, kept for request-time argument translation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ExposedDisplay {
    pub key: ViewDisplayKey,
    pub config: DisplayConfig,
}

/// A view display excluded from the schema because its configuration could not be derived.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BuildDiagnostic {
    pub key: ViewDisplayKey,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ViewsSubsystem {
    pub fields: MappedArena<DerivedField>,
    pub enums: MappedArena<ViewEnumType>,
    pub input_types: MappedArena<ViewInputType>,
    pub object_types: MappedArena<ViewObjectType>,
    pub unions: MappedArena<ViewUnionType>,
    pub scalars: MappedArena<ViewScalarType>,
    pub type_resolver: TypeResolver,
    pub displays: MappedArena<ExposedDisplay>,
    pub view_references: MappedArena<ViewReferenceField>,
    /// Parent names that are entity interfaces (such as `Node`) rather than object types
    pub interface_parents: Vec<String>,
    pub diagnostics: Vec<BuildDiagnostic>,
}

impl ViewsSubsystem {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, id: &str) -> Option<&DerivedField> {
        self.fields.get_by_key(id)
    }

    pub fn display(&self, key: &ViewDisplayKey) -> Option<&DisplayConfig> {
        self.displays
            .get_by_key(&key.to_string())
            .map(|display| &display.config)
    }

    pub fn fields_for_parent<'a>(
        &'a self,
        parent: &'a str,
    ) -> impl Iterator<Item = &'a DerivedField> + 'a {
        self.fields
            .iter()
            .map(|(_, field)| field)
            .filter(move |field| field.is_attached_to(parent))
    }

    /// The field a GraphQL executor dispatches to for `parent.name`
    pub fn field_for<'a>(&'a self, parent: &'a str, name: &str) -> Option<&'a DerivedField> {
        self.fields_for_parent(parent).find(|field| field.name == name)
    }

    pub fn view_reference_for<'a>(
        &'a self,
        parent: &str,
        name: &str,
    ) -> Option<&'a ViewReferenceField> {
        self.view_references
            .iter()
            .map(|(_, reference)| reference)
            .find(|reference| reference.parent == parent && reference.name == name)
    }

    /// `reference` bound to the display an item refers to, if that display is exposed
    pub fn bind_view_reference(
        &self,
        reference: &ViewReferenceField,
        key: &ViewDisplayKey,
    ) -> Option<DerivedField> {
        let display = self.display(key)?;
        let view_field = self.field(&key.derived_id(&DerivedFieldKind::View.id_suffix()))?;

        Some(reference.bind(view_field, display))
    }

    /// Parents defined outside this subsystem (entity types, interfaces and views-reference item
    /// types), in first-use order.
    pub fn external_parents(&self) -> Vec<&str> {
        let parents: IndexSet<&str> = self
            .fields
            .iter()
            .flat_map(|(_, field)| field.parents.iter().map(String::as_str))
            .filter(|parent| *parent != ROOT_PARENT && !self.object_types.contains_key(parent))
            .chain(
                self.view_references
                    .iter()
                    .map(|(_, reference)| reference.parent.as_str()),
            )
            .collect();

        parents.into_iter().collect()
    }

    pub fn schema_queries(&self) -> Vec<FieldDefinition> {
        self.fields_for_parent(ROOT_PARENT)
            .map(|field| field.field_definition(self))
            .collect()
    }

    pub fn schema_types(&self) -> Vec<TypeDefinition> {
        let mut all_type_definitions = vec![];

        self.scalars
            .iter()
            .for_each(|(_, typ)| all_type_definitions.push(typ.type_definition(self)));

        self.enums
            .iter()
            .for_each(|(_, typ)| all_type_definitions.push(typ.type_definition(self)));

        self.input_types
            .iter()
            .for_each(|(_, typ)| all_type_definitions.push(typ.type_definition(self)));

        self.object_types
            .iter()
            .for_each(|(_, typ)| all_type_definitions.push(typ.type_definition(self)));

        self.unions
            .iter()
            .for_each(|(_, typ)| all_type_definitions.push(typ.type_definition(self)));

        all_type_definitions
    }

    /// `extend type NodePage { ... }` (or `extend interface Node { ... }`) for every entity
    /// parent that views attach fields to.
    pub fn schema_type_extensions(&self) -> Vec<TypeDefinition> {
        self.external_parents()
            .into_iter()
            .map(|parent| {
                let fields = self
                    .fields_for_parent(parent)
                    .map(|field| default_positioned(field.field_definition(self)))
                    .chain(
                        self.view_references
                            .iter()
                            .filter(|(_, reference)| reference.parent == parent)
                            .map(|(_, reference)| {
                                default_positioned(reference.field_definition(self))
                            }),
                    )
                    .collect();

                let kind = if self.interface_parents.iter().any(|i| i == parent) {
                    TypeKind::Interface(InterfaceType {
                        implements: vec![],
                        fields,
                    })
                } else {
                    TypeKind::Object(ObjectType {
                        implements: vec![],
                        fields,
                    })
                };

                TypeDefinition {
                    extend: true,
                    description: None,
                    name: default_positioned_name(parent),
                    directives: vec![],
                    kind,
                }
            })
            .collect()
    }
}
