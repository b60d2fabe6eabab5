// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{
    EnumType, EnumValueDefinition, InputObjectType, InputValueDefinition, ObjectType, TypeDefinition,
    TypeKind, UnionType,
};
use core_model::{
    type_normalization::{
        FieldDefinitionProvider, TypeDefinitionProvider, default_positioned,
        default_positioned_description, default_positioned_name,
    },
    types::FieldType,
};
use serde::{Deserialize, Serialize};

use crate::{derived::ViewDisplayKey, subsystem::ViewsSubsystem};

pub const SORT_DIRECTION_ENUM: &str = "ViewSortDirection";
pub const FILTER_VALUE_SCALAR: &str = "ViewFilterValue";
pub const VIEW_UNION: &str = "View";
pub const VIEW_RESULT_UNION: &str = "ViewResult";

/// Enum value such as `TITLE` standing for the sort id `title`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub symbol: String,
    pub value: String,
    pub description: Option<String>,
}

/// Sort-by enums (one per display with exposed sorts) and the shared sort direction enum
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViewEnumType {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<EnumValue>,
    /// `None` for shared enums
    pub key: Option<ViewDisplayKey>,
}

impl ViewEnumType {
    pub fn value_of(&self, symbol: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.symbol == symbol)
            .map(|v| v.value.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InputField {
    pub name: String,
    pub typ: FieldType,
}

/// Contextual filter and filter input types
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViewInputType {
    pub id: String,
    pub name: String,
    pub fields: Vec<InputField>,
    pub key: ViewDisplayKey,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectTypeKind {
    /// `<Field>Result` wrapping the rows and the count
    Result,
    /// Row type of a field-row display
    Row,
}

/// Object type whose fields are the derived fields attached to it
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViewObjectType {
    pub id: String,
    pub name: String,
    pub kind: ObjectTypeKind,
    pub key: ViewDisplayKey,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViewUnionType {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViewScalarType {
    pub name: String,
    pub description: Option<String>,
}

impl TypeDefinitionProvider<ViewsSubsystem> for ViewEnumType {
    fn type_definition(&self, _system: &ViewsSubsystem) -> TypeDefinition {
        let values = self
            .values
            .iter()
            .map(|value| {
                default_positioned(EnumValueDefinition {
                    description: default_positioned_description(value.description.as_deref()),
                    value: default_positioned_name(&value.symbol),
                    directives: vec![],
                })
            })
            .collect();

        TypeDefinition {
            extend: false,
            description: default_positioned_description(self.description.as_deref()),
            name: default_positioned_name(&self.name),
            directives: vec![],
            kind: TypeKind::Enum(EnumType { values }),
        }
    }
}

impl TypeDefinitionProvider<ViewsSubsystem> for ViewInputType {
    fn type_definition(&self, _system: &ViewsSubsystem) -> TypeDefinition {
        let fields = self
            .fields
            .iter()
            .map(|field| {
                default_positioned(InputValueDefinition {
                    description: None,
                    name: default_positioned_name(&field.name),
                    ty: default_positioned(field.typ.to_graphql_type()),
                    default_value: None,
                    directives: vec![],
                })
            })
            .collect();

        TypeDefinition {
            extend: false,
            description: None,
            name: default_positioned_name(&self.name),
            directives: vec![],
            kind: TypeKind::InputObject(InputObjectType { fields }),
        }
    }
}

impl TypeDefinitionProvider<ViewsSubsystem> for ViewObjectType {
    fn type_definition(&self, system: &ViewsSubsystem) -> TypeDefinition {
        let fields = system
            .fields_for_parent(&self.name)
            .map(|field| default_positioned(field.field_definition(system)))
            .collect();

        TypeDefinition {
            extend: false,
            description: None,
            name: default_positioned_name(&self.name),
            directives: vec![],
            kind: TypeKind::Object(ObjectType {
                implements: vec![],
                fields,
            }),
        }
    }
}

impl TypeDefinitionProvider<ViewsSubsystem> for ViewUnionType {
    fn type_definition(&self, _system: &ViewsSubsystem) -> TypeDefinition {
        TypeDefinition {
            extend: false,
            description: None,
            name: default_positioned_name(&self.name),
            directives: vec![],
            kind: TypeKind::Union(UnionType {
                members: self
                    .members
                    .iter()
                    .map(|member| default_positioned_name(member))
                    .collect(),
            }),
        }
    }
}

impl TypeDefinitionProvider<ViewsSubsystem> for ViewScalarType {
    fn type_definition(&self, _system: &ViewsSubsystem) -> TypeDefinition {
        TypeDefinition {
            extend: false,
            description: default_positioned_description(self.description.as_deref()),
            name: default_positioned_name(&self.name),
            directives: vec![],
            kind: TypeKind::Scalar,
        }
    }
}
