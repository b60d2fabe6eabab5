// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{
    Pos, Positioned,
    types::{FieldDefinition, InputValueDefinition, Type, TypeDefinition},
};
use async_graphql_value::{ConstValue, Name};

pub trait FieldDefinitionProvider<S> {
    fn field_definition(&self, system: &S) -> FieldDefinition;
}

pub trait TypeDefinitionProvider<S> {
    fn type_definition(&self, system: &S) -> TypeDefinition;
}

pub trait InputValueProvider {
    fn input_value(&self) -> InputValueDefinition;
}

pub fn default_positioned<T>(value: T) -> Positioned<T> {
    Positioned::new(value, Pos::default())
}

pub fn default_positioned_name(value: &str) -> Positioned<Name> {
    default_positioned(Name::new(value))
}

pub fn default_positioned_description(value: Option<&str>) -> Option<Positioned<String>> {
    value.map(|d| default_positioned(d.to_string()))
}

/// Introspection parameter such as `page: Int = 0` or `sortBy: BlogListViewSortBy`
pub trait Parameter {
    /// Name of the parameter such as `page` or `sortBy`
    fn name(&self) -> &str;
    /// Type of the parameter such as `Int` or `ViewSortDirection`
    fn typ(&self) -> Type;
    fn default_value(&self) -> Option<ConstValue> {
        None
    }
    fn description(&self) -> Option<&str> {
        None
    }
}

impl<T: Parameter + ?Sized> InputValueProvider for T {
    fn input_value(&self) -> InputValueDefinition {
        InputValueDefinition {
            description: default_positioned_description(self.description()),
            name: default_positioned_name(self.name()),
            ty: default_positioned(self.typ()),
            default_value: self.default_value().map(default_positioned),
            directives: vec![],
        }
    }
}

pub trait Operation {
    fn name(&self) -> &str;
    fn parameters(&self) -> Vec<&dyn Parameter>;
    fn return_type(&self) -> Type;
    fn description(&self) -> Option<&str> {
        None
    }
}

// Field definition such as `blogListView(page: Int = 0, pageSize: Int = 2): BlogListViewResult`.
// Combining such fields forms the Query type and the extensions of entity types.
impl<T: Operation, S> FieldDefinitionProvider<S> for T {
    fn field_definition(&self, _system: &S) -> FieldDefinition {
        let arguments = self
            .parameters()
            .into_iter()
            .map(|parameter| default_positioned(parameter.input_value()))
            .collect();

        FieldDefinition {
            description: default_positioned_description(self.description()),
            name: default_positioned_name(self.name()),
            arguments,
            directives: vec![],
            ty: default_positioned(self.return_type()),
        }
    }
}
