// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::Display;

use async_graphql_parser::types::{BaseType, Type};
use async_graphql_value::Name;
use serde::{Deserialize, Serialize};

/// The GraphQL type of a field or argument, referring to other types by name.
///
/// `Plain` is non-null; wrap it in `Optional` to make it nullable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Plain(String),
    Optional(Box<FieldType>),
    List(Box<FieldType>),
}

impl FieldType {
    pub fn plain(name: impl Into<String>) -> Self {
        FieldType::Plain(name.into())
    }

    pub fn optional(name: impl Into<String>) -> Self {
        FieldType::Optional(Box::new(FieldType::Plain(name.into())))
    }

    /// A nullable list of nullable elements, such as `[NodePage]`
    pub fn optional_list(name: impl Into<String>) -> Self {
        FieldType::Optional(Box::new(FieldType::List(Box::new(FieldType::optional(
            name,
        )))))
    }

    /// Name of the innermost type
    pub fn name(&self) -> &str {
        match self {
            FieldType::Plain(name) => name,
            FieldType::Optional(underlying) | FieldType::List(underlying) => underlying.name(),
        }
    }

    pub fn to_graphql_type(&self) -> Type {
        match self {
            FieldType::Plain(name) => Type {
                base: BaseType::Named(Name::new(name)),
                nullable: false,
            },
            FieldType::Optional(underlying) => Type {
                nullable: true,
                ..underlying.to_graphql_type()
            },
            FieldType::List(underlying) => Type {
                base: BaseType::List(Box::new(underlying.to_graphql_type())),
                nullable: false,
            },
        }
    }

    /// Parse an SDL type reference such as `String`, `Int!` or `[String]`
    pub fn from_sdl(sdl: &str) -> Option<Self> {
        Type::new(sdl.trim()).map(|typ| Self::from_graphql_type(&typ))
    }

    fn from_graphql_type(typ: &Type) -> Self {
        let non_null = match &typ.base {
            BaseType::Named(name) => FieldType::Plain(name.to_string()),
            BaseType::List(underlying) => {
                FieldType::List(Box::new(Self::from_graphql_type(underlying)))
            }
        };

        if typ.nullable {
            FieldType::Optional(Box::new(non_null))
        } else {
            non_null
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_graphql_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sdl() {
        assert_eq!(FieldType::plain("Int").to_string(), "Int!");
        assert_eq!(FieldType::optional("String").to_string(), "String");
        assert_eq!(FieldType::optional_list("NodePage").to_string(), "[NodePage]");
        assert_eq!(
            FieldType::List(Box::new(FieldType::plain("ID"))).to_string(),
            "[ID!]!"
        );
    }

    #[test]
    fn parses_sdl() {
        assert_eq!(
            FieldType::from_sdl("[String]"),
            Some(FieldType::optional_list("String"))
        );
        assert_eq!(FieldType::from_sdl("Int!"), Some(FieldType::plain("Int")));
        assert_eq!(FieldType::from_sdl("[Bad"), None);
        assert_eq!(FieldType::from_sdl("[Tag!]").map(|t| t.name().to_string()), Some("Tag".to_string()));
    }
}
