// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::fmt::Display;

use async_graphql_value::{ConstValue, Name};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub enum ValNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl ValNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            ValNumber::I64(n) => *n as f64,
            ValNumber::U64(n) => *n as f64,
            ValNumber::F64(n) => *n,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ValNumber::I64(n) => Some(*n),
            ValNumber::U64(n) => i64::try_from(*n).ok(),
            ValNumber::F64(_) => None,
        }
    }
}

impl Display for ValNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValNumber::I64(n) => write!(f, "{n}"),
            ValNumber::U64(n) => write!(f, "{n}"),
            ValNumber::F64(n) => write!(f, "{n}"),
        }
    }
}

impl From<serde_json::Number> for ValNumber {
    fn from(value: serde_json::Number) -> Self {
        if let Some(n) = value.as_i64() {
            ValNumber::I64(n)
        } else if let Some(n) = value.as_u64() {
            ValNumber::U64(n)
        } else {
            // Without arbitrary precision every JSON number fits one of the three
            ValNumber::F64(value.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl From<i64> for ValNumber {
    fn from(value: i64) -> Self {
        ValNumber::I64(value)
    }
}

impl From<u64> for ValNumber {
    fn from(value: u64) -> Self {
        ValNumber::U64(value)
    }
}

impl From<f64> for ValNumber {
    fn from(value: f64) -> Self {
        ValNumber::F64(value)
    }
}

/// Represent a value that can be used in:
/// - field arguments (filter values, contextual filter values)
/// - configured filter values
/// - rows returned by a query backend
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Val {
    Bool(bool),
    Number(ValNumber),
    String(String),
    List(Vec<Val>),
    Object(IndexMap<String, Val>),
    Enum(String),
    #[default]
    Null,
}

#[derive(Error, Debug, PartialEq)]
pub enum ValError {
    #[error("Binary values are not supported")]
    Binary,
    #[error("Expected a scalar value, found {0}")]
    NotScalar(String),
}

impl Val {
    pub fn get(&self, key: &str) -> Option<&Val> {
        match self {
            Val::Object(o) => o.get(key),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Val::String(s) | Val::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Val::Number(n) => n.as_i64(),
            Val::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Val::Null)
    }

    /// A value counts as "empty" when it is null, an empty string, or an empty collection.
    pub fn is_empty(&self) -> bool {
        match self {
            Val::Null => true,
            Val::String(s) => s.is_empty(),
            Val::List(l) => l.is_empty(),
            Val::Object(o) => o.is_empty(),
            _ => false,
        }
    }

    /// Render a scalar as the string form used for positional (contextual) arguments.
    pub fn to_contextual_string(&self) -> Result<String, ValError> {
        match self {
            Val::Bool(b) => Ok(b.to_string()),
            Val::Number(n) => Ok(n.to_string()),
            Val::String(s) | Val::Enum(s) => Ok(s.clone()),
            Val::Null => Ok(String::new()),
            Val::List(_) | Val::Object(_) => Err(ValError::NotScalar(self.to_string())),
        }
    }

    /// GraphQL form of the value, used for argument default values in schema definitions.
    pub fn to_const_value(&self) -> ConstValue {
        match self {
            Val::Null => ConstValue::Null,
            Val::Bool(b) => ConstValue::Boolean(*b),
            Val::Number(n) => match serde_json::Value::from(Val::Number(n.clone())) {
                serde_json::Value::Number(n) => ConstValue::Number(n),
                _ => ConstValue::Null,
            },
            Val::String(s) => ConstValue::String(s.clone()),
            Val::Enum(e) => ConstValue::Enum(Name::new(e)),
            Val::List(l) => ConstValue::List(l.iter().map(Val::to_const_value).collect()),
            Val::Object(o) => ConstValue::Object(
                o.iter()
                    .map(|(k, v)| (Name::new(k), v.to_const_value()))
                    .collect(),
            ),
        }
    }
}

impl Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Val::Bool(b) => write!(f, "{b}"),
            Val::Number(n) => write!(f, "{n}"),
            Val::String(s) => write!(f, "\"{s}\""),
            Val::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Val::Object(o) => {
                write!(f, "{{")?;
                for (i, (k, v)) in o.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Val::Enum(e) => write!(f, "{e}"),
            Val::Null => write!(f, "null"),
        }
    }
}

impl From<Val> for serde_json::Value {
    fn from(value: Val) -> Self {
        match value {
            Val::Null => serde_json::Value::Null,
            Val::Bool(b) => serde_json::Value::Bool(b),
            Val::Number(n) => match n {
                ValNumber::I64(n) => serde_json::Value::from(n),
                ValNumber::U64(n) => serde_json::Value::from(n),
                // Non-finite floats have no JSON form
                ValNumber::F64(n) => serde_json::Number::from_f64(n)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            },
            Val::String(s) | Val::Enum(s) => serde_json::Value::String(s),
            Val::List(l) => serde_json::Value::Array(l.into_iter().map(Into::into).collect()),
            Val::Object(o) => serde_json::Value::Object(
                o.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Val {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Val::Null,
            serde_json::Value::Bool(b) => Val::Bool(b),
            serde_json::Value::Number(n) => Val::Number(n.into()),
            serde_json::Value::String(s) => Val::String(s),
            serde_json::Value::Array(l) => Val::List(l.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(o) => {
                Val::Object(o.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl TryFrom<ConstValue> for Val {
    type Error = ValError;

    fn try_from(value: ConstValue) -> Result<Self, Self::Error> {
        match value {
            ConstValue::Null => Ok(Val::Null),
            ConstValue::Boolean(b) => Ok(Val::Bool(b)),
            ConstValue::Number(n) => Ok(Val::Number(n.into())),
            ConstValue::String(s) => Ok(Val::String(s)),
            ConstValue::List(l) => Ok(Val::List(
                l.into_iter()
                    .map(Val::try_from)
                    .collect::<Result<_, _>>()?,
            )),
            ConstValue::Object(o) => Ok(Val::Object(
                o.into_iter()
                    .map(|(k, v)| Ok((k.to_string(), Val::try_from(v)?)))
                    .collect::<Result<_, _>>()?,
            )),
            ConstValue::Binary(_) => Err(ValError::Binary),
            ConstValue::Enum(e) => Ok(Val::Enum(e.to_string())),
        }
    }
}

impl From<&str> for Val {
    fn from(value: &str) -> Self {
        Val::String(value.to_string())
    }
}

impl From<String> for Val {
    fn from(value: String) -> Self {
        Val::String(value)
    }
}

impl From<i64> for Val {
    fn from(value: i64) -> Self {
        Val::Number(ValNumber::I64(value))
    }
}

impl From<bool> for Val {
    fn from(value: bool) -> Self {
        Val::Bool(value)
    }
}
