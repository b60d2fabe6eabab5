// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Translation of GraphQL arguments into [`ExecutionParams`].

use common::value::Val;
use indexmap::IndexMap;
use tracing::debug;
use views_model::{
    capability::{exposed_filters, is_paged, pager_defaults},
    derived::{
        CONTEXTUAL_FILTER_ARG, DerivedField, DerivedFieldKind, FILTER_ARG, OFFSET_ARG, PAGE_ARG,
        PAGE_SIZE_ARG, SORT_BY_ARG, SORT_DIRECTION_ARG,
    },
    display::DisplayConfig,
    subsystem::ViewsSubsystem,
};

use crate::{
    backend::ExecutionParams,
    error::ViewExecutionError,
    token::{ParentEntity, arguments_from_token_string, replace_tokens},
};

pub const SORT_BY_INPUT: &str = "sort_by";
pub const SORT_ORDER_INPUT: &str = "sort_order";

/// Translate the arguments of a view (or sub-view) field.
///
/// `parent` is the entity the field is resolved on, `None` for root fields.
pub fn translate_arguments(
    subsystem: &ViewsSubsystem,
    field: &DerivedField,
    arguments: &IndexMap<String, Val>,
    parent: Option<&ParentEntity>,
) -> Result<ExecutionParams, ViewExecutionError> {
    let display = subsystem
        .display(&field.key)
        .ok_or_else(|| ViewExecutionError::UnknownDisplay(field.key.clone()))?;

    let mut params = ExecutionParams::default();

    if is_paged(display) {
        let (current_page, items_per_page) = pager_params(display, arguments, parent);
        params.current_page = Some(current_page);
        params.items_per_page = Some(items_per_page);
    }

    params.offset = non_zero_int(arguments, OFFSET_ARG);
    params.exposed_input = exposed_input(subsystem, field, display, arguments)?;
    params.contextual_arguments = contextual_arguments(field, display, arguments, parent)?;

    Ok(params)
}

fn non_zero_int(arguments: &IndexMap<String, Val>, name: &str) -> Option<i64> {
    arguments
        .get(name)
        .and_then(Val::as_i64)
        .filter(|value| *value != 0)
}

/// `(currentPage, itemsPerPage)`, falling back to the display's pager settings
fn pager_params(
    display: &DisplayConfig,
    arguments: &IndexMap<String, Val>,
    parent: Option<&ParentEntity>,
) -> (i64, i64) {
    let defaults = pager_defaults(display);

    let items_per_page = non_zero_int(arguments, PAGE_SIZE_ARG)
        .or_else(|| {
            display
                .limit_mode
                .token_string()
                .and_then(|token| replace_tokens(token, parent).trim().parse().ok())
                .filter(|limit: &i64| *limit != 0)
        })
        .unwrap_or(defaults.limit);

    let current_page = non_zero_int(arguments, PAGE_ARG).unwrap_or(defaults.offset);

    (current_page, items_per_page)
}

/// Sort and filter input: `sort_by` and `sort_order` when set, then every exposed filter
fn exposed_input(
    subsystem: &ViewsSubsystem,
    field: &DerivedField,
    display: &DisplayConfig,
    arguments: &IndexMap<String, Val>,
) -> Result<IndexMap<String, Val>, ViewExecutionError> {
    let mut input = IndexMap::new();

    for (argument, input_name) in [(SORT_BY_ARG, SORT_BY_INPUT), (SORT_DIRECTION_ARG, SORT_ORDER_INPUT)]
    {
        if let Some(value) = enum_argument_value(subsystem, field, arguments, argument)? {
            input.insert(input_name.to_string(), Val::String(value));
        }
    }

    let filter = object_argument(arguments, FILTER_ARG)?;

    for exposed in exposed_filters(display) {
        let identifier = exposed.identifier();
        let value = filter
            .and_then(|filter| filter.get(identifier))
            .filter(|value| !value.is_null())
            .unwrap_or(&exposed.value);

        input.insert(identifier.to_string(), value.clone());
    }

    Ok(input)
}

/// The value behind the enum symbol passed for `argument` (or its default), if not empty
fn enum_argument_value(
    subsystem: &ViewsSubsystem,
    field: &DerivedField,
    arguments: &IndexMap<String, Val>,
    argument: &str,
) -> Result<Option<String>, ViewExecutionError> {
    let Some(spec) = field.argument(argument) else {
        return Ok(None);
    };

    let symbol = match arguments.get(argument).filter(|value| !value.is_null()) {
        Some(value) => value,
        None => match &spec.default_value {
            Some(default_value) => default_value,
            None => return Ok(None),
        },
    };

    let Some(symbol) = symbol.as_str().filter(|symbol| !symbol.is_empty()) else {
        return Err(ViewExecutionError::Validation(format!(
            "'{argument}' must be a value of {}",
            spec.typ.name()
        )));
    };

    subsystem
        .enums
        .get_by_key(spec.typ.name())
        .and_then(|enum_type| enum_type.value_of(symbol))
        .filter(|value| !value.is_empty())
        .map(|value| Some(value.to_string()))
        .ok_or_else(|| {
            ViewExecutionError::Validation(format!(
                "'{symbol}' is not a value of {}",
                spec.typ.name()
            ))
        })
}

fn object_argument<'a>(
    arguments: &'a IndexMap<String, Val>,
    name: &str,
) -> Result<Option<&'a Val>, ViewExecutionError> {
    match arguments.get(name) {
        None | Some(Val::Null) => Ok(None),
        Some(value @ Val::Object(_)) => Ok(Some(value)),
        Some(_) => Err(ViewExecutionError::Validation(format!(
            "'{name}' must be an object"
        ))),
    }
}

/// Positional contextual arguments.
///
/// In token mode they come from the display's token string. Otherwise each argument takes the
/// caller's `contextualFilter` value, else the id of the parent entity when the argument accepts
/// it.
fn contextual_arguments(
    field: &DerivedField,
    display: &DisplayConfig,
    arguments: &IndexMap<String, Val>,
    parent: Option<&ParentEntity>,
) -> Result<Vec<Option<String>>, ViewExecutionError> {
    if let Some(token) = display.argument_mode.token_string() {
        return Ok(arguments_from_token_string(token, parent));
    }

    let contextual_filter = object_argument(arguments, CONTEXTUAL_FILTER_ARG)?;
    let mut values = vec![None; display.arguments.len()];

    for info in &field.arguments_info {
        let caller_value = contextual_filter
            .and_then(|filter| filter.get(&info.argument_id))
            .filter(|value| !value.is_null());

        let value = match caller_value {
            Some(value) => Some(contextual_string(&info.argument_id, value)?),
            None => parent
                .filter(|parent| {
                    field.kind == DerivedFieldKind::SubView
                        || info.accepts_parent(&parent.entity_type, parent.bundle.as_deref())
                })
                .map(|parent| parent.id.clone()),
        };

        if let Some(slot) = values.get_mut(info.index) {
            *slot = value;
        }
    }

    Ok(values)
}

fn contextual_string(argument_id: &str, value: &Val) -> Result<String, ViewExecutionError> {
    let string = value.to_contextual_string().map_err(|error| {
        ViewExecutionError::Validation(format!("contextual filter '{argument_id}': {error}"))
    })?;

    if !matches!(value, Val::String(_)) {
        debug!("Coerced contextual filter '{argument_id}' value {value} to '{string}'");
    }

    Ok(string)
}
