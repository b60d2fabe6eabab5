// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use common::value::Val;
use indexmap::IndexMap;
use views_model::{
    capability::pager_defaults,
    derived::{
        ArgSpec, CONTEXTUAL_FILTER_ARG, FILTER_ARG, PAGE_ARG, PAGE_SIZE_ARG, SORT_BY_ARG,
        SORT_DIRECTION_ARG,
    },
    types::SORT_DIRECTION_ENUM,
};

use crate::resolved_builder::ResolvedDisplay;

pub const DEFAULT_SORT_DIRECTION: &str = "ASC";

type Arguments = IndexMap<String, ArgSpec>;

/// Arguments of the view field: contextual filter, pager, sort, filter
pub fn view_arguments(resolved: &ResolvedDisplay) -> Arguments {
    let mut arguments = contextual_arguments(resolved);
    merge_arguments(&mut arguments, sub_view_arguments(resolved));
    arguments
}

/// Arguments of the sub-view field, whose contextual argument comes from the parent entity
pub fn sub_view_arguments(resolved: &ResolvedDisplay) -> Arguments {
    let mut arguments = pager_arguments(resolved);
    merge_arguments(&mut arguments, sort_arguments(resolved));
    merge_arguments(&mut arguments, filter_arguments(resolved));
    arguments
}

fn contextual_arguments(resolved: &ResolvedDisplay) -> Arguments {
    resolved
        .contextual_input
        .iter()
        .map(|input| ArgSpec::optional(CONTEXTUAL_FILTER_ARG, input))
        .map(|argument| (argument.name.clone(), argument))
        .collect()
}

fn pager_arguments(resolved: &ResolvedDisplay) -> Arguments {
    if !resolved.paged {
        return Arguments::new();
    }

    let defaults = pager_defaults(resolved.display);

    [
        ArgSpec::optional(PAGE_ARG, "Int").with_default(Val::from(defaults.offset)),
        ArgSpec::optional(PAGE_SIZE_ARG, "Int").with_default(Val::from(defaults.limit)),
    ]
    .into_iter()
    .map(|argument| (argument.name.clone(), argument))
    .collect()
}

fn sort_arguments(resolved: &ResolvedDisplay) -> Arguments {
    let Some(sort_by_enum) = &resolved.sort_by_enum else {
        return Arguments::new();
    };

    [
        ArgSpec::optional(SORT_DIRECTION_ARG, SORT_DIRECTION_ENUM)
            .with_default(Val::Enum(DEFAULT_SORT_DIRECTION.to_string())),
        ArgSpec::optional(SORT_BY_ARG, sort_by_enum),
    ]
    .into_iter()
    .map(|argument| (argument.name.clone(), argument))
    .collect()
}

fn filter_arguments(resolved: &ResolvedDisplay) -> Arguments {
    resolved
        .filter_input
        .iter()
        .map(|input| ArgSpec::optional(FILTER_ARG, input))
        .map(|argument| (argument.name.clone(), argument))
        .collect()
}

/// Add the arguments of `other` not already in `arguments`
fn merge_arguments(arguments: &mut Arguments, other: Arguments) {
    for (name, argument) in other {
        arguments.entry(name).or_insert(argument);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_existing_arguments() {
        let mut arguments: Arguments = [(
            PAGE_ARG.to_string(),
            ArgSpec::optional(PAGE_ARG, "Int").with_default(Val::from(1_i64)),
        )]
        .into_iter()
        .collect();

        merge_arguments(
            &mut arguments,
            [
                (PAGE_ARG.to_string(), ArgSpec::optional(PAGE_ARG, "String")),
                (FILTER_ARG.to_string(), ArgSpec::optional(FILTER_ARG, "F")),
            ]
            .into_iter()
            .collect(),
        );

        assert_eq!(arguments.keys().collect::<Vec<_>>(), vec![PAGE_ARG, FILTER_ARG]);
        assert_eq!(arguments[PAGE_ARG].typ.name(), "Int");
        assert_eq!(arguments[PAGE_ARG].default_value, Some(Val::from(1_i64)));
    }
}
