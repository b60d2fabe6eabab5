// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Token strings such as `[node:nid]/all`, whose `[type:key]` tokens are replaced from the
//! entity a view field is resolved on.

use std::sync::LazyLock;

use common::value::Val;
use indexmap::IndexMap;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::debug;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Za-z0-9_]+):([A-Za-z0-9_.\-]+)\]").unwrap());

/// The entity a sub-view (or an entity-attached view field) is resolved on.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParentEntity {
    pub entity_type: String,
    #[serde(default)]
    pub bundle: Option<String>,
    pub id: String,
    /// Field values available to tokens, such as `nid` or `title`
    #[serde(default)]
    pub values: IndexMap<String, Val>,
}

impl ParentEntity {
    pub fn new(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_bundle(self, bundle: impl Into<String>) -> Self {
        Self {
            bundle: Some(bundle.into()),
            ..self
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Val>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Value of `[<entity type>:<key>]`. `id` and `bundle` are always available.
    fn token_value(&self, entity_type: &str, key: &str) -> Option<String> {
        if entity_type != self.entity_type {
            return None;
        }

        match key {
            "id" => Some(self.id.clone()),
            "bundle" => self.bundle.clone(),
            _ => self
                .values
                .get(key)
                .and_then(|value| value.to_contextual_string().ok()),
        }
    }
}

/// Replace the tokens of `text`. Tokens that cannot be resolved are removed.
pub fn replace_tokens(text: &str, parent: Option<&ParentEntity>) -> String {
    TOKEN_RE
        .replace_all(text, |captures: &Captures| {
            let value = parent.and_then(|parent| parent.token_value(&captures[1], &captures[2]));

            if value.is_none() {
                debug!("Clearing unresolved token {}", &captures[0]);
            }
            value.unwrap_or_default()
        })
        .into_owned()
}

/// Contextual arguments from a token string: tokens replaced, then split on `/`.
pub fn arguments_from_token_string(text: &str, parent: Option<&ParentEntity>) -> Vec<Option<String>> {
    let replaced = replace_tokens(text, parent);
    let replaced = replaced.trim();

    if replaced.is_empty() {
        return vec![];
    }

    replaced
        .split('/')
        .map(|argument| Some(argument.trim().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> ParentEntity {
        ParentEntity::new("node", "12")
            .with_bundle("article")
            .with_value("nid", 12_i64)
            .with_value("title", "Hello")
    }

    #[test]
    fn replaces_known_tokens() {
        let parent = article();

        assert_eq!(replace_tokens("[node:nid]", Some(&parent)), "12");
        assert_eq!(replace_tokens("[node:bundle]-[node:id]", Some(&parent)), "article-12");
        assert_eq!(replace_tokens("by [node:title]!", Some(&parent)), "by Hello!");
    }

    #[test]
    fn clears_unresolved_tokens() {
        let parent = article();

        assert_eq!(replace_tokens("[user:uid]", Some(&parent)), "");
        assert_eq!(replace_tokens("[node:missing]x", Some(&parent)), "x");
        assert_eq!(replace_tokens("[node:nid]", None), "");
    }

    #[test]
    fn splits_arguments() {
        let parent = article();

        assert_eq!(
            arguments_from_token_string("[node:nid]/all", Some(&parent)),
            vec![Some("12".to_string()), Some("all".to_string())]
        );
        assert_eq!(arguments_from_token_string(" [user:uid] ", Some(&parent)), vec![]);
        assert_eq!(
            arguments_from_token_string("[user:uid]/all", Some(&parent)),
            vec![Some(String::new()), Some("all".to_string())]
        );
    }
}
