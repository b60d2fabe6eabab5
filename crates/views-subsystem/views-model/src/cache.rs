// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// How long a response may be reused.
///
/// Serialized as an integer where `-1` (any negative value) means permanent.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "i64", into = "i64")]
pub enum MaxAge {
    #[default]
    Permanent,
    Seconds(u32),
}

impl MaxAge {
    /// The stricter of the two ages. `Permanent` behaves as +infinity.
    pub fn min(self, other: MaxAge) -> MaxAge {
        match (self, other) {
            (MaxAge::Permanent, other) => other,
            (this, MaxAge::Permanent) => this,
            (MaxAge::Seconds(a), MaxAge::Seconds(b)) => MaxAge::Seconds(a.min(b)),
        }
    }
}

impl From<i64> for MaxAge {
    fn from(value: i64) -> Self {
        if value < 0 {
            MaxAge::Permanent
        } else {
            MaxAge::Seconds(u32::try_from(value).unwrap_or(u32::MAX))
        }
    }
}

impl From<MaxAge> for i64 {
    fn from(value: MaxAge) -> Self {
        match value {
            MaxAge::Permanent => -1,
            MaxAge::Seconds(seconds) => seconds as i64,
        }
    }
}

/// Cache tags, contexts and max-age attached to a derived field or a resolved result.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CacheMetadata {
    pub tags: IndexSet<String>,
    pub contexts: IndexSet<String>,
    pub max_age: MaxAge,
}

impl CacheMetadata {
    pub fn new<T, C>(tags: T, contexts: C, max_age: MaxAge) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            contexts: contexts.into_iter().map(Into::into).collect(),
            max_age,
        }
    }

    /// Union of tags and contexts, minimum of max-age.
    pub fn merge(&mut self, other: &CacheMetadata) {
        self.tags.extend(other.tags.iter().cloned());
        self.contexts.extend(other.contexts.iter().cloned());
        self.max_age = self.max_age.min(other.max_age);
    }

    pub fn merged(mut self, other: &CacheMetadata) -> Self {
        self.merge(other);
        self
    }

    /// Drop the `url` and `url.*` contexts. They vary per request and are never declared.
    pub fn without_url_contexts(mut self) -> Self {
        self.contexts.retain(|context| !is_url_context(context));
        self
    }
}

pub fn is_url_context(context: &str) -> bool {
    context == "url" || context.starts_with("url.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_contexts_are_stripped() {
        let metadata = CacheMetadata::new(
            ["node_list", "config:views.view.blog"],
            ["url", "url.query_args", "user.permissions", "urls", "languages"],
            MaxAge::Seconds(60),
        )
        .without_url_contexts();

        assert_eq!(
            metadata.contexts.iter().collect::<Vec<_>>(),
            vec!["user.permissions", "urls", "languages"]
        );
        assert_eq!(metadata.tags.len(), 2);
        assert_eq!(metadata.max_age, MaxAge::Seconds(60));
    }

    #[test]
    fn merge_unions_and_takes_minimum_age() {
        let display = CacheMetadata::new(["a"], ["user"], MaxAge::Permanent);
        let view = CacheMetadata::new(["a", "b"], ["languages"], MaxAge::Seconds(300));

        let merged = display
            .merged(&view)
            .merged(&CacheMetadata::new(["c"], Vec::<String>::new(), MaxAge::Seconds(30)));

        assert_eq!(merged.tags.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(merged.contexts.iter().collect::<Vec<_>>(), vec!["user", "languages"]);
        assert_eq!(merged.max_age, MaxAge::Seconds(30));
    }

    #[test]
    fn max_age_serializes_as_integer() {
        let metadata: CacheMetadata =
            serde_json::from_str(r#"{"tags": ["x"], "maxAge": -1}"#).unwrap();
        assert_eq!(metadata.max_age, MaxAge::Permanent);
        assert!(metadata.contexts.is_empty());

        let json = serde_json::to_value(CacheMetadata::new(
            Vec::<String>::new(),
            Vec::<String>::new(),
            MaxAge::Seconds(10),
        ))
        .unwrap();
        assert_eq!(json["maxAge"], 10);
    }
}
