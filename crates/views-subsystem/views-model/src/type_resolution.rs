// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Resolution of the concrete type behind the `View` and `ViewResult` unions.
//!
//! Each derived result type registers the view and display it was derived from. A resolved result
//! carries the view and display that produced it, and the first registered entry matching both
//! names the concrete type.

use serde::{Deserialize, Serialize};

use crate::derived::ViewDisplayKey;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TypeResolutionEntry {
    pub key: ViewDisplayKey,
    pub type_name: String,
}

impl TypeResolutionEntry {
    pub fn applies(&self, view_id: &str, display_id: &str) -> bool {
        self.key.matches(view_id, display_id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TypeResolver {
    entries: Vec<TypeResolutionEntry>,
}

impl TypeResolver {
    pub fn register(&mut self, key: ViewDisplayKey, type_name: impl Into<String>) {
        self.entries.push(TypeResolutionEntry {
            key,
            type_name: type_name.into(),
        });
    }

    pub fn resolve(&self, view_id: &str, display_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.applies(view_id, display_id))
            .map(|entry| entry.type_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins() {
        let mut resolver = TypeResolver::default();
        resolver.register(ViewDisplayKey::new("blog", "list"), "BlogListViewResult");
        resolver.register(ViewDisplayKey::new("blog", "feed"), "BlogFeedViewResult");
        resolver.register(ViewDisplayKey::new("blog", "list"), "Shadowed");

        assert_eq!(resolver.resolve("blog", "list"), Some("BlogListViewResult"));
        assert_eq!(resolver.resolve("blog", "feed"), Some("BlogFeedViewResult"));
        assert_eq!(resolver.resolve("blog", "archive"), None);
        assert_eq!(resolver.resolve("news", "list"), None);
    }
}
