// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! A wrapper around a `typed_generational_arena::Arena` that also provides fast lookup.
//!
//! We use `MappedArena` to store derived fields, enums, input types, and object types. In each of
//! these cases, we need to lookup the underlying object given a key. For example, the key of a
//! derived field is its id (such as `blog-list-view` or `blog-list-result-count`), and the key of
//! an enum is its GraphQL name (such as `BlogListViewSortBy`).
//!
//! Values are never removed, so iteration follows insertion order. Schema output relies on this
//! to be deterministic across builds of the same configuration.

use std::ops;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use typed_generational_arena::{Arena, IgnoreGeneration, Index};

pub type SerializableSlab<T> = Arena<T, usize, IgnoreGeneration>;
pub type SerializableSlabIndex<T> = Index<T, usize, IgnoreGeneration>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MappedArena<V> {
    values: SerializableSlab<V>,
    map: IndexMap<String, SerializableSlabIndex<V>>,
}

impl<V> MappedArena<V> {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn get_id(&self, key: &str) -> Option<SerializableSlabIndex<V>> {
        self.map.get(key).copied()
    }

    pub fn get_by_key(&self, key: &str) -> Option<&V> {
        self.get_id(key).map(|id| &self[id])
    }

    pub fn get_by_key_mut(&mut self, key: &str) -> Option<&mut V> {
        self.get_id(key).map(|id| &mut self.values[id])
    }

    /// Add a value under `key`. If the key is already taken, the existing value is kept and its
    /// id returned (the first writer wins).
    pub fn add(&mut self, key: &str, value: V) -> SerializableSlabIndex<V> {
        if let Some(existing) = self.get_id(key) {
            return existing;
        }

        let id = self.values.insert(value);
        self.map.insert(key.to_string(), id);
        id
    }

    pub fn iter(&self) -> typed_generational_arena::Iter<'_, V, usize, IgnoreGeneration> {
        self.values.iter()
    }
}

impl<V> Default for MappedArena<V> {
    fn default() -> Self {
        MappedArena {
            values: SerializableSlab::new(),
            map: IndexMap::default(),
        }
    }
}

impl<V> ops::Index<SerializableSlabIndex<V>> for MappedArena<V> {
    type Output = V;

    #[inline]
    fn index(&self, id: SerializableSlabIndex<V>) -> &V {
        &self.values[id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_writer_wins() {
        let mut arena = MappedArena::default();
        let first = arena.add("blog-list-view", 1);
        let second = arena.add("blog-list-view", 2);

        assert_eq!(first, second);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.get_by_key("blog-list-view"), Some(&1));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut arena = MappedArena::default();
        for key in ["zeta", "alpha", "mid"] {
            arena.add(key, key.to_uppercase());
        }

        let values: Vec<_> = arena.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(values, vec!["ZETA", "ALPHA", "MID"]);
        assert_eq!(arena.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }
}
