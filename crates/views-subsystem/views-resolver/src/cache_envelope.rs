// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Mutex;

use views_model::cache::CacheMetadata;

/// Cache metadata collected while resolving the fields of one request.
///
/// Fields resolve concurrently and only ever add to the envelope: tags and contexts accumulate and
/// the max-age only decreases.
#[derive(Debug, Default)]
pub struct CacheEnvelope {
    metadata: Mutex<CacheMetadata>,
}

impl CacheEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, metadata: &CacheMetadata) {
        let mut current = self
            .metadata
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        current.merge(&metadata.clone().without_url_contexts());
    }

    pub fn snapshot(&self) -> CacheMetadata {
        self.metadata
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use views_model::cache::MaxAge;

    #[test]
    fn accumulates_without_url_contexts() {
        let envelope = CacheEnvelope::new();

        envelope.add(&CacheMetadata::new(
            ["node_list"],
            ["url.query_args", "user"],
            MaxAge::Seconds(60),
        ));
        envelope.add(&CacheMetadata::new(
            ["node:1"],
            ["url", "languages"],
            MaxAge::Permanent,
        ));

        let metadata = envelope.snapshot();
        assert_eq!(
            metadata.tags.iter().collect::<Vec<_>>(),
            vec!["node_list", "node:1"]
        );
        assert_eq!(
            metadata.contexts.iter().collect::<Vec<_>>(),
            vec!["user", "languages"]
        );
        assert_eq!(metadata.max_age, MaxAge::Seconds(60));
    }
}
