// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

/// An entity type known to the host, such as `node` with bundles `page` and `article`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntityTypeInfo {
    pub id: String,
    /// Name of the identifier field, such as `nid`
    pub id_key: String,
    /// Name of the bundle field. Entity types without one do not support bundles.
    #[serde(default)]
    pub bundle_key: Option<String>,
    #[serde(default)]
    pub data_table: Option<String>,
    #[serde(default)]
    pub base_table: Option<String>,
    #[serde(default)]
    pub bundles: Vec<String>,
}

impl EntityTypeInfo {
    pub fn supports_bundles(&self) -> bool {
        self.bundle_key.is_some()
    }

    /// Tables whose rows are entities of this type.
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.data_table
            .iter()
            .chain(self.base_table.iter())
            .map(String::as_str)
    }
}
