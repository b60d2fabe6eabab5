// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;
use common::value::Val;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use views_model::cache::CacheMetadata;

/// Normalized parameters for executing a view display.
///
/// `items_per_page` and `current_page` are set only for paged displays, `offset` only when the
/// caller asked for one.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionParams {
    pub offset: Option<i64>,
    pub items_per_page: Option<i64>,
    pub current_page: Option<i64>,
    /// `sort_by`, `sort_order` and one entry per exposed filter identifier
    pub exposed_input: IndexMap<String, Val>,
    /// Positional contextual filter values
    pub contextual_arguments: Vec<Option<String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackendResult {
    pub rows: Vec<Val>,
    /// Total number of rows across all pages. Backends report it for paged displays.
    pub total_rows: Option<i64>,
    pub cache: CacheMetadata,
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("View '{0}' has no display '{1}'")]
    UnknownDisplay(String, String),

    #[error("{0}")]
    Query(String),

    #[error("{0}")]
    Delegate(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Executes view displays. Implemented by the host owning the query engine.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    async fn execute(
        &self,
        view_id: &str,
        display_id: &str,
        params: &ExecutionParams,
    ) -> Result<BackendResult, BackendError>;
}
