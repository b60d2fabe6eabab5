// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Request-time resolution of the fields derived from view displays.
//!
//! A view field translates its GraphQL arguments into [`backend::ExecutionParams`], executes the
//! display through a [`backend::QueryBackend`] and shapes the rows into a
//! [`result_shaper::ResolvedViewResult`], from which the `results`, `count` and row fields are
//! read.

mod token;

pub mod argument_translator;
pub mod backend;
pub mod cache_envelope;
pub mod error;
pub mod resolver;
pub mod result_shaper;

pub use backend::{BackendError, BackendResult, ExecutionParams, QueryBackend};
pub use cache_envelope::CacheEnvelope;
pub use error::ViewExecutionError;
pub use resolver::{FieldRequest, FieldSource, FieldValue, ViewsResolver};
pub use result_shaper::ResolvedViewResult;
pub use token::ParentEntity;
