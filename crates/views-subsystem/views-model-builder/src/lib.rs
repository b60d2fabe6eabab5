// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Derivation of the views GraphQL schema.
//!
//! Building runs in three steps:
//! 1. The registry lists the displays exposed through GraphQL.
//! 2. Each display is resolved: its row type, contextual arguments, attachment parents and type
//!    names are computed. A display whose configuration cannot be resolved is excluded (and
//!    reported as a diagnostic) without affecting the others.
//! 3. Types and fields are derived from the resolved displays, and name collisions between
//!    displays are settled according to the configured policy.
//! 4. The items of views-reference entity fields get a field executing the display they refer
//!    to.

mod argument_builder;
mod capability;
mod collision;
mod input_type_builder;
mod naming;
mod reference_builder;
mod resolved_builder;
mod result_type_builder;
mod row_type_builder;
mod sort_by_type_builder;
mod sub_view_builder;
mod view_field_builder;

pub mod config;
pub mod error;
pub mod registry;
pub mod store;
pub mod system_builder;

pub use system_builder::build;
