// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Model of the views subsystem.
//!
//! The configuration half (`display`, `entity`, `cache`, `capability`) describes views as authored and is
//! read-only to the rest of the subsystem. The derived half (`derived`, `types`,
//! `type_resolution`, `subsystem`) is produced once per schema build by `views-model-builder`
//! and consulted at request time by `views-resolver`.

pub mod cache;
pub mod capability;
pub mod derived;
pub mod display;
pub mod entity;
pub mod reference;
pub mod subsystem;
pub mod type_resolution;
pub mod types;
