// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use common::value::Val;
use futures::future::join_all;
use indexmap::IndexMap;
use tracing::{debug, instrument};
use views_model::{
    derived::{DerivedField, DerivedFieldKind, ViewDisplayKey},
    subsystem::ViewsSubsystem,
};

use crate::{
    argument_translator::translate_arguments,
    backend::QueryBackend,
    cache_envelope::CacheEnvelope,
    error::ViewExecutionError,
    result_shaper::{ResolvedViewResult, row_field},
    token::ParentEntity,
};

/// The value a field is resolved on
#[derive(Debug, Clone, Copy)]
pub enum FieldSource<'a> {
    Root,
    /// An entity of a type the field is attached to
    Entity(&'a ParentEntity),
    Result(&'a ResolvedViewResult),
    Row(&'a Val),
    /// An item of a views-reference field: the view and display it refers to
    ViewReference(&'a ViewDisplayKey),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A view or sub-view field: the result the `results` and `count` fields are read from
    Result(ResolvedViewResult),
    Rows(Vec<Val>),
    Count(i64),
    Value(Option<Val>),
}

/// A field to resolve: `parent_type.name(arguments)`
#[derive(Debug, Clone)]
pub struct FieldRequest<'a> {
    pub parent_type: &'a str,
    pub name: &'a str,
    pub arguments: IndexMap<String, Val>,
    pub source: FieldSource<'a>,
}

pub struct ViewsResolver {
    pub subsystem: Arc<ViewsSubsystem>,
    backend: Arc<dyn QueryBackend>,
}

impl ViewsResolver {
    pub fn new(subsystem: Arc<ViewsSubsystem>, backend: Arc<dyn QueryBackend>) -> Self {
        Self { subsystem, backend }
    }

    #[instrument(name = "ViewsResolver::resolve_field", skip(self, arguments, source, envelope))]
    pub async fn resolve_field(
        &self,
        parent_type: &str,
        name: &str,
        arguments: &IndexMap<String, Val>,
        source: FieldSource<'_>,
        envelope: &CacheEnvelope,
    ) -> Result<FieldValue, ViewExecutionError> {
        let Some(field) = self.subsystem.field_for(parent_type, name) else {
            return self
                .resolve_view_reference(parent_type, name, arguments, source, envelope)
                .await
                .map(FieldValue::Result);
        };

        match (&field.kind, source) {
            (DerivedFieldKind::View, FieldSource::Root) => self
                .execute_view(field, arguments, None, envelope)
                .await
                .map(FieldValue::Result),
            (DerivedFieldKind::View | DerivedFieldKind::SubView, FieldSource::Entity(parent)) => {
                self.execute_view(field, arguments, Some(parent), envelope)
                    .await
                    .map(FieldValue::Result)
            }
            (DerivedFieldKind::ResultList, FieldSource::Result(result)) => {
                Ok(FieldValue::Rows(result.results().to_vec()))
            }
            (DerivedFieldKind::ResultCount, FieldSource::Result(result)) => {
                result.count(&field.id).map(FieldValue::Count)
            }
            (DerivedFieldKind::RowField { alias, .. }, FieldSource::Row(row)) => {
                Ok(FieldValue::Value(row_field(row, alias)))
            }
            _ => Err(ViewExecutionError::UnexpectedSource(field.id.clone())),
        }
    }

    /// Resolve several fields concurrently, in request order
    pub async fn resolve_fields(
        &self,
        requests: &[FieldRequest<'_>],
        envelope: &CacheEnvelope,
    ) -> Vec<Result<FieldValue, ViewExecutionError>> {
        join_all(requests.iter().map(|request| {
            self.resolve_field(
                request.parent_type,
                request.name,
                &request.arguments,
                request.source,
                envelope,
            )
        }))
        .await
    }

    /// The concrete type of a view result within the `View` and `ViewResult` unions
    pub fn resolve_type(&self, result: &ResolvedViewResult) -> Option<&str> {
        result.type_name(&self.subsystem)
    }

    /// Execute the display a views-reference item refers to
    async fn resolve_view_reference(
        &self,
        parent_type: &str,
        name: &str,
        arguments: &IndexMap<String, Val>,
        source: FieldSource<'_>,
        envelope: &CacheEnvelope,
    ) -> Result<ResolvedViewResult, ViewExecutionError> {
        let reference = self
            .subsystem
            .view_reference_for(parent_type, name)
            .ok_or_else(|| ViewExecutionError::UnknownField {
                parent: parent_type.to_string(),
                name: name.to_string(),
            })?;

        let FieldSource::ViewReference(key) = source else {
            return Err(ViewExecutionError::UnexpectedSource(reference.id.clone()));
        };

        let field = self
            .subsystem
            .bind_view_reference(reference, key)
            .ok_or_else(|| ViewExecutionError::UnknownDisplay(key.clone()))?;

        self.execute_view(&field, arguments, None, envelope).await
    }

    async fn execute_view(
        &self,
        field: &DerivedField,
        arguments: &IndexMap<String, Val>,
        parent: Option<&ParentEntity>,
        envelope: &CacheEnvelope,
    ) -> Result<ResolvedViewResult, ViewExecutionError> {
        let params = translate_arguments(&self.subsystem, field, arguments, parent)?;
        debug!(?params, "Executing {}", field.key);

        let result = self
            .backend
            .execute(&field.key.view_id, &field.key.display_id, &params)
            .await
            .map_err(|source| ViewExecutionError::Backend {
                key: field.key.clone(),
                source,
            })?;

        let result = ResolvedViewResult::from_backend(field.key.clone(), result);

        envelope.add(&field.cache);
        envelope.add(&result.cache);

        Ok(result)
    }
}
