// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;
use tracing::error;
use views_model::derived::ViewDisplayKey;

use crate::backend::BackendError;

#[derive(Error, Debug)]
pub enum ViewExecutionError {
    #[error("Executing {key} failed: {source}")]
    Backend {
        key: ViewDisplayKey,
        #[source]
        source: BackendError,
    },

    #[error("The backend reported no total row count for paged field '{field}'")]
    MissingCount { field: String },

    #[error("Invalid argument: {0}")]
    Validation(String),

    #[error("No view field '{name}' on '{parent}'")]
    UnknownField { parent: String, name: String },

    #[error("Unknown view display {0}")]
    UnknownDisplay(ViewDisplayKey),

    #[error("Field '{0}' resolved on an unexpected parent value")]
    UnexpectedSource(String),
}

impl ViewExecutionError {
    pub fn user_error_message(&self) -> String {
        match self {
            ViewExecutionError::Validation(_) | ViewExecutionError::UnknownField { .. } => {
                self.to_string()
            }
            // Backend errors may expose query details
            _ => {
                error!("View execution failed: {:?}", self);
                "Operation failed".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_details_are_hidden() {
        let error = ViewExecutionError::Backend {
            key: ViewDisplayKey::new("blog", "list"),
            source: BackendError::Query("relation \"node_secret\" does not exist".to_string()),
        };
        assert!(error.to_string().contains("node_secret"));
        assert_eq!(error.user_error_message(), "Operation failed");

        let validation = ViewExecutionError::Validation("'filter' must be an object".to_string());
        assert_eq!(
            validation.user_error_message(),
            "Invalid argument: 'filter' must be an object"
        );
    }
}
