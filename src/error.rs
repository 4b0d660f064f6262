// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;
use thiserror::Error;

use crate::cdn::CdnError;

#[derive(Error, Debug)]
pub enum InvalidatorError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to get Kubernetes client: {0}")]
    ClientUnavailable(String),

    #[error("Failed to load ConfigMap {name}: {source}")]
    ConfigMapNotFound {
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("{what} not found: ConfigMap has no '{key}' key")]
    ConfigKeyMissing { key: &'static str, what: &'static str },

    #[error("Failed to create invalidation: {0}")]
    CreateInvalidation(#[source] CdnError),

    #[error("Failed to get invalidation {id}: {source}")]
    PollInvalidation {
        id: String,
        #[source]
        source: CdnError,
    },

    #[error("Invalidation {id} did not complete within {timeout:?}")]
    PollTimeout { id: String, timeout: Duration },

    #[error("Stopped waiting for invalidation {0}: shutting down")]
    Cancelled(String),

    #[error("Failed to update invalidation status: {0}")]
    StatusUpdate(#[source] kube::Error),

    #[error("failed to process invalidation request: {0}")]
    Process(#[source] Box<InvalidatorError>),
}

impl InvalidatorError {
    /// Wrap a workflow error with the handler's context
    pub fn process(err: InvalidatorError) -> Self {
        InvalidatorError::Process(Box::new(err))
    }

    /// Provider invalidation id, for failures after the invalidation was submitted
    pub fn invalidation_id(&self) -> Option<&str> {
        match self {
            InvalidatorError::PollInvalidation { id, .. }
            | InvalidatorError::PollTimeout { id, .. }
            | InvalidatorError::Cancelled(id) => Some(id.as_str()),
            InvalidatorError::Process(inner) => inner.invalidation_id(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, InvalidatorError>;
