// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Content-delivery API surface used by the invalidation workflow.

pub mod cloudfront;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub use cloudfront::CloudFrontFactory;

#[derive(Error, Debug)]
pub enum CdnError {
    #[error("CloudFront API error: {0}")]
    Api(String),

    #[error("Malformed request: {0}")]
    InvalidRequest(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Static access key pair used to authenticate against the CDN
#[derive(Clone, PartialEq, Eq)]
pub struct CdnCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for CdnCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CdnCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Create and query invalidations for a distribution
#[async_trait]
pub trait CdnClient: Send + Sync {
    /// Submit an invalidation for a single path and return its id
    async fn create_invalidation(
        &self,
        distribution_id: &str,
        caller_reference: &str,
        path: &str,
    ) -> Result<String, CdnError>;

    /// Return the provider's status string for an invalidation
    async fn get_invalidation_status(
        &self,
        distribution_id: &str,
        invalidation_id: &str,
    ) -> Result<String, CdnError>;
}

/// Build a CDN client authenticated with a static credential pair
#[async_trait]
pub trait CdnClientFactory: Send + Sync {
    async fn client(&self, credentials: &CdnCredentials) -> Arc<dyn CdnClient>;
}
