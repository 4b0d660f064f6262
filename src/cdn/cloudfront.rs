// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CloudFront implementation backed by the AWS SDK

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudfront::config::{Credentials, Region};
use aws_sdk_cloudfront::error::DisplayErrorContext;
use aws_sdk_cloudfront::types::{Invalidation as CfInvalidation, InvalidationBatch, Paths};
use aws_sdk_cloudfront::Client;
use std::sync::Arc;
use tracing::debug;

use super::{CdnClient, CdnClientFactory, CdnCredentials, CdnError};

/// Credential provider name reported in SDK diagnostics
const PROVIDER_NAME: &str = "invalidation-configmap";

/// Builds CloudFront clients for a fixed region
#[derive(Debug, Clone)]
pub struct CloudFrontFactory {
    region: String,
}

impl CloudFrontFactory {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }
}

#[async_trait]
impl CdnClientFactory for CloudFrontFactory {
    async fn client(&self, credentials: &CdnCredentials) -> Arc<dyn CdnClient> {
        let static_credentials = Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            PROVIDER_NAME,
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .credentials_provider(static_credentials)
            .load()
            .await;

        debug!(
            "Initialized CloudFront client for access key {} in {}",
            credentials.access_key_id, self.region
        );

        Arc::new(CloudFrontClient {
            client: Client::new(&sdk_config),
        })
    }
}

/// CloudFront API client
pub struct CloudFrontClient {
    client: Client,
}

#[async_trait]
impl CdnClient for CloudFrontClient {
    async fn create_invalidation(
        &self,
        distribution_id: &str,
        caller_reference: &str,
        path: &str,
    ) -> Result<String, CdnError> {
        let batch = invalidation_batch(caller_reference, path)?;

        let output = self
            .client
            .create_invalidation()
            .distribution_id(distribution_id)
            .invalidation_batch(batch)
            .send()
            .await
            .map_err(|e| CdnError::Api(DisplayErrorContext(e).to_string()))?;

        created_id(output.invalidation())
    }

    async fn get_invalidation_status(
        &self,
        distribution_id: &str,
        invalidation_id: &str,
    ) -> Result<String, CdnError> {
        let output = self
            .client
            .get_invalidation()
            .distribution_id(distribution_id)
            .id(invalidation_id)
            .send()
            .await
            .map_err(|e| CdnError::Api(DisplayErrorContext(e).to_string()))?;

        reported_status(output.invalidation(), invalidation_id)
    }
}

/// Batch invalidating exactly one path
fn invalidation_batch(caller_reference: &str, path: &str) -> Result<InvalidationBatch, CdnError> {
    let paths = Paths::builder()
        .quantity(1)
        .items(path)
        .build()
        .map_err(|e| CdnError::InvalidRequest(e.to_string()))?;

    InvalidationBatch::builder()
        .paths(paths)
        .caller_reference(caller_reference)
        .build()
        .map_err(|e| CdnError::InvalidRequest(e.to_string()))
}

fn created_id(invalidation: Option<&CfInvalidation>) -> Result<String, CdnError> {
    invalidation
        .map(|inv| inv.id().to_string())
        .ok_or_else(|| CdnError::UnexpectedResponse("create response has no invalidation".to_string()))
}

fn reported_status(invalidation: Option<&CfInvalidation>, invalidation_id: &str) -> Result<String, CdnError> {
    invalidation
        .map(|inv| inv.status().to_string())
        .ok_or_else(|| {
            CdnError::UnexpectedResponse(format!(
                "get response for {} has no invalidation",
                invalidation_id
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_cloudfront::primitives::DateTime;

    fn make_invalidation(id: &str, status: &str) -> CfInvalidation {
        CfInvalidation::builder()
            .id(id)
            .status(status)
            .create_time(DateTime::from_secs(0))
            .invalidation_batch(invalidation_batch("uid-1-1", "/images/*").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_batch_has_single_path() {
        let batch = invalidation_batch("uid-1-1", "/images/*").unwrap();

        assert_eq!(batch.caller_reference(), "uid-1-1");
        let paths = batch.paths().expect("batch paths");
        assert_eq!(paths.quantity(), 1);
        assert_eq!(paths.items().to_vec(), vec!["/images/*".to_string()]);
    }

    #[test]
    fn test_created_id_from_response() {
        let inv = make_invalidation("I456", "InProgress");
        assert_eq!(created_id(Some(&inv)).unwrap(), "I456");
    }

    #[test]
    fn test_created_id_missing_invalidation() {
        assert!(matches!(created_id(None), Err(CdnError::UnexpectedResponse(_))));
    }

    #[test]
    fn test_reported_status_from_response() {
        let inv = make_invalidation("I456", "Completed");
        assert_eq!(reported_status(Some(&inv), "I456").unwrap(), "Completed");
    }

    #[test]
    fn test_reported_status_missing_invalidation() {
        let err = reported_status(None, "I456").unwrap_err();
        assert!(err.to_string().contains("I456"));
    }
}
