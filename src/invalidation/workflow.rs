// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The invalidation lifecycle: resolve credentials, submit, wait, record.

use crate::cdn::CdnClientFactory;
use crate::error::{InvalidatorError, Result};
use crate::invalidation::credentials::DistributionConfig;
use crate::invalidation::poll::{wait_for_completion, PollSettings};
use crate::invalidation::status::write_status;
use crate::kubernetes::load_config_map;
use crate::types::{Invalidation, InvalidationStatus};
use kube::{Client, ResourceExt};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// Dependencies of the workflow, injected by the caller
#[derive(Clone)]
pub struct InvalidationContext {
    pub client: Client,
    pub cdn: Arc<dyn CdnClientFactory>,
    pub poll: PollSettings,
    pub cancel: CancellationToken,
}

/// Run one invalidation request to completion and record it on the resource.
///
/// Returns the status that was written.
#[instrument(
    skip(ctx, request),
    fields(namespace = %request.namespace().unwrap_or_default(), name = %request.name_any())
)]
pub async fn invalidate(ctx: &InvalidationContext, request: &Invalidation) -> Result<InvalidationStatus> {
    info!("Received invalidation request");

    let namespace = request.namespace().unwrap_or_else(|| "default".to_string());

    info!("Loading ConfigMap {}", request.spec.config_map);
    let config_map = load_config_map(&ctx.client, &namespace, &request.spec.config_map).await?;
    let distribution = DistributionConfig::from_config_map(&config_map)?;

    let cdn = ctx.cdn.client(&distribution.credentials).await;

    info!(
        "Submitting invalidation for {} on distribution {}",
        request.spec.path, distribution.distribution_id
    );
    let invalidation_id = cdn
        .create_invalidation(
            &distribution.distribution_id,
            &request.caller_reference(),
            &request.spec.path,
        )
        .await
        .map_err(InvalidatorError::CreateInvalidation)?;

    info!("Waiting for invalidation {} to complete", invalidation_id);
    let queries = wait_for_completion(
        cdn.as_ref(),
        &distribution.distribution_id,
        &invalidation_id,
        ctx.poll,
        &ctx.cancel,
    )
    .await?;

    info!(
        "Invalidation {} finished after {} status queries",
        invalidation_id, queries
    );

    let status = InvalidationStatus::completed(invalidation_id, request.metadata.generation);
    write_status(&ctx.client, request, &status).await?;

    Ok(status)
}
