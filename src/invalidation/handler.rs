// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Entry point for watched objects.

use crate::error::{InvalidatorError, Result};
use crate::invalidation::status::write_status;
use crate::invalidation::workflow::{invalidate, InvalidationContext};
use crate::types::{Invalidation, InvalidationStatus};
use kube::ResourceExt;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, warn};

/// Reacts to object events. Only Invalidations are acted on.
pub struct Handler {
    ctx: InvalidationContext,
}

impl Handler {
    pub fn new(ctx: InvalidationContext) -> Self {
        Self { ctx }
    }

    /// Handle a watched object.
    ///
    /// Objects of any other type are ignored. Workflow failures are recorded
    /// as a `Failed` status where possible and returned for requeueing.
    pub async fn handle(&self, object: Arc<dyn Any + Send + Sync>) -> Result<()> {
        let Ok(request) = object.downcast::<Invalidation>() else {
            debug!("Ignoring event for unsupported object type");
            return Ok(());
        };

        if request.is_finished() {
            debug!(
                "Invalidation {}/{} already finished, skipping",
                request.namespace().unwrap_or_default(),
                request.name_any()
            );
            return Ok(());
        }

        match invalidate(&self.ctx, &request).await {
            Ok(_) => Ok(()),
            Err(err) => {
                self.record_failure(&request, &err).await;
                Err(InvalidatorError::process(err))
            }
        }
    }

    async fn record_failure(&self, request: &Invalidation, err: &InvalidatorError) {
        // Nothing to record when the status write itself failed, and a shutdown
        // leaves the request to be picked up again on restart.
        if matches!(
            err,
            InvalidatorError::StatusUpdate(_) | InvalidatorError::Cancelled(_)
        ) {
            return;
        }

        let status = failure_status(request, err);
        // Rewriting an identical status would only echo back through the watch
        if request.status.as_ref() == Some(&status) {
            debug!("Failure already recorded, not rewriting status");
            return;
        }

        if let Err(e) = write_status(&self.ctx.client, request, &status).await {
            warn!(
                "Failed to record failure on {}/{}: {}",
                request.namespace().unwrap_or_default(),
                request.name_any(),
                e
            );
        }
    }
}

/// `Failed` status for a workflow error, keeping the provider id when one was assigned
fn failure_status(request: &Invalidation, err: &InvalidatorError) -> InvalidationStatus {
    InvalidationStatus::failed(
        err.invalidation_id(),
        err.to_string(),
        request.metadata.generation,
    )
}
