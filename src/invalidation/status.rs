// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Persisting the outcome onto the Invalidation status subresource

use crate::constants::OPERATOR_NAME;
use crate::error::{InvalidatorError, Result};
use crate::types::{Invalidation, InvalidationStatus};
use kube::{
    api::{Patch, PatchParams},
    Api, Client, ResourceExt,
};
use tracing::{debug, instrument};

#[instrument(
    skip(client, request, status),
    fields(namespace = %request.namespace().unwrap_or_default(), name = %request.name_any(), phase = %status.phase)
)]
pub async fn write_status(
    client: &Client,
    request: &Invalidation,
    status: &InvalidationStatus,
) -> Result<()> {
    let namespace = request.namespace().unwrap_or_else(|| "default".to_string());
    let invalidations: Api<Invalidation> = Api::namespaced(client.clone(), &namespace);

    // Explicit nulls so a merge patch clears fields left over from an earlier outcome
    let patch = serde_json::json!({
        "status": {
            "id": status.id,
            "phase": status.phase,
            "message": status.message,
            "observedGeneration": status.observed_generation,
        }
    });

    let pp = PatchParams {
        field_manager: Some(OPERATOR_NAME.to_string()),
        ..Default::default()
    };
    invalidations
        .patch_status(&request.name_any(), &pp, &Patch::Merge(&patch))
        .await
        .map_err(InvalidatorError::StatusUpdate)?;

    debug!("Status updated");
    Ok(())
}
