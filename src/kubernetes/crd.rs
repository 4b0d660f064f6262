// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD availability checking utilities

use crate::constants::crd::{POLL_INTERVAL_SECS, POLL_MAX_INTERVAL_SECS};
use crate::constants::{API_GROUP, API_VERSION, KIND};
use crate::error::Result;
use kube::{discovery::Discovery, Client};
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Wait until the API server serves the Invalidation CRD.
///
/// Retries with capped exponential backoff. Returns `false` if shutdown was
/// requested before the CRD appeared.
pub async fn wait_for_invalidation_crd(client: &Client, shutdown: &CancellationToken) -> bool {
    let mut interval = Duration::from_secs(POLL_INTERVAL_SECS);
    let max_interval = Duration::from_secs(POLL_MAX_INTERVAL_SECS);

    loop {
        match invalidation_crd_served(client).await {
            Ok(true) => {
                info!("{} CRD ({}/{}) is available", KIND, API_GROUP, API_VERSION);
                return true;
            }
            Ok(false) => info!("{} CRD not served yet, checking again in {:?}", KIND, interval),
            Err(e) => warn!("Discovery of {} failed: {}, checking again in {:?}", API_GROUP, e, interval),
        }

        tokio::select! {
            _ = shutdown.cancelled() => return false,
            _ = sleep(interval) => {}
        }

        interval = (interval * 2).min(max_interval);
    }
}

/// Check whether discovery lists the Invalidation kind at the served version
pub async fn invalidation_crd_served(client: &Client) -> Result<bool> {
    let discovery = Discovery::new(client.clone())
        .filter(&[API_GROUP])
        .run()
        .await?;

    let served = discovery
        .groups()
        .filter(|group| group.name() == API_GROUP)
        .flat_map(|group| group.recommended_resources())
        .any(|(ar, _)| ar.kind == KIND && ar.version == API_VERSION);
    Ok(served)
}
