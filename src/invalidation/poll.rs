// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Waiting for a submitted invalidation to complete

use crate::cdn::CdnClient;
use crate::config::Config;
use crate::constants::CLOUDFRONT_STATUS_COMPLETED;
use crate::error::{InvalidatorError, Result};
use std::time::Duration;
use tokio::time::{interval_at, sleep_until, timeout_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Fixed-rate polling bounded by a deadline
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl From<&Config> for PollSettings {
    fn from(config: &Config) -> Self {
        PollSettings {
            interval: config.poll_interval,
            timeout: config.poll_timeout,
        }
    }
}

/// Query the invalidation once per interval until it reports completion.
///
/// Returns the number of status queries made. Any failed query aborts the
/// wait.
#[instrument(skip(cdn, settings, cancel))]
pub async fn wait_for_completion(
    cdn: &dyn CdnClient,
    distribution_id: &str,
    invalidation_id: &str,
    settings: PollSettings,
    cancel: &CancellationToken,
) -> Result<usize> {
    let deadline = Instant::now() + settings.timeout;
    let mut ticker = interval_at(Instant::now() + settings.interval, settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let timed_out = || InvalidatorError::PollTimeout {
        id: invalidation_id.to_string(),
        timeout: settings.timeout,
    };

    let mut queries = 0;
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(InvalidatorError::Cancelled(invalidation_id.to_string()));
            }
            _ = sleep_until(deadline) => return Err(timed_out()),
            _ = ticker.tick() => {}
        }

        queries += 1;
        let status = timeout_at(
            deadline,
            cdn.get_invalidation_status(distribution_id, invalidation_id),
        )
        .await
        .map_err(|_| timed_out())?
        .map_err(|source| InvalidatorError::PollInvalidation {
            id: invalidation_id.to_string(),
            source,
        })?;

        if status == CLOUDFRONT_STATUS_COMPLETED {
            return Ok(queries);
        }

        debug!("Invalidation {} is {}", invalidation_id, status);
    }
}
