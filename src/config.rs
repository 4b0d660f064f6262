// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Delay between two status queries for a pending invalidation
    pub poll_interval: Duration,
    /// Upper bound on how long a single invalidation is waited for
    pub poll_timeout: Duration,
    /// Requeue delay after a failed reconciliation
    pub error_requeue: Duration,
    /// AWS region the CloudFront client is configured for
    pub region: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            poll_interval: Duration::from_millis(100),
            poll_timeout: Duration::from_secs(900),
            error_requeue: Duration::from_secs(60),
            region: "us-east-1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let poll_interval = parse_var(&lookup, "POLL_INTERVAL_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.poll_interval);
        let poll_timeout = parse_var(&lookup, "POLL_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.poll_timeout);
        let error_requeue = parse_var(&lookup, "ERROR_REQUEUE_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.error_requeue);
        let region = lookup("CLOUDFRONT_REGION").unwrap_or(defaults.region);

        if poll_interval.is_zero() {
            anyhow::bail!("POLL_INTERVAL_MS must be greater than zero");
        }

        Ok(Config {
            poll_interval,
            poll_timeout,
            error_requeue,
            region,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{} has an invalid value '{}'", name, raw))
        })
        .transpose()
}
