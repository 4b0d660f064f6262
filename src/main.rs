// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use kube::Client;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cloudfront_invalidator::cdn::CloudFrontFactory;
use cloudfront_invalidator::config::Config;
use cloudfront_invalidator::error::InvalidatorError;
use cloudfront_invalidator::invalidation::{Handler, InvalidationContext, PollSettings};
use cloudfront_invalidator::kubernetes::wait_for_invalidation_crd;
use cloudfront_invalidator::reconcilers::InvalidationReconciler;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting CloudFront invalidation operator");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: poll_interval={:?}, poll_timeout={:?}, region={}",
        config.poll_interval, config.poll_timeout, config.region
    );

    let client = Client::try_default()
        .await
        .map_err(|e| InvalidatorError::ClientUnavailable(e.to_string()))
        .context("Kubernetes client is required")?;
    info!("Connected to Kubernetes cluster");

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_signal(shutdown.clone()));

    info!("Waiting for Invalidation CRD to become available...");
    if !wait_for_invalidation_crd(&client, &shutdown).await {
        info!("Shutdown requested before the CRD became available");
        return Ok(());
    }

    let handler = Handler::new(InvalidationContext {
        client: client.clone(),
        cdn: Arc::new(CloudFrontFactory::new(config.region.clone())),
        poll: PollSettings::from(&config),
        cancel: shutdown.clone(),
    });
    let reconciler = InvalidationReconciler::new(client, handler, config.error_requeue, shutdown);

    info!("Starting reconciler...");
    reconciler.run().await?;

    warn!("Reconciler stopped");
    Ok(())
}

async fn cancel_on_signal(shutdown: CancellationToken) {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                let _ = ctrl_c.await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
    }

    info!("Shutdown requested");
    shutdown.cancel();
}
