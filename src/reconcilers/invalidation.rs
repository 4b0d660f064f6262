// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Invalidation reconciler - watches Invalidation resources and hands them to the handler.

use crate::error::{InvalidatorError, Result};
use crate::invalidation::Handler;
use crate::types::Invalidation;
use futures::StreamExt;
use kube::{
    runtime::{controller::Action, Controller},
    Api, Client, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub struct InvalidationReconciler {
    client: Client,
    handler: Handler,
    error_requeue: Duration,
    shutdown: CancellationToken,
}

impl InvalidationReconciler {
    pub fn new(
        client: Client,
        handler: Handler,
        error_requeue: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            client,
            handler,
            error_requeue,
            shutdown,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let invalidations: Api<Invalidation> = Api::all(self.client.clone());
        let shutdown = self.shutdown.clone();
        let context = Arc::new(self);

        Controller::new(invalidations, WatcherConfig::default())
            .graceful_shutdown_on(async move { shutdown.cancelled().await })
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled invalidation: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        info!("Invalidation reconciler stopped");
        Ok(())
    }
}

async fn reconcile(
    invalidation: Arc<Invalidation>,
    ctx: Arc<InvalidationReconciler>,
) -> Result<Action> {
    debug!(
        "Reconciling invalidation: {}/{}",
        invalidation.namespace().unwrap_or_default(),
        invalidation.name_any()
    );

    ctx.handler.handle(invalidation).await?;

    // Status writes and spec edits come back through the watcher
    Ok(Action::await_change())
}

fn error_policy(
    invalidation: Arc<Invalidation>,
    error: &InvalidatorError,
    ctx: Arc<InvalidationReconciler>,
) -> Action {
    error!(
        "Reconciliation error for {}/{}: {}",
        invalidation.namespace().unwrap_or_default(),
        invalidation.name_any(),
        error
    );
    Action::requeue(ctx.error_requeue)
}
