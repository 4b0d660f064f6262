// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::{CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};

use crate::constants::phase;

/// A request to purge one path from a CloudFront distribution's edge caches.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(
    group = "cloudfront.previousnext.com.au",
    version = "v1alpha1",
    kind = "Invalidation"
)]
#[kube(namespaced)]
#[kube(status = "InvalidationStatus")]
#[kube(printcolumn = r#"{"name":"Path","type":"string","jsonPath":".spec.path"}"#)]
#[kube(printcolumn = r#"{"name":"Phase","type":"string","jsonPath":".status.phase"}"#)]
#[serde(rename_all = "camelCase")]
pub struct InvalidationSpec {
    /// ConfigMap holding the distribution id and credential pair
    pub config_map: String,
    /// Path to invalidate
    pub path: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvalidationStatus {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub phase: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

impl InvalidationStatus {
    pub fn completed(id: impl Into<String>, generation: Option<i64>) -> Self {
        InvalidationStatus {
            id: id.into(),
            phase: phase::COMPLETED.to_string(),
            message: None,
            observed_generation: generation,
        }
    }

    /// `id` is the provider's invalidation id when the failure happened after submission
    pub fn failed(id: Option<&str>, message: impl Into<String>, generation: Option<i64>) -> Self {
        InvalidationStatus {
            id: id.unwrap_or_default().to_string(),
            phase: phase::FAILED.to_string(),
            message: Some(message.into()),
            observed_generation: generation,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.phase == phase::COMPLETED
    }
}

impl Invalidation {
    /// Check if the current spec has already been invalidated.
    /// A `Failed` status does not count: the request is retried on requeue.
    pub fn is_finished(&self) -> bool {
        self.status.as_ref().is_some_and(|s| {
            s.is_completed() && s.observed_generation == self.metadata.generation
        })
    }

    /// Idempotency token for the CloudFront create call.
    ///
    /// Stable for a given object generation so a resubmission after a failed
    /// poll or status write does not start a second invalidation.
    pub fn caller_reference(&self) -> String {
        match self.uid() {
            Some(uid) => format!("{}-{}", uid, self.metadata.generation.unwrap_or_default()),
            None => uuid::Uuid::new_v4().to_string(),
        }
    }
}
