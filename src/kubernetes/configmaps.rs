// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ConfigMap loading

use crate::error::{InvalidatorError, Result};
use k8s_openapi::api::core::v1::ConfigMap;
use kube::{Api, Client};
use tracing::instrument;

/// Fetch a ConfigMap by name from the given namespace
#[instrument(skip(client))]
pub async fn load_config_map(client: &Client, namespace: &str, name: &str) -> Result<ConfigMap> {
    let config_maps: Api<ConfigMap> = Api::namespaced(client.clone(), namespace);

    config_maps
        .get(name)
        .await
        .map_err(|source| InvalidatorError::ConfigMapNotFound {
            name: format!("{}/{}", namespace, name),
            source,
        })
}
