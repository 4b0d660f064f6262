// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Distribution id and credential lookup from a ConfigMap

use crate::cdn::CdnCredentials;
use crate::constants::config_keys::{self, legacy};
use crate::error::{InvalidatorError, Result};
use k8s_openapi::api::core::v1::ConfigMap;

/// Everything needed to talk to one distribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionConfig {
    pub distribution_id: String,
    pub credentials: CdnCredentials,
}

impl DistributionConfig {
    /// Extract the distribution id and credential pair, in that order.
    /// The first missing key is reported.
    pub fn from_config_map(config_map: &ConfigMap) -> Result<Self> {
        let distribution_id = require(config_map, config_keys::DISTRIBUTION_ID, None, "distribution")?;
        let access_key_id = require(
            config_map,
            config_keys::CREDENTIAL_ID,
            Some(legacy::CREDENTIAL_ID),
            "credential id",
        )?;
        let secret_access_key = require(
            config_map,
            config_keys::CREDENTIAL_ACCESS,
            Some(legacy::CREDENTIAL_ACCESS),
            "credential secret",
        )?;

        Ok(DistributionConfig {
            distribution_id: distribution_id.to_string(),
            credentials: CdnCredentials {
                access_key_id: access_key_id.to_string(),
                secret_access_key: secret_access_key.to_string(),
            },
        })
    }
}

/// Look up a ConfigMap value by key
pub fn get_config<'a>(config_map: &'a ConfigMap, key: &str) -> Option<&'a str> {
    config_map
        .data
        .as_ref()
        .and_then(|data| data.get(key))
        .map(String::as_str)
}

fn require<'a>(
    config_map: &'a ConfigMap,
    key: &'static str,
    fallback: Option<&str>,
    what: &'static str,
) -> Result<&'a str> {
    get_config(config_map, key)
        .or_else(|| fallback.and_then(|k| get_config(config_map, k)))
        .ok_or(InvalidatorError::ConfigKeyMissing { key, what })
}
