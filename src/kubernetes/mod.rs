// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for CRD discovery and ConfigMap access.

pub mod configmaps;
pub mod crd;

pub use configmaps::load_config_map;
pub use crd::wait_for_invalidation_crd;
