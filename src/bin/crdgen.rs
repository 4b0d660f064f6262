// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Prints the Invalidation CustomResourceDefinition as YAML.

use cloudfront_invalidator::types::Invalidation;
use kube::CustomResourceExt;

fn main() -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(&Invalidation::crd())?);
    Ok(())
}
