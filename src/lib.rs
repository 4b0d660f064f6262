// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod cdn;
pub mod config;
pub mod constants;
pub mod error;
pub mod invalidation;
pub mod kubernetes;
pub mod reconcilers;
pub mod types;

#[cfg(test)]
mod test_utils;
