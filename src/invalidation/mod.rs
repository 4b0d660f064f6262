// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Invalidation request handling: credential lookup, CDN submission, polling
//! and status recording.

pub mod credentials;
pub mod handler;
pub mod poll;
pub mod status;
pub mod workflow;

pub use credentials::DistributionConfig;
pub use handler::Handler;
pub use poll::PollSettings;
pub use workflow::{invalidate, InvalidationContext};
