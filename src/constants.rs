// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// API group and version of the Invalidation custom resource
pub const API_GROUP: &str = "cloudfront.previousnext.com.au";
pub const API_VERSION: &str = "v1alpha1";
pub const KIND: &str = "Invalidation";

/// The operator name used as field manager for status patches
pub const OPERATOR_NAME: &str = "cloudfront-invalidator";

/// ConfigMap keys holding the distribution and its credential pair
pub mod config_keys {
    pub const DISTRIBUTION_ID: &str = "cloudfront.distribution.id";
    pub const CREDENTIAL_ID: &str = "cloudfront.credential.id";
    pub const CREDENTIAL_ACCESS: &str = "cloudfront.credential.access";

    /// Older key names, accepted when the current ones are absent
    pub mod legacy {
        pub const CREDENTIAL_ID: &str = "cloudfront.iam.id";
        pub const CREDENTIAL_ACCESS: &str = "cloudfront.iam.secret";
    }
}

/// Status phases written onto an Invalidation
pub mod phase {
    pub const COMPLETED: &str = "Completed";
    pub const FAILED: &str = "Failed";
}

/// Invalidation status string CloudFront reports once edge caches are purged
pub const CLOUDFRONT_STATUS_COMPLETED: &str = "Completed";

/// CRD polling configuration
pub mod crd {
    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}
