//! Named TTL policies
//!
//! TTLs are caller-specified per use case rather than a global default.
//! These helpers name the policies in use so call sites stay self-describing.

use chrono::Duration;

/// Long-lived reference data, e.g. department option lists
pub fn reference_data() -> Duration {
    Duration::hours(24)
}

/// Semi-static data, e.g. bank account listings
pub fn semi_static() -> Duration {
    Duration::hours(6)
}

/// Generic interpreted results
pub fn interpreted_result() -> Duration {
    Duration::hours(1)
}

/// Highly volatile computed results, e.g. multi-item quantity searches
pub fn volatile_result() -> Duration {
    Duration::minutes(30)
}

/// Loaded validation rule sets
pub fn rule_cache() -> Duration {
    Duration::hours(2)
}
