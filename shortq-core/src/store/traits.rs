//! Store traits the engines are injected with
//!
//! Constructor injection keeps lifetimes explicit and lets tests substitute
//! the in-memory fakes; there are no process-wide lazy singletons.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::types::{CacheRecord, Pattern, Prediction, PredictionFeatures, ValidationRule};
use crate::department::{Department, Namespace};
use crate::error::StoreError;

/// Storage for learned input -> query patterns
#[async_trait]
pub trait PatternStore: Send + Sync {
    /// Look up the pattern matching `text` exactly within a department
    async fn lookup_exact(
        &self,
        department: Department,
        text: &str,
    ) -> Result<Option<Pattern>, StoreError>;

    /// Bump usage accounting for a pattern
    ///
    /// Increments are monotonic; concurrent bumps may race and the exact
    /// count is not a correctness requirement, only growth for ranking.
    async fn increment_usage(&self, department: Department, text: &str)
    -> Result<(), StoreError>;
}

/// Storage for department validation rules
#[async_trait]
pub trait RuleStore: Send + Sync {
    async fn load_rules(&self, department: Department) -> Result<Vec<ValidationRule>, StoreError>;
}

/// TTL cache storage, partitioned by namespace
///
/// Each namespace is an independent table; a key only ever touches the
/// partition it was routed to.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, namespace: Namespace, key: &str)
    -> Result<Option<CacheRecord>, StoreError>;

    /// Destructive upsert: an existing record is fully replaced, including
    /// its hit accounting
    async fn put(
        &self,
        namespace: Namespace,
        key: &str,
        record: CacheRecord,
    ) -> Result<(), StoreError>;

    /// Bump hit accounting for a key; missing keys are a no-op
    async fn increment_hit(&self, namespace: Namespace, key: &str) -> Result<(), StoreError>;

    /// Delete every record with `expires_at < now`, returning the count
    ///
    /// Advisory: reads already filter by expiry, so correctness never
    /// depends on this running.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;
}

/// Optional ML enrichment for interaction records
///
/// Absence or failure of this service must not affect interpretation
/// results; the enrichment fields are simply omitted.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(&self, features: PredictionFeatures) -> Result<Prediction, StoreError>;
}
