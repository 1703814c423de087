//! In-memory store implementations
//!
//! Used by tests and embedded deployments. Each store can be switched into
//! an unavailable state to exercise the engines' degraded paths, the same
//! way a scripted mock backend drives session tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::traits::{CacheStore, PatternStore, PredictionService, RuleStore};
use super::types::{CacheRecord, Pattern, Prediction, PredictionFeatures, ValidationRule};
use crate::department::{Department, Namespace};
use crate::error::StoreError;

fn unavailable() -> StoreError {
    StoreError::Unavailable("in-memory store marked unavailable".to_string())
}

/// In-memory [`PatternStore`]
#[derive(Default)]
pub struct MemoryPatternStore {
    patterns: RwLock<HashMap<(Department, String), Pattern>>,
    unavailable: AtomicBool,
}

impl MemoryPatternStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a pattern, keyed by (department, raw_pattern)
    pub async fn insert(&self, pattern: Pattern) {
        let key = (pattern.department, pattern.raw_pattern.clone());
        self.patterns.write().await.insert(key, pattern);
    }

    /// Toggle the simulated outage
    pub fn set_unavailable(&self, value: bool) {
        self.unavailable.store(value, Ordering::SeqCst);
    }

    /// Current usage count for a pattern, if present
    pub async fn usage_count(&self, department: Department, text: &str) -> Option<u64> {
        let patterns = self.patterns.read().await;
        patterns
            .get(&(department, text.to_string()))
            .map(|p| p.usage_count)
    }
}

#[async_trait]
impl PatternStore for MemoryPatternStore {
    async fn lookup_exact(
        &self,
        department: Department,
        text: &str,
    ) -> Result<Option<Pattern>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let patterns = self.patterns.read().await;
        Ok(patterns.get(&(department, text.to_string())).cloned())
    }

    async fn increment_usage(
        &self,
        department: Department,
        text: &str,
    ) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut patterns = self.patterns.write().await;
        if let Some(pattern) = patterns.get_mut(&(department, text.to_string())) {
            pattern.usage_count += 1;
            pattern.last_used = Some(Utc::now());
        }
        Ok(())
    }
}

/// In-memory [`RuleStore`]
#[derive(Default)]
pub struct MemoryRuleStore {
    rules: RwLock<HashMap<Department, Vec<ValidationRule>>>,
    unavailable: AtomicBool,
}

impl MemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rule set for a department
    pub async fn set_rules(&self, department: Department, rules: Vec<ValidationRule>) {
        self.rules.write().await.insert(department, rules);
    }

    /// Toggle the simulated outage
    pub fn set_unavailable(&self, value: bool) {
        self.unavailable.store(value, Ordering::SeqCst);
    }
}

#[async_trait]
impl RuleStore for MemoryRuleStore {
    async fn load_rules(&self, department: Department) -> Result<Vec<ValidationRule>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let rules = self.rules.read().await;
        Ok(rules.get(&department).cloned().unwrap_or_default())
    }
}

/// In-memory [`CacheStore`], one map per namespace
#[derive(Default)]
pub struct MemoryCacheStore {
    partitions: RwLock<HashMap<Namespace, HashMap<String, CacheRecord>>>,
    unavailable: AtomicBool,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the simulated outage
    pub fn set_unavailable(&self, value: bool) {
        self.unavailable.store(value, Ordering::SeqCst);
    }

    /// Raw record access for assertions, bypassing expiry filtering
    pub async fn raw_get(&self, namespace: Namespace, key: &str) -> Option<CacheRecord> {
        let partitions = self.partitions.read().await;
        partitions.get(&namespace).and_then(|p| p.get(key)).cloned()
    }

    /// Number of live records in one namespace
    pub async fn len(&self, namespace: Namespace) -> usize {
        let partitions = self.partitions.read().await;
        partitions.get(&namespace).map_or(0, |p| p.len())
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(
        &self,
        namespace: Namespace,
        key: &str,
    ) -> Result<Option<CacheRecord>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let partitions = self.partitions.read().await;
        Ok(partitions.get(&namespace).and_then(|p| p.get(key)).cloned())
    }

    async fn put(
        &self,
        namespace: Namespace,
        key: &str,
        record: CacheRecord,
    ) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut partitions = self.partitions.write().await;
        partitions
            .entry(namespace)
            .or_default()
            .insert(key.to_string(), record);
        Ok(())
    }

    async fn increment_hit(&self, namespace: Namespace, key: &str) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut partitions = self.partitions.write().await;
        if let Some(record) = partitions.get_mut(&namespace).and_then(|p| p.get_mut(key)) {
            record.hit_count += 1;
            record.last_accessed = Utc::now();
        }
        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut partitions = self.partitions.write().await;
        let mut removed = 0u64;
        for partition in partitions.values_mut() {
            let before = partition.len();
            partition.retain(|_, record| record.expires_at >= now);
            removed += (before - partition.len()) as u64;
        }
        Ok(removed)
    }
}

/// A [`PredictionService`] that always answers with a fixed prediction
pub struct StaticPredictionService {
    prediction: Prediction,
    unavailable: AtomicBool,
}

impl StaticPredictionService {
    pub fn new(predicted_success: bool, probability: f64) -> Self {
        Self {
            prediction: Prediction {
                predicted_success,
                probability,
            },
            unavailable: AtomicBool::new(false),
        }
    }

    /// Toggle the simulated outage
    pub fn set_unavailable(&self, value: bool) {
        self.unavailable.store(value, Ordering::SeqCst);
    }
}

#[async_trait]
impl PredictionService for StaticPredictionService {
    async fn predict(&self, _features: PredictionFeatures) -> Result<Prediction, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QueryType;
    use serde_json::json;

    fn sample_pattern() -> Pattern {
        Pattern::new(
            Department::Accounting,
            "t bnk p cm",
            "total bank payments current month",
            QueryType::PaymentSearch,
            0.8,
        )
    }

    #[tokio::test]
    async fn pattern_store_lookup_and_increment() {
        let store = MemoryPatternStore::new();
        store.insert(sample_pattern()).await;

        let found = store
            .lookup_exact(Department::Accounting, "t bnk p cm")
            .await
            .unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().usage_count, 0);

        store
            .increment_usage(Department::Accounting, "t bnk p cm")
            .await
            .unwrap();
        store
            .increment_usage(Department::Accounting, "t bnk p cm")
            .await
            .unwrap();
        assert_eq!(
            store
                .usage_count(Department::Accounting, "t bnk p cm")
                .await,
            Some(2)
        );
    }

    #[tokio::test]
    async fn pattern_store_scopes_by_department() {
        let store = MemoryPatternStore::new();
        store.insert(sample_pattern()).await;

        let miss = store
            .lookup_exact(Department::Sales, "t bnk p cm")
            .await
            .unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn unavailable_pattern_store_errors() {
        let store = MemoryPatternStore::new();
        store.set_unavailable(true);
        let result = store.lookup_exact(Department::Accounting, "x").await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn cache_store_partitions_are_independent() {
        let store = MemoryCacheStore::new();
        let record = CacheRecord::new(json!("v"), Utc::now() + chrono::Duration::hours(1));
        store
            .put(Namespace::Inventory, "inv:u:k", record.clone())
            .await
            .unwrap();

        assert!(
            store
                .get(Namespace::Inventory, "inv:u:k")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            store
                .get(Namespace::Accounting, "inv:u:k")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn cache_store_increment_hit_updates_accounting() {
        let store = MemoryCacheStore::new();
        let record = CacheRecord::new(json!(1), Utc::now() + chrono::Duration::hours(1));
        store.put(Namespace::Default, "k", record).await.unwrap();

        store.increment_hit(Namespace::Default, "k").await.unwrap();
        store.increment_hit(Namespace::Default, "k").await.unwrap();

        let raw = store.raw_get(Namespace::Default, "k").await.unwrap();
        assert_eq!(raw.hit_count, 2);
    }

    #[tokio::test]
    async fn cache_store_increment_hit_missing_key_is_noop() {
        let store = MemoryCacheStore::new();
        store
            .increment_hit(Namespace::Default, "missing")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_expired_sweeps_all_partitions() {
        let store = MemoryCacheStore::new();
        let now = Utc::now();
        let live = CacheRecord::new(json!(1), now + chrono::Duration::hours(1));
        let dead = CacheRecord::new(json!(2), now - chrono::Duration::minutes(5));

        store.put(Namespace::Inventory, "a", live).await.unwrap();
        store.put(Namespace::Sales, "b", dead).await.unwrap();

        let removed = store.delete_expired(now).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.len(Namespace::Inventory).await, 1);
        assert_eq!(store.len(Namespace::Sales).await, 0);
    }

    #[tokio::test]
    async fn rule_store_returns_empty_for_unknown_department() {
        let store = MemoryRuleStore::new();
        let rules = store.load_rules(Department::Marketing).await.unwrap();
        assert!(rules.is_empty());
    }

    #[tokio::test]
    async fn static_prediction_service_answers_and_fails() {
        let svc = StaticPredictionService::new(true, 0.9);
        let features = PredictionFeatures {
            department: "ACCOUNTING".to_string(),
            query_type: QueryType::PaymentSearch,
            confidence_score: 0.6,
            input_length: 10,
        };
        let prediction = svc.predict(features.clone()).await.unwrap();
        assert!(prediction.predicted_success);

        svc.set_unavailable(true);
        assert!(svc.predict(features).await.is_err());
    }
}
