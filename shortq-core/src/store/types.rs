//! Records exchanged with the backing stores

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::department::Department;
use crate::types::{QueryType, clamp_score};

/// A stored exact input -> expanded-query mapping with a learned priority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub department: Department,
    /// The raw abbreviated input this pattern matches, normalized
    pub raw_pattern: String,
    pub expanded_query: String,
    pub query_type: QueryType,
    /// [0, 1] weight; feeds exact-match confidence
    pub priority_score: f64,
    pub usage_count: u64,
    pub last_used: Option<DateTime<Utc>>,
}

impl Pattern {
    pub fn new(
        department: Department,
        raw_pattern: impl Into<String>,
        expanded_query: impl Into<String>,
        query_type: QueryType,
        priority_score: f64,
    ) -> Self {
        Self {
            department,
            raw_pattern: raw_pattern.into(),
            expanded_query: expanded_query.into(),
            query_type,
            priority_score: clamp_score(priority_score),
            usage_count: 0,
            last_used: None,
        }
    }
}

/// A department grammar rule, stored as a raw regex string
///
/// Compilation happens at load time in the validation engine; malformed
/// rules are quarantined there, never during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    pub department: Department,
    pub pattern_label: String,
    pub regex: String,
    pub description: String,
    /// [0, 1] weight; rules are evaluated highest-first
    pub priority_score: f64,
}

impl ValidationRule {
    pub fn new(
        department: Department,
        pattern_label: impl Into<String>,
        regex: impl Into<String>,
        description: impl Into<String>,
        priority_score: f64,
    ) -> Self {
        Self {
            department,
            pattern_label: pattern_label.into(),
            regex: regex.into(),
            description: description.into(),
            priority_score: clamp_score(priority_score),
        }
    }
}

/// A cached payload with its expiry and access accounting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    pub payload: Value,
    pub expires_at: DateTime<Utc>,
    pub hit_count: u64,
    pub last_accessed: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl CacheRecord {
    /// A fresh record with zeroed hit accounting
    pub fn new(payload: Value, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            payload,
            expires_at,
            hit_count: 0,
            last_accessed: now,
            created_at: now,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Input features for the optional prediction service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionFeatures {
    pub department: String,
    pub query_type: QueryType,
    pub confidence_score: f64,
    pub input_length: usize,
}

/// Output of the optional prediction service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub predicted_success: bool,
    pub probability: f64,
}
