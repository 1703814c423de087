//! Interpretation result and interaction record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Confidence, QueryType};

/// How an interpretation was produced
///
/// Lets callers tell an exact pattern hit from a heuristic guess and, more
/// importantly, a genuine low-confidence result from a degraded default
/// caused by a store outage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// Stored pattern matched the input exactly
    Exact,
    /// Keyword type inference succeeded
    Keyword,
    /// No keyword matched; general search with expansion only
    Fallback,
    /// Store lookup failed; heuristics ran but confidence is floored
    Degraded,
    /// Served verbatim from the result cache
    Cache,
}

/// A structured interpretation of abbreviated input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    /// The expanded, human-readable query
    pub interpreted_query: String,
    pub query_type: QueryType,
    pub confidence_score: Confidence,
    pub source: MatchSource,
}

/// Append-only record of one interpretation call
///
/// The engine produces this shape; persisting it (and filling in
/// `successful_completion` after the fact) is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub interaction_id: Uuid,
    pub user_id: String,
    /// Department string as supplied, even when unknown
    pub department: String,
    pub input_text: String,
    pub interpreted_query: String,
    pub query_type: QueryType,
    pub confidence_score: Confidence,
    pub exact_match: bool,
    /// Optional ML enrichment; absent when the prediction service is
    /// unavailable or disabled
    pub predicted_success: Option<bool>,
    pub probability: Option<f64>,
    /// Left unset by the engine for the caller to update post-hoc
    pub successful_completion: Option<bool>,
    pub timestamp: DateTime<Utc>,
}

/// Everything one `interpret` call yields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationOutcome {
    pub interpretation: Interpretation,
    pub interaction: Interaction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpretation_round_trips_through_json() {
        let interp = Interpretation {
            interpreted_query: "total bank payments current month".to_string(),
            query_type: QueryType::PaymentSearch,
            confidence_score: Confidence::new(0.6),
            source: MatchSource::Keyword,
        };
        let json = serde_json::to_string(&interp).unwrap();
        let back: Interpretation = serde_json::from_str(&json).unwrap();
        assert_eq!(interp, back);
    }

    #[test]
    fn match_source_serializes_snake_case() {
        let json = serde_json::to_string(&MatchSource::Exact).unwrap();
        assert_eq!(json, "\"exact\"");
    }
}
