//! Engine configuration

use serde::{Deserialize, Serialize};

/// Tunable knobs for the query engine
///
/// Defaults match the production TTL policy: validation rules are cached
/// for 2 hours, interpreted results for 1 hour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How long loaded validation rules stay cached, in hours
    #[serde(default = "default_rule_cache_ttl_hours")]
    pub rule_cache_ttl_hours: i64,

    /// How long interpreted results stay cached, in hours
    #[serde(default = "default_result_cache_ttl_hours")]
    pub result_cache_ttl_hours: i64,

    /// Maximum number of correction suggestions on validation failure
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Whether to enrich interactions with the prediction service
    #[serde(default = "default_true")]
    pub enable_prediction: bool,
}

fn default_rule_cache_ttl_hours() -> i64 {
    2
}

fn default_result_cache_ttl_hours() -> i64 {
    1
}

fn default_max_suggestions() -> usize {
    3
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rule_cache_ttl_hours: default_rule_cache_ttl_hours(),
            result_cache_ttl_hours: default_result_cache_ttl_hours(),
            max_suggestions: default_max_suggestions(),
            enable_prediction: true,
        }
    }
}
