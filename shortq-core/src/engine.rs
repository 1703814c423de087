//! The composed query engine
//!
//! Wires the interpreter, validator, and cache layer behind one injected
//! surface. Interpretation is read-through/write-through cached; validation
//! and the raw cache utilities are re-exported for embedders.

use std::sync::Arc;

use chrono::Duration;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::cache::{CacheKey, CacheLayer};
use crate::config::EngineConfig;
use crate::department::Department;
use crate::interpret::{
    Interpretation, InterpretationOutcome, Interpreter, MatchSource, build_interaction,
};
use crate::store::{CacheStore, PatternStore, PredictionService, RuleStore};
use crate::validate::{ValidationOutcome, Validator, validators};

/// Facade over the interpretation, validation, and caching engines
///
/// All collaborators are constructor-injected; there is no ambient global
/// state, so tests run against the in-memory stores directly.
pub struct QueryEngine {
    interpreter: Interpreter,
    validator: Validator,
    cache: CacheLayer,
    config: EngineConfig,
}

impl QueryEngine {
    pub fn new(
        patterns: Arc<dyn PatternStore>,
        rules: Arc<dyn RuleStore>,
        cache_store: Arc<dyn CacheStore>,
        config: EngineConfig,
    ) -> Self {
        let cache = CacheLayer::new(cache_store);
        Self {
            interpreter: Interpreter::new(patterns),
            validator: Validator::new(rules, cache.clone(), config.clone()),
            cache,
            config,
        }
    }

    /// Attach the optional prediction service
    pub fn with_prediction(mut self, prediction: Arc<dyn PredictionService>) -> Self {
        if self.config.enable_prediction {
            self.interpreter = self.interpreter.with_prediction(prediction);
        } else {
            debug!("prediction disabled by config, service ignored");
        }
        self
    }

    /// Interpret abbreviated text, consulting the result cache first
    ///
    /// A cached result is served verbatim with [`MatchSource::Cache`]; a
    /// computed one is written through with the interpreted-result TTL.
    pub async fn interpret(
        &self,
        user_id: &str,
        raw_text: &str,
        department: &str,
    ) -> InterpretationOutcome {
        let key = result_key(user_id, raw_text, department);

        if let Some(cached) = self.cache.get(&key).await {
            match serde_json::from_value::<Interpretation>(cached) {
                Ok(mut interpretation) => {
                    interpretation.source = MatchSource::Cache;
                    let interaction = build_interaction(
                        user_id,
                        department,
                        raw_text,
                        &interpretation,
                        None,
                    );
                    return InterpretationOutcome {
                        interpretation,
                        interaction,
                    };
                }
                Err(e) => warn!("discarding unreadable cached result for {key}: {e}"),
            }
        }

        let outcome = self.interpreter.interpret(user_id, raw_text, department).await;
        // A degraded answer reflects a store outage, not the query; caching
        // it would keep serving the outage after the store recovers
        if outcome.interpretation.source != MatchSource::Degraded {
            self.cache
                .put(
                    &key,
                    json!(outcome.interpretation),
                    Duration::hours(self.config.result_cache_ttl_hours),
                )
                .await;
        }
        outcome
    }

    /// Validate a text segment against a department grammar
    ///
    /// An unknown department gets the generic built-in check so callers
    /// still receive a structured answer.
    pub async fn validate(&self, department: &str, text: &str) -> ValidationOutcome {
        match Department::parse(department) {
            Some(dept) => self.validator.validate(dept, text).await,
            None => {
                debug!("unknown department '{department}', generic validation");
                validators::validate_generic(text)
            }
        }
    }

    /// Validate a time-period segment, honoring department overrides
    pub async fn validate_time_period(&self, department: &str, text: &str) -> ValidationOutcome {
        match Department::parse(department) {
            Some(dept) => self.validator.validate_time_period(dept, text).await,
            None => validators::validate_time_period(text, &[]),
        }
    }

    /// Read a value from the shared cache
    pub async fn cache_get(&self, key: &CacheKey) -> Option<Value> {
        self.cache.get(key).await
    }

    /// Write a value to the shared cache with an hour-granularity TTL
    pub async fn cache_put(&self, key: &CacheKey, value: Value, ttl_hours: i64) {
        self.cache.put(key, value, Duration::hours(ttl_hours)).await;
    }

    /// The underlying cache layer, for callers needing finer TTL control
    pub fn cache(&self) -> &CacheLayer {
        &self.cache
    }
}

/// Cache key for an interpreted result: department tag, user, normalized text
fn result_key(user_id: &str, raw_text: &str, department: &str) -> CacheKey {
    let kind = Department::parse(department).map_or("gen", |d| d.tag());
    CacheKey::new(kind, user_id, raw_text.trim().to_lowercase())
}
