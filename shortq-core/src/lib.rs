//! shortq-core: abbreviated-text query engine
//!
//! This crate turns shorthand business queries (`"t bnk p cm"`) into
//! structured, scored interpretations (`"total bank payments current
//! month"`), validates free-form segments against per-department grammars,
//! and caches results with per-use-case TTLs:
//!
//! - **Interpretation** - [`Interpreter`] resolves exact stored patterns
//!   first, then falls back to keyword type inference and whole-word
//!   abbreviation expansion
//! - **Validation** - [`Validator`] runs ordered regex rules per department
//!   and answers failures with ranked correction suggestions
//! - **Caching** - [`CacheLayer`] routes colon-delimited keys to namespace
//!   partitions with caller-chosen TTLs
//! - **Learning feedback** - [`UsageRecorder`] bumps pattern usage counters
//!   off the request path
//!
//! All mutable state lives behind the [`store`] traits; the engines are
//! stateless and constructor-injected, so the in-memory stores in
//! [`store`] drop straight into tests.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use shortq_core::{EngineConfig, QueryEngine};
//! use shortq_core::store::{MemoryCacheStore, MemoryPatternStore, MemoryRuleStore};
//!
//! # async fn example() {
//! let engine = QueryEngine::new(
//!     Arc::new(MemoryPatternStore::new()),
//!     Arc::new(MemoryRuleStore::new()),
//!     Arc::new(MemoryCacheStore::new()),
//!     EngineConfig::default(),
//! );
//!
//! let outcome = engine.interpret("user1", "t bnk p cm", "ACCOUNTING").await;
//! println!(
//!     "{} ({:.2})",
//!     outcome.interpretation.interpreted_query,
//!     outcome.interpretation.confidence_score.value()
//! );
//! # }
//! ```
//!
//! No engine operation returns an error to its caller: store outages
//! degrade to defaults (validation) or low-confidence general results
//! (interpretation), visible through [`RuleSource`] and [`MatchSource`]
//! tags rather than log parsing.

pub mod cache;
pub mod config;
pub mod department;
pub mod engine;
pub mod error;
pub mod interpret;
pub mod learning;
pub mod store;
pub mod tables;
pub mod types;
pub mod validate;

// Re-export key types for convenience
pub use cache::{CacheKey, CacheLayer, ttl};
pub use config::EngineConfig;
pub use department::{Department, Namespace};
pub use engine::QueryEngine;
pub use error::{ShortqError, StoreError};
pub use interpret::{Interaction, Interpretation, InterpretationOutcome, Interpreter, MatchSource};
pub use learning::UsageRecorder;
pub use store::{
    CacheRecord, CacheStore, Pattern, PatternStore, Prediction, PredictionFeatures,
    PredictionService, RuleStore, ValidationRule,
};
pub use types::{Confidence, QueryType};
pub use validate::{
    CompiledRule, RuleSource, ValidationErrorType, ValidationOutcome, Validator, validators,
};
