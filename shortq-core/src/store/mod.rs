//! Collaborator store contracts and in-memory implementations
//!
//! All mutable state lives behind these traits; the engines themselves are
//! stateless. Production deployments back them with real storage; the
//! in-memory variants here serve tests and embedded use.

mod memory;
mod traits;
mod types;

pub use memory::{MemoryCacheStore, MemoryPatternStore, MemoryRuleStore, StaticPredictionService};
pub use traits::{CacheStore, PatternStore, PredictionService, RuleStore};
pub use types::{CacheRecord, Pattern, Prediction, PredictionFeatures, ValidationRule};
