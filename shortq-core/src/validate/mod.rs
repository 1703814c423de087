//! Department grammar validation
//!
//! Free-form segments are checked against ordered, cache-backed rule sets;
//! failures come back with ranked correction suggestions instead of errors.
//! Specialized sub-validators for amounts, quantities, dates, and time
//! periods share the same outcome shape.

mod engine;
mod rules;
mod suggest;
mod types;
pub mod validators;

pub use engine::Validator;
pub use rules::{CompiledRule, compile_rules, default_rules};
pub use suggest::{char_jaccard, rank_suggestions};
pub use types::{RuleSource, ValidationErrorType, ValidationOutcome};
