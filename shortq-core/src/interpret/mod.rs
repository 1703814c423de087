//! Query interpretation
//!
//! Turns abbreviated user text into a structured query with a confidence
//! score: exact stored patterns first, then keyword type inference plus
//! whole-word abbreviation expansion. Never fails; the worst case is a
//! low-confidence general search.

mod engine;
mod types;

pub(crate) use engine::build_interaction;
pub use engine::Interpreter;
pub use types::{Interaction, Interpretation, InterpretationOutcome, MatchSource};
