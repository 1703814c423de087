//! Static abbreviation and keyword tables
//!
//! These tables are the fixed vocabulary of the fallback interpretation
//! path: a whole-word abbreviation dictionary and per-department ordered
//! keyword lists for query-type inference.

mod abbreviations;
mod keywords;

pub use abbreviations::{ABBREVIATIONS, expand};
pub use keywords::{infer_query_type, keyword_categories};
