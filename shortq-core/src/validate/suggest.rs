//! Fuzzy correction suggestions for failed validations

use std::collections::BTreeSet;

use super::rules::CompiledRule;

/// Jaccard overlap of the unique lowercase characters of two strings
///
/// Cheap and order-free; good enough to rank a handful of rule labels, not
/// a general fuzzy matcher.
pub fn char_jaccard(a: &str, b: &str) -> f64 {
    let chars_a: BTreeSet<char> = a.to_lowercase().chars().collect();
    let chars_b: BTreeSet<char> = b.to_lowercase().chars().collect();

    if chars_a.is_empty() && chars_b.is_empty() {
        return 0.0;
    }

    let intersection = chars_a.intersection(&chars_b).count();
    let union = chars_a.union(&chars_b).count();
    intersection as f64 / union as f64
}

/// Rank rule labels by similarity to the rejected input
///
/// Returns at most `limit` formatted suggestions, most similar first. Ties
/// keep the rule order (the sort is stable).
pub fn rank_suggestions(text: &str, rules: &[CompiledRule], limit: usize) -> Vec<String> {
    let mut scored: Vec<(f64, &CompiledRule)> = rules
        .iter()
        .map(|rule| (char_jaccard(text, &rule.pattern_label), rule))
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, rule)| format!("Try: \"{}\" ({})", rule.pattern_label, rule.description))
        .collect()
}
