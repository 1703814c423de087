//! Built-in sub-validators
//!
//! Composable checks for the common segment shapes. They share the
//! [`ValidationOutcome`] shape with the rule engine but answer with fixed
//! canonical suggestions instead of similarity-ranked ones.

use std::sync::LazyLock;

use regex::Regex;

use super::rules::CompiledRule;
use super::types::{RuleSource, ValidationErrorType, ValidationOutcome};

static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,10}(\.\d{1,2})?$").expect("amount regex"));
static QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}$").expect("quantity regex"));
static DATE_ISO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("iso date regex"));
static DATE_SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("slash date regex"));
static DATE_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").expect("dash date regex"));
static GENERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s\-]+$").expect("generic regex"));

/// Restricted time-period vocabulary used when no department rule overrides
pub const TIME_PERIODS: &[&str] = &["cm", "lm", "lw", "tw", "ly"];

const QUANTITY_MIN: u32 = 1;
const QUANTITY_MAX: u32 = 99;

/// Monetary amount: up to ten integer digits, optional two decimals
pub fn validate_amount(text: &str) -> ValidationOutcome {
    if AMOUNT.is_match(text) {
        ValidationOutcome::pass("amount", RuleSource::Builtin)
    } else {
        ValidationOutcome::fail(
            ValidationErrorType::InvalidAmount,
            "Amount must be a number with at most two decimal places",
            canonical(&["100", "1500.50", "25.99"]),
            RuleSource::Builtin,
        )
    }
}

/// Quantity: one or two digits, value within [1, 99]
pub fn validate_quantity(text: &str) -> ValidationOutcome {
    let in_range = QUANTITY.is_match(text)
        && text
            .parse::<u32>()
            .is_ok_and(|q| (QUANTITY_MIN..=QUANTITY_MAX).contains(&q));

    if in_range {
        ValidationOutcome::pass("quantity", RuleSource::Builtin)
    } else {
        ValidationOutcome::fail(
            ValidationErrorType::InvalidQuantity,
            format!("Quantity must be between {QUANTITY_MIN} and {QUANTITY_MAX}"),
            canonical(&["1", "25", "99"]),
            RuleSource::Builtin,
        )
    }
}

/// Date in `YYYY-MM-DD`, `MM/DD/YYYY`, or `MM-DD-YYYY` shape
pub fn validate_date(text: &str) -> ValidationOutcome {
    if DATE_ISO.is_match(text) || DATE_SLASH.is_match(text) || DATE_DASH.is_match(text) {
        ValidationOutcome::pass("date", RuleSource::Builtin)
    } else {
        ValidationOutcome::fail(
            ValidationErrorType::InvalidDate,
            "Date must be YYYY-MM-DD, MM/DD/YYYY, or MM-DD-YYYY",
            canonical(&["2026-01-15", "01/15/2026", "01-15-2026"]),
            RuleSource::Builtin,
        )
    }
}

/// Time period from the restricted vocabulary, unless the department rules
/// define their own period rule, which then takes precedence
pub fn validate_time_period(text: &str, department_rules: &[CompiledRule]) -> ValidationOutcome {
    if let Some(rule) = department_rules
        .iter()
        .find(|r| r.pattern_label.to_lowercase().contains("time period"))
    {
        return if rule.matches(text) {
            ValidationOutcome::pass(rule.pattern_label.clone(), RuleSource::Builtin)
        } else {
            ValidationOutcome::fail(
                ValidationErrorType::InvalidTimePeriod,
                format!("Time period must match \"{}\"", rule.pattern_label),
                canonical(TIME_PERIODS),
                RuleSource::Builtin,
            )
        };
    }

    if TIME_PERIODS.contains(&text.trim().to_lowercase().as_str()) {
        ValidationOutcome::pass("time period", RuleSource::Builtin)
    } else {
        ValidationOutcome::fail(
            ValidationErrorType::InvalidTimePeriod,
            "Time period must be one of: cm, lm, lw, tw, ly",
            canonical(TIME_PERIODS),
            RuleSource::Builtin,
        )
    }
}

/// Generic segment: letters, digits, whitespace, and hyphens
pub fn validate_generic(text: &str) -> ValidationOutcome {
    if GENERIC.is_match(text) {
        ValidationOutcome::pass("generic", RuleSource::Builtin)
    } else {
        ValidationOutcome::fail(
            ValidationErrorType::InvalidFormat,
            "Only letters, numbers, spaces, and hyphens are allowed",
            canonical(&["bank payments", "stock a2b", "sales report"]),
            RuleSource::Builtin,
        )
    }
}

fn canonical(examples: &[&str]) -> Vec<String> {
    examples.iter().map(|s| s.to_string()).collect()
}
