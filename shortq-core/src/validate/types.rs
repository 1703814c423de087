//! Validation outcome types

use serde::{Deserialize, Serialize};

/// Why a segment failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorType {
    InvalidFormat,
    InvalidAmount,
    InvalidQuantity,
    InvalidDate,
    InvalidTimePeriod,
}

/// Where the rule set that produced an outcome came from
///
/// Lets callers tell a store-backed verdict from the hardcoded fallback
/// used when rule loading fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSource {
    /// Freshly loaded from the rule store
    Stored,
    /// Served from the rule cache
    Cached,
    /// Hardcoded department defaults (store unavailable)
    Default,
    /// A built-in sub-validator, no stored rules involved
    Builtin,
}

/// Result of validating one text segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub error_type: Option<ValidationErrorType>,
    pub message: Option<String>,
    /// Ranked corrections, at most the configured limit
    pub suggestions: Vec<String>,
    /// Label of the rule that accepted the input
    pub matched_rule: Option<String>,
    pub rule_source: RuleSource,
}

impl ValidationOutcome {
    pub fn pass(matched_rule: impl Into<String>, rule_source: RuleSource) -> Self {
        Self {
            valid: true,
            error_type: None,
            message: None,
            suggestions: Vec::new(),
            matched_rule: Some(matched_rule.into()),
            rule_source,
        }
    }

    pub fn fail(
        error_type: ValidationErrorType,
        message: impl Into<String>,
        suggestions: Vec<String>,
        rule_source: RuleSource,
    ) -> Self {
        Self {
            valid: false,
            error_type: Some(error_type),
            message: Some(message.into()),
            suggestions,
            matched_rule: None,
            rule_source,
        }
    }
}
