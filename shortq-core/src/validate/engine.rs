//! The validation engine

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::LazyLock;

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::rules::{CompiledRule, compile_rules, default_rules};
use super::suggest::rank_suggestions;
use super::types::{RuleSource, ValidationErrorType, ValidationOutcome};
use super::validators;
use crate::cache::{CacheKey, CacheLayer};
use crate::config::EngineConfig;
use crate::department::Department;
use crate::store::{RuleStore, ValidationRule};

/// Inventory `item=qty` shape; the quantity bound is checked before the
/// rule funnel so an out-of-range value is always rejected as such
static INVENTORY_ASSIGNMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9]{2,4}=(\d+)$").expect("assignment regex"));

/// A compiled, priority-sorted rule set memoized until its TTL
struct CompiledSet {
    rules: Arc<Vec<CompiledRule>>,
    expires_at: DateTime<Utc>,
}

/// Checks free-form segments against department grammars
///
/// Rule sets come from the injected [`RuleStore`], read through the cache
/// layer; each loaded set is compiled and sorted once, then memoized
/// in-process until the rule-cache TTL lapses. A store outage degrades to
/// the hardcoded defaults so the user is never blocked. Never returns an
/// error to the caller.
pub struct Validator {
    rules: Arc<dyn RuleStore>,
    cache: CacheLayer,
    config: EngineConfig,
    compiled: RwLock<HashMap<Department, CompiledSet>>,
}

impl Validator {
    pub fn new(rules: Arc<dyn RuleStore>, cache: CacheLayer, config: EngineConfig) -> Self {
        Self {
            rules,
            cache,
            config,
            compiled: RwLock::new(HashMap::new()),
        }
    }

    /// Validate one text segment against a department's grammar
    pub async fn validate(&self, department: Department, text: &str) -> ValidationOutcome {
        let (rules, source) = self.load_rules(department).await;

        // Quantity bounds trump the rule funnel: an inventory item=qty
        // segment with a quantity outside [1, 99] is invalid even when a
        // rule regex would accept its digit shape (e.g. "a2b=0")
        if department == Department::Inventory
            && let Some(caps) = INVENTORY_ASSIGNMENT.captures(text)
        {
            let out_of_range = caps[1]
                .parse::<u32>()
                .map_or(true, |q| !(1..=99).contains(&q));
            if out_of_range {
                let mut outcome = validators::validate_quantity(&caps[1]);
                outcome.rule_source = source;
                return outcome;
            }
        }

        for rule in rules.iter() {
            if rule.matches(text) {
                return ValidationOutcome::pass(rule.pattern_label.clone(), source);
            }
        }

        ValidationOutcome::fail(
            ValidationErrorType::InvalidFormat,
            format!("Input does not match any known {department} format"),
            rank_suggestions(text, &rules, self.config.max_suggestions),
            source,
        )
    }

    /// Validate a time-period segment, honoring department rule overrides
    pub async fn validate_time_period(
        &self,
        department: Department,
        text: &str,
    ) -> ValidationOutcome {
        let (rules, _) = self.load_rules(department).await;
        validators::validate_time_period(text, &rules)
    }

    /// The compiled, priority-sorted rule set for a department
    ///
    /// Served from the in-process memo while fresh; otherwise fetched
    /// (cache, then store), compiled and sorted once, and memoized. The
    /// hardcoded defaults are never memoized so a store recovery is picked
    /// up on the next call.
    async fn load_rules(&self, department: Department) -> (Arc<Vec<CompiledRule>>, RuleSource) {
        let now = Utc::now();

        {
            let memo = self.compiled.read().await;
            if let Some(set) = memo.get(&department)
                && now < set.expires_at
            {
                return (Arc::clone(&set.rules), RuleSource::Cached);
            }
        }

        let (raw, source) = self.fetch_rules(department).await;
        let mut compiled = compile_rules(raw);
        // Highest priority first; the sort is stable so equal priorities
        // keep their stored order
        compiled.sort_by(|a, b| {
            b.priority_score
                .partial_cmp(&a.priority_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let compiled = Arc::new(compiled);

        if source != RuleSource::Default {
            let mut memo = self.compiled.write().await;
            memo.insert(
                department,
                CompiledSet {
                    rules: Arc::clone(&compiled),
                    expires_at: now + Duration::hours(self.config.rule_cache_ttl_hours),
                },
            );
        }

        (compiled, source)
    }

    /// Fetch raw rules: read-through the cache, fall back to the store,
    /// and substitute the hardcoded defaults on failure or an empty set
    async fn fetch_rules(&self, department: Department) -> (Vec<ValidationRule>, RuleSource) {
        let key = CacheKey::new(department.tag(), "rules", "validation");

        if let Some(cached) = self.cache.get(&key).await {
            match serde_json::from_value::<Vec<ValidationRule>>(cached) {
                Ok(rules) if !rules.is_empty() => return (rules, RuleSource::Cached),
                Ok(_) => {}
                Err(e) => warn!("discarding unreadable cached rules for {department}: {e}"),
            }
        }

        match self.rules.load_rules(department).await {
            Ok(rules) if !rules.is_empty() => {
                self.cache
                    .put(
                        &key,
                        json!(rules),
                        Duration::hours(self.config.rule_cache_ttl_hours),
                    )
                    .await;
                (rules, RuleSource::Stored)
            }
            Ok(_) => {
                debug!("no stored rules for {department}, using defaults");
                (default_rules(department), RuleSource::Default)
            }
            Err(e) => {
                warn!("rule store unavailable for {department}, using defaults: {e}");
                (default_rules(department), RuleSource::Default)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryCacheStore, MemoryRuleStore};

    fn validator_with_config(
        rules: Arc<MemoryRuleStore>,
        cache_store: Arc<MemoryCacheStore>,
        config: EngineConfig,
    ) -> Validator {
        Validator::new(rules, CacheLayer::new(cache_store), config)
    }

    fn fresh_validator() -> (Validator, Arc<MemoryRuleStore>, Arc<MemoryCacheStore>) {
        let rules = Arc::new(MemoryRuleStore::new());
        let cache = Arc::new(MemoryCacheStore::new());
        (
            validator_with_config(rules.clone(), cache.clone(), EngineConfig::default()),
            rules,
            cache,
        )
    }

    #[tokio::test]
    async fn inventory_item_with_quantity_in_range_is_valid() {
        let (validator, _, _) = fresh_validator();
        let outcome = validator.validate(Department::Inventory, "a2b=2").await;
        assert!(outcome.valid);
        assert_eq!(outcome.matched_rule.as_deref(), Some("item=qty"));
        assert_eq!(outcome.rule_source, RuleSource::Default);
    }

    #[tokio::test]
    async fn inventory_quantity_out_of_range_reports_invalid_quantity() {
        let (validator, _, _) = fresh_validator();
        let outcome = validator.validate(Department::Inventory, "a2b=150").await;
        assert!(!outcome.valid);
        assert_eq!(
            outcome.error_type,
            Some(ValidationErrorType::InvalidQuantity)
        );
    }

    #[tokio::test]
    async fn inventory_zero_quantity_rejected_despite_rule_match() {
        let (validator, _, _) = fresh_validator();

        // "a2b=0" fits the item=qty rule's digit shape but 0 is below the
        // [1, 99] bound and must never validate
        for input in ["a2b=0", "a2b=00"] {
            let outcome = validator.validate(Department::Inventory, input).await;
            assert!(!outcome.valid, "{input} was accepted");
            assert_eq!(
                outcome.error_type,
                Some(ValidationErrorType::InvalidQuantity)
            );
        }
    }

    #[tokio::test]
    async fn no_match_yields_capped_ranked_suggestions() {
        let (validator, _, _) = fresh_validator();
        let outcome = validator.validate(Department::Inventory, "!!???!!").await;
        assert!(!outcome.valid);
        assert_eq!(outcome.error_type, Some(ValidationErrorType::InvalidFormat));
        assert!(outcome.suggestions.len() <= 3);
        assert!(outcome.suggestions.iter().all(|s| s.starts_with("Try: ")));
    }

    #[tokio::test]
    async fn stored_rules_take_effect_and_get_cached() {
        let (validator, rules, _cache) = fresh_validator();
        rules
            .set_rules(
                Department::Sales,
                vec![ValidationRule::new(
                    Department::Sales,
                    "order id",
                    r"^ord-\d{4}$",
                    "order reference",
                    0.9,
                )],
            )
            .await;

        let outcome = validator.validate(Department::Sales, "ord-1234").await;
        assert!(outcome.valid);
        assert_eq!(outcome.rule_source, RuleSource::Stored);

        // Second call is served from the memo even if the store goes away
        rules.set_unavailable(true);
        let outcome = validator.validate(Department::Sales, "ord-1234").await;
        assert!(outcome.valid);
        assert_eq!(outcome.rule_source, RuleSource::Cached);
    }

    #[tokio::test]
    async fn memoized_rules_survive_cache_and_store_outage() {
        let (validator, rules, cache) = fresh_validator();
        rules
            .set_rules(
                Department::Marketing,
                vec![ValidationRule::new(
                    Department::Marketing,
                    "campaign code",
                    r"^cmp-\d{2}$",
                    "campaign reference",
                    0.9,
                )],
            )
            .await;

        assert!(
            validator
                .validate(Department::Marketing, "cmp-42")
                .await
                .valid
        );

        // Both external stores go down; the compiled memo still answers
        rules.set_unavailable(true);
        cache.set_unavailable(true);
        let outcome = validator.validate(Department::Marketing, "cmp-42").await;
        assert!(outcome.valid);
        assert_eq!(outcome.rule_source, RuleSource::Cached);
    }

    #[tokio::test]
    async fn expired_memo_falls_back_to_defaults_on_outage() {
        let rules = Arc::new(MemoryRuleStore::new());
        let cache = Arc::new(MemoryCacheStore::new());
        // Zero TTL: every memo and cache entry is immediately stale
        let config = EngineConfig {
            rule_cache_ttl_hours: 0,
            ..EngineConfig::default()
        };
        let validator = validator_with_config(rules.clone(), cache.clone(), config);
        rules
            .set_rules(
                Department::Sales,
                vec![ValidationRule::new(
                    Department::Sales,
                    "order id",
                    r"^ord-\d{4}$",
                    "order reference",
                    0.9,
                )],
            )
            .await;

        let outcome = validator.validate(Department::Sales, "ord-1234").await;
        assert_eq!(outcome.rule_source, RuleSource::Stored);

        rules.set_unavailable(true);
        cache.set_unavailable(true);
        let outcome = validator.validate(Department::Sales, "1500.50").await;
        assert!(outcome.valid);
        assert_eq!(outcome.rule_source, RuleSource::Default);
    }

    #[tokio::test]
    async fn defaults_are_not_memoized_so_recovery_is_immediate() {
        let (validator, rules, _) = fresh_validator();
        rules.set_unavailable(true);

        let outcome = validator.validate(Department::Sales, "1500.50").await;
        assert_eq!(outcome.rule_source, RuleSource::Default);

        // Store recovers with its own grammar; the next call must see it
        rules.set_unavailable(false);
        rules
            .set_rules(
                Department::Sales,
                vec![ValidationRule::new(
                    Department::Sales,
                    "order id",
                    r"^ord-\d{4}$",
                    "order reference",
                    0.9,
                )],
            )
            .await;
        let outcome = validator.validate(Department::Sales, "ord-1234").await;
        assert!(outcome.valid);
        assert_eq!(outcome.rule_source, RuleSource::Stored);
    }

    #[tokio::test]
    async fn store_outage_falls_back_to_defaults() {
        let (validator, rules, _) = fresh_validator();
        rules.set_unavailable(true);

        let outcome = validator.validate(Department::Accounting, "1500.50").await;
        assert!(outcome.valid);
        assert_eq!(outcome.rule_source, RuleSource::Default);
        assert_eq!(outcome.matched_rule.as_deref(), Some("amount"));
    }

    #[tokio::test]
    async fn malformed_stored_rule_is_skipped_not_fatal() {
        let (validator, rules, _) = fresh_validator();
        rules
            .set_rules(
                Department::Service,
                vec![
                    ValidationRule::new(Department::Service, "broken", r"([oops", "bad", 0.9),
                    ValidationRule::new(
                        Department::Service,
                        "ticket",
                        r"^tkt-\d+$",
                        "ticket reference",
                        0.5,
                    ),
                ],
            )
            .await;

        let outcome = validator.validate(Department::Service, "tkt-42").await;
        assert!(outcome.valid);
        assert_eq!(outcome.matched_rule.as_deref(), Some("ticket"));
    }

    #[tokio::test]
    async fn higher_priority_rule_wins() {
        let (validator, rules, _) = fresh_validator();
        rules
            .set_rules(
                Department::Marketing,
                vec![
                    ValidationRule::new(Department::Marketing, "loose", r"^[a-z]+$", "any", 0.2),
                    ValidationRule::new(
                        Department::Marketing,
                        "strict",
                        r"^[a-z]{3}$",
                        "three letters",
                        0.9,
                    ),
                ],
            )
            .await;

        let outcome = validator.validate(Department::Marketing, "abc").await;
        assert_eq!(outcome.matched_rule.as_deref(), Some("strict"));
    }

    #[tokio::test]
    async fn time_period_defaults_without_override() {
        let (validator, _, _) = fresh_validator();
        let outcome = validator
            .validate_time_period(Department::Accounting, "cm")
            .await;
        assert!(outcome.valid);
    }
}
