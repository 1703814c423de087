//! Rule compilation and hardcoded default rule sets

use regex::Regex;
use tracing::warn;

use crate::department::Department;
use crate::store::ValidationRule;

/// A validation rule with its regex compiled once at load time
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub pattern_label: String,
    pub description: String,
    pub priority_score: f64,
    pub regex: Regex,
}

impl CompiledRule {
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Compile a loaded rule set, quarantining malformed regexes
///
/// A rule that fails to compile is logged and dropped here so evaluation
/// never has to handle a regex error. Matching is case-insensitive.
pub fn compile_rules(rules: Vec<ValidationRule>) -> Vec<CompiledRule> {
    rules
        .into_iter()
        .filter_map(|rule| match Regex::new(&format!("(?i){}", rule.regex)) {
            Ok(regex) => Some(CompiledRule {
                pattern_label: rule.pattern_label,
                description: rule.description,
                priority_score: rule.priority_score,
                regex,
            }),
            Err(e) => {
                warn!(
                    "skipping malformed rule '{}' for {}: {e}",
                    rule.pattern_label, rule.department
                );
                None
            }
        })
        .collect()
}

/// Hardcoded per-department fallback rules, used when the rule store is
/// unreachable so validation keeps answering
pub fn default_rules(department: Department) -> Vec<ValidationRule> {
    match department {
        Department::Inventory => vec![
            ValidationRule::new(
                department,
                "item=qty",
                r"^[a-z0-9]{2,4}=\d{1,2}$",
                "item code with quantity, e.g. a2b=2",
                0.9,
            ),
            ValidationRule::new(
                department,
                "item lookup",
                r"^[a-z0-9]{2,6}$",
                "bare item code",
                0.6,
            ),
            ValidationRule::new(
                department,
                "stock report",
                r"^(stock|quantity|delivery)[a-z0-9\s\-]*$",
                "stock or delivery report request",
                0.4,
            ),
        ],
        Department::Accounting => vec![
            ValidationRule::new(
                department,
                "amount",
                r"^\d{1,10}(\.\d{1,2})?$",
                "monetary amount, e.g. 1500.50",
                0.8,
            ),
            ValidationRule::new(
                department,
                "period report",
                r"^[a-z\s]+(cm|lm|lw|tw|ly)$",
                "report request ending in a time period",
                0.7,
            ),
            ValidationRule::new(
                department,
                "free text",
                r"^[a-zA-Z0-9\s\-]+$",
                "free-form accounting query",
                0.3,
            ),
        ],
        Department::Sales => vec![
            ValidationRule::new(
                department,
                "amount",
                r"^\d{1,10}(\.\d{1,2})?$",
                "sale amount",
                0.8,
            ),
            ValidationRule::new(
                department,
                "customer lookup",
                r"^[a-zA-Z][a-zA-Z0-9\s\-]{1,40}$",
                "customer name or code",
                0.5,
            ),
        ],
        Department::Service => vec![
            ValidationRule::new(
                department,
                "ticket id",
                r"^[a-z]{1,3}-?\d{1,6}$",
                "ticket reference, e.g. srv-1042",
                0.8,
            ),
            ValidationRule::new(
                department,
                "free text",
                r"^[a-zA-Z0-9\s\-]+$",
                "free-form service query",
                0.3,
            ),
        ],
        Department::Marketing => vec![
            ValidationRule::new(
                department,
                "campaign code",
                r"^[a-z0-9]{2,8}(-[a-z0-9]{1,8})?$",
                "campaign identifier",
                0.7,
            ),
            ValidationRule::new(
                department,
                "free text",
                r"^[a-zA-Z0-9\s\-]+$",
                "free-form marketing query",
                0.3,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_drops_malformed_rules() {
        let rules = vec![
            ValidationRule::new(Department::Sales, "good", r"^\d+$", "digits", 0.5),
            ValidationRule::new(Department::Sales, "bad", r"([unclosed", "broken", 0.9),
        ];
        let compiled = compile_rules(rules);
        assert_eq!(compiled.len(), 1);
        assert_eq!(compiled[0].pattern_label, "good");
    }

    #[test]
    fn compiled_rules_match_case_insensitively() {
        let rules = vec![ValidationRule::new(
            Department::Inventory,
            "item",
            r"^[a-z0-9]{2,4}$",
            "item code",
            0.5,
        )];
        let compiled = compile_rules(rules);
        assert!(compiled[0].matches("A2B"));
        assert!(compiled[0].matches("a2b"));
    }

    #[test]
    fn every_department_has_default_rules_that_compile() {
        for dept in Department::ALL {
            let compiled = compile_rules(default_rules(dept));
            assert!(!compiled.is_empty(), "no default rules for {dept}");
            assert_eq!(compiled.len(), default_rules(dept).len());
        }
    }

    #[test]
    fn inventory_default_accepts_item_with_quantity() {
        let compiled = compile_rules(default_rules(Department::Inventory));
        assert!(compiled.iter().any(|r| r.matches("a2b=2")));
        assert!(!compiled.iter().any(|r| r.matches("a2b=150")));
    }
}
