//! Whole-word abbreviation expansion
//!
//! Expansion is a single pass over whitespace tokens: each input token is
//! looked up in [`ABBREVIATIONS`] once and replaced by its phrase if found.
//! Text produced by an expansion is never rescanned, so the result is not
//! idempotent under re-application ("cm" becomes "current month", whose
//! tokens would survive a second pass, but "month" itself is never a key).
//! The dictionary order below is the canonical one; first entry wins when
//! two entries share a key.

/// Abbreviation -> phrase dictionary, in canonical lookup order
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("t", "total"),
    ("bnk", "bank"),
    ("p", "payments"),
    ("pmt", "payment"),
    ("amt", "amount"),
    ("acct", "account"),
    ("bal", "balance"),
    ("comm", "commission"),
    ("exp", "expenses"),
    ("cm", "current month"),
    ("lm", "last month"),
    ("lw", "last week"),
    ("tw", "this week"),
    ("ly", "last year"),
    ("td", "today"),
    ("yd", "yesterday"),
    ("dlv", "delivery"),
    ("qty", "quantity"),
    ("stk", "stock"),
    ("cust", "customer"),
    ("rev", "revenue"),
    ("sls", "sales"),
    ("tkt", "ticket"),
    ("sched", "schedule"),
    ("cmp", "campaign"),
];

/// Expand abbreviations in `text` with a single whole-word pass
///
/// Input is expected to already be trimmed and lowercased. Tokens with no
/// dictionary entry pass through unchanged; output tokens are re-joined
/// with single spaces.
pub fn expand(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for token in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        match ABBREVIATIONS.iter().find(|(abbr, _)| *abbr == token) {
            Some((_, phrase)) => out.push_str(phrase),
            None => out.push_str(token),
        }
    }
    out
}
