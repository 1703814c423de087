//! Usage feedback for exact-match patterns
//!
//! Every exact hit bumps the pattern's usage counter, which feeds its
//! priority (and so future confidence) through an external learning
//! process. Recording is fire-and-forget: the interpretation result must
//! never wait on it, and failures are logged, not surfaced.

use std::sync::Arc;

use tracing::warn;

use crate::department::Department;
use crate::store::PatternStore;

/// Records pattern usage on a spawned task
#[derive(Clone)]
pub struct UsageRecorder {
    patterns: Arc<dyn PatternStore>,
}

impl UsageRecorder {
    pub fn new(patterns: Arc<dyn PatternStore>) -> Self {
        Self { patterns }
    }

    /// Bump usage for a pattern without blocking the caller
    ///
    /// Concurrent bumps may race in the store; the counter only needs to
    /// grow, not be exact.
    pub fn record(&self, department: Department, pattern_text: &str) {
        let patterns = Arc::clone(&self.patterns);
        let text = pattern_text.to_string();
        tokio::spawn(async move {
            if let Err(e) = patterns.increment_usage(department, &text).await {
                warn!("usage increment failed for {department} pattern '{text}': {e}");
            }
        });
    }
}
