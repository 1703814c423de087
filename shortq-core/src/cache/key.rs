//! Cache key construction and namespace routing

use std::fmt;

use crate::department::Namespace;

/// A colon-delimited cache key: `{kind}:{user_id}:{context}`
///
/// Segments are joined as-is, with no escaping. A `context` containing `:`
/// renders the same as extra delimiters would, so two logically distinct
/// keys can collide; changing the format would invalidate every deployed
/// key, so the behavior stands until a migration exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: String,
    user_id: String,
    context: String,
}

impl CacheKey {
    pub fn new(
        kind: impl Into<String>,
        user_id: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            user_id: user_id.into(),
            context: context.into(),
        }
    }

    /// The rendered key string sent to the store
    pub fn render(&self) -> String {
        format!("{}:{}:{}", self.kind, self.user_id, self.context)
    }

    /// The partition this key routes to, from its leading segment
    pub fn namespace(&self) -> Namespace {
        Namespace::from_tag(&self.kind)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.user_id, self.context)
    }
}
