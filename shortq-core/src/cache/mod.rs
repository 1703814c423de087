//! TTL cache layer with namespace routing
//!
//! Reads filter by expiry, so a stale-but-present record is identical to a
//! miss; the periodic sweep is purely advisory. Writes are destructive
//! upserts that reset hit accounting.

mod key;
mod layer;
pub mod ttl;

pub use key::CacheKey;
pub use layer::CacheLayer;
