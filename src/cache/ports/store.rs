//! Staleness-tracking store contract.

use crate::cache::domain::CacheTag;

/// Tracks which cached result sets are stale.
///
/// Marking is idempotent: marking an already-stale tag changes nothing
/// and must not trigger any re-fetch by itself. Consumers clear their tag
/// once they have re-fetched.
pub trait CacheStore: Send + Sync {
    /// Marks a tag stale. Returns `true` when the tag was fresh before.
    fn mark_stale(&self, tag: CacheTag) -> bool;

    /// Returns whether a tag is currently stale.
    fn is_stale(&self, tag: CacheTag) -> bool;

    /// Clears a tag after its consumer re-fetched.
    fn clear(&self, tag: CacheTag);

    /// Returns every currently stale tag.
    fn stale_tags(&self) -> Vec<CacheTag>;
}
