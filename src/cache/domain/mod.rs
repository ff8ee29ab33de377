//! Domain model for cache tags.

mod tag;

pub use tag::{CacheDomain, CacheTag, TagScope};
