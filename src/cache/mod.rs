//! Memoization of searches and fitness evaluations.
//!
//! - [`Fingerprint`]: canonical, order-independent key of a search request
//! - [`LruStore`]: the bounded map behind both caches, see [`Eviction`]
//! - [`FitnessMemo`]: a [`Scorer`](crate::search::Scorer) keyed by
//!   unwanted hours, weights and schedule signature
//! - [`SearchCache`]: whole-search memoization with per-key locking
//!
//! Every type here is `Send + Sync`; a single [`SearchCache`] can serve
//! concurrent callers.

mod fingerprint;
mod memo;
mod search_cache;
mod store;

pub use fingerprint::Fingerprint;
pub use memo::FitnessMemo;
pub use search_cache::{CacheStats, SearchCache, DEFAULT_SCORE_CAPACITY, DEFAULT_SEARCH_CAPACITY};
pub use store::{Eviction, LruStore};
