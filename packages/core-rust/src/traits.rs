//! Capability contracts a cache adapter exposes to the invocation layer.
//!
//! Each trait is one slice of a product's operation surface. Adapters
//! implement the slices their product supports; invocations borrow the trait
//! object for exactly one call. Implementations must be safe for concurrent
//! use by many worker threads, hence the `Send + Sync` bounds.
//!
//! Failures are returned as `anyhow::Error` and travel to the caller
//! untouched. Durations are milliseconds and are forwarded exactly as given;
//! interpreting zero or negative values is the adapter's business.

use std::collections::{HashMap, HashSet};
use std::io::{self, Read, Write};

use crate::types::BulkMode;

/// Plain key/value access.
pub trait BasicCache<K, V>: Send + Sync {
    /// Fetch the value stored under `key`, or `None` if absent.
    fn get(&self, key: &K) -> anyhow::Result<Option<V>>;

    /// Store `value` under `key`, overwriting any previous value.
    fn put(&self, key: &K, value: &V) -> anyhow::Result<()>;

    /// Store `value` under `key` and return the previous value.
    fn get_and_put(&self, key: &K, value: &V) -> anyhow::Result<Option<V>>;

    /// Remove `key`. Returns `true` if an entry was removed.
    fn remove(&self, key: &K) -> anyhow::Result<bool>;

    /// Remove `key` and return the value it held.
    fn get_and_remove(&self, key: &K) -> anyhow::Result<Option<V>>;

    /// Whether an entry exists for `key`.
    fn contains_key(&self, key: &K) -> anyhow::Result<bool>;
}

/// Single-call atomic compare-and-swap style primitives.
///
/// Atomicity is the adapter's guarantee; callers never read before writing.
pub trait ConditionalCache<K, V>: Send + Sync {
    /// Store `value` only if `key` has no entry. Returns `true` if stored.
    fn put_if_absent(&self, key: &K, value: &V) -> anyhow::Result<bool>;

    /// Remove `key` only if it currently maps to `expected`.
    fn remove_if_equals(&self, key: &K, expected: &V) -> anyhow::Result<bool>;

    /// Replace the value of `key` only if it currently maps to `expected`.
    fn replace_if_equals(&self, key: &K, expected: &V, new_value: &V) -> anyhow::Result<bool>;

    /// Replace the value of `key` only if it has any entry.
    fn replace(&self, key: &K, new_value: &V) -> anyhow::Result<bool>;

    /// Replace the value of `key` if present and return the previous value.
    fn get_and_replace(&self, key: &K, new_value: &V) -> anyhow::Result<Option<V>>;
}

/// Writes that carry an expiry.
///
/// `lifespan_ms` bounds the entry's total lifetime; `max_idle_ms` bounds the
/// time between accesses.
pub trait TemporalCache<K, V>: Send + Sync {
    fn put_with_lifespan(&self, key: &K, value: &V, lifespan_ms: i64) -> anyhow::Result<()>;

    fn put_with_lifespan_and_max_idle(
        &self,
        key: &K,
        value: &V,
        lifespan_ms: i64,
        max_idle_ms: i64,
    ) -> anyhow::Result<()>;

    fn get_and_put_with_lifespan(
        &self,
        key: &K,
        value: &V,
        lifespan_ms: i64,
    ) -> anyhow::Result<Option<V>>;

    fn get_and_put_with_lifespan_and_max_idle(
        &self,
        key: &K,
        value: &V,
        lifespan_ms: i64,
        max_idle_ms: i64,
    ) -> anyhow::Result<Option<V>>;

    fn put_if_absent_with_lifespan(
        &self,
        key: &K,
        value: &V,
        lifespan_ms: i64,
    ) -> anyhow::Result<bool>;

    fn put_if_absent_with_lifespan_and_max_idle(
        &self,
        key: &K,
        value: &V,
        lifespan_ms: i64,
        max_idle_ms: i64,
    ) -> anyhow::Result<bool>;
}

/// Multi-key operations.
///
/// Each call covers the whole batch and completes or fails as a unit; partial
/// results are not reported. `mode` selects how the adapter executes it.
pub trait BulkCache<K, V>: Send + Sync {
    /// Fetch every present key of `keys`. Absent keys are omitted.
    fn get_all(&self, keys: &HashSet<K>, mode: BulkMode) -> anyhow::Result<HashMap<K, V>>;

    /// Store every entry of `entries`.
    fn put_all(&self, entries: &HashMap<K, V>, mode: BulkMode) -> anyhow::Result<()>;

    /// Remove every key of `keys`.
    fn remove_all(&self, keys: &HashSet<K>, mode: BulkMode) -> anyhow::Result<()>;
}

/// Writable end of a streamed put.
///
/// Bytes written become visible under the key only once [`ByteSink::commit`]
/// succeeds. Dropping a sink without committing abandons the transfer and
/// releases whatever the sink holds.
pub trait ByteSink: Write {
    /// Finish the transfer and release the sink.
    ///
    /// # Errors
    ///
    /// Returns the I/O error that prevented the value from being stored.
    fn commit(self: Box<Self>) -> io::Result<()>;
}

/// Access to values too large to materialise in one piece.
///
/// Returned streams borrow the cache and are released when dropped.
pub trait StreamingCache<K>: Send + Sync {
    /// Open a readable source over the value of `key`, or `None` if absent.
    fn get_via_stream<'c>(&'c self, key: &K) -> anyhow::Result<Option<Box<dyn Read + 'c>>>;

    /// Open a sink that replaces the value of `key` once committed.
    fn put_via_stream<'c>(&'c self, key: &K) -> anyhow::Result<Box<dyn ByteSink + 'c>>;
}
