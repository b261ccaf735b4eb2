//! In-process reference adapter backed by [`DashMap`].
//!
//! [`MemoryCache`] implements every capability contract so invocations can be
//! exercised without a product under test. Single-key conditional operations
//! run under the key's shard lock, which makes each of them atomic. Expired
//! entries are dropped lazily when an operation touches them.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::io::{self, Cursor, Read, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use gridbench_core::{
    BasicCache, BulkCache, BulkMode, ByteSink, ClockSource, ConditionalCache, StreamingCache,
    SystemClock, TemporalCache,
};

/// Expiry configuration for a stored entry. 0 disables the respective bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    /// Time-to-live in milliseconds from the write.
    pub ttl_millis: u64,
    /// Maximum idle time in milliseconds since the last read.
    pub max_idle_millis: u64,
}

impl ExpiryPolicy {
    /// Entries written under this policy never expire.
    pub const NONE: Self = Self {
        ttl_millis: 0,
        max_idle_millis: 0,
    };

    /// Builds a policy from caller-supplied durations. Zero and negative
    /// values mean "no bound", matching how data grids treat them.
    #[must_use]
    pub fn from_millis(lifespan_ms: i64, max_idle_ms: i64) -> Self {
        Self {
            ttl_millis: u64::try_from(lifespan_ms).unwrap_or(0),
            max_idle_millis: u64::try_from(max_idle_ms).unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone)]
struct StoredEntry<V> {
    value: V,
    written_at: u64,
    last_access: u64,
    policy: ExpiryPolicy,
}

impl<V> StoredEntry<V> {
    fn new(value: V, now: u64, policy: ExpiryPolicy) -> Self {
        Self {
            value,
            written_at: now,
            last_access: now,
            policy,
        }
    }

    fn is_expired(&self, now: u64) -> bool {
        let ttl = self.policy.ttl_millis;
        let idle = self.policy.max_idle_millis;
        (ttl > 0 && now.saturating_sub(self.written_at) >= ttl)
            || (idle > 0 && now.saturating_sub(self.last_access) >= idle)
    }
}

/// Concurrent in-memory cache implementing all capability contracts.
pub struct MemoryCache<K, V> {
    entries: DashMap<K, StoredEntry<V>>,
    clock: Arc<dyn ClockSource>,
    native_bulk_calls: AtomicU64,
    async_bulk_calls: AtomicU64,
}

impl<K, V> MemoryCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an empty cache reading the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn ClockSource>) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
            native_bulk_calls: AtomicU64::new(0),
            async_bulk_calls: AtomicU64::new(0),
        }
    }

    /// Number of stored entries, including expired ones not yet dropped.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of bulk calls executed in `mode` so far.
    #[must_use]
    pub fn bulk_calls(&self, mode: BulkMode) -> u64 {
        match mode {
            BulkMode::Native => self.native_bulk_calls.load(Ordering::Relaxed),
            BulkMode::Async => self.async_bulk_calls.load(Ordering::Relaxed),
        }
    }

    fn count_bulk_call(&self, mode: BulkMode) {
        let counter = match mode {
            BulkMode::Native => &self.native_bulk_calls,
            BulkMode::Async => &self.async_bulk_calls,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn evict_if_expired(&self, key: &K, now: u64) {
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired(now))
            .is_some()
        {
            tracing::trace!("dropped expired entry");
        }
    }

    /// Reads a live value and refreshes its idle timer.
    fn read(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let mut expired = false;
        let value = match self.entries.get_mut(key) {
            Some(mut entry) if !entry.is_expired(now) => {
                entry.last_access = now;
                Some(entry.value.clone())
            }
            Some(_) => {
                expired = true;
                None
            }
            None => None,
        };
        if expired {
            self.evict_if_expired(key, now);
        }
        value
    }

    /// Stores `value` and returns the previous live value.
    fn upsert(&self, key: &K, value: V, policy: ExpiryPolicy) -> Option<V> {
        let now = self.clock.now();
        let fresh = StoredEntry::new(value, now, policy);
        match self.entries.entry(key.clone()) {
            MapEntry::Occupied(mut occupied) => {
                let previous = occupied.insert(fresh);
                (!previous.is_expired(now)).then_some(previous.value)
            }
            MapEntry::Vacant(vacant) => {
                vacant.insert(fresh);
                None
            }
        }
    }

    fn insert_if_absent(&self, key: &K, value: &V, policy: ExpiryPolicy) -> bool {
        let now = self.clock.now();
        match self.entries.entry(key.clone()) {
            MapEntry::Occupied(mut occupied) => {
                if occupied.get().is_expired(now) {
                    occupied.insert(StoredEntry::new(value.clone(), now, policy));
                    true
                } else {
                    false
                }
            }
            MapEntry::Vacant(vacant) => {
                vacant.insert(StoredEntry::new(value.clone(), now, policy));
                true
            }
        }
    }

    /// Replaces the value of a live entry, optionally only when it equals
    /// `expected`. Returns the previous value if the swap happened.
    fn swap_value(&self, key: &K, expected: Option<&V>, new_value: &V) -> Option<V>
    where
        V: PartialEq,
    {
        let now = self.clock.now();
        let mut entry = self.entries.get_mut(key)?;
        if entry.is_expired(now) {
            drop(entry);
            self.evict_if_expired(key, now);
            return None;
        }
        if expected.is_some_and(|expected| *expected != entry.value) {
            return None;
        }
        entry.last_access = now;
        Some(std::mem::replace(&mut entry.value, new_value.clone()))
    }

    fn take(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        self.entries
            .remove(key)
            .and_then(|(_, entry)| (!entry.is_expired(now)).then_some(entry.value))
    }
}

impl<K, V> Default for MemoryCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> BasicCache<K, V> for MemoryCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> anyhow::Result<Option<V>> {
        Ok(self.read(key))
    }

    fn put(&self, key: &K, value: &V) -> anyhow::Result<()> {
        self.upsert(key, value.clone(), ExpiryPolicy::NONE);
        Ok(())
    }

    fn get_and_put(&self, key: &K, value: &V) -> anyhow::Result<Option<V>> {
        Ok(self.upsert(key, value.clone(), ExpiryPolicy::NONE))
    }

    fn remove(&self, key: &K) -> anyhow::Result<bool> {
        Ok(self.take(key).is_some())
    }

    fn get_and_remove(&self, key: &K) -> anyhow::Result<Option<V>> {
        Ok(self.take(key))
    }

    fn contains_key(&self, key: &K) -> anyhow::Result<bool> {
        let now = self.clock.now();
        Ok(self
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now)))
    }
}

impl<K, V> ConditionalCache<K, V> for MemoryCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + PartialEq + Send + Sync,
{
    fn put_if_absent(&self, key: &K, value: &V) -> anyhow::Result<bool> {
        Ok(self.insert_if_absent(key, value, ExpiryPolicy::NONE))
    }

    fn remove_if_equals(&self, key: &K, expected: &V) -> anyhow::Result<bool> {
        let now = self.clock.now();
        Ok(self
            .entries
            .remove_if(key, |_, entry| {
                !entry.is_expired(now) && entry.value == *expected
            })
            .is_some())
    }

    fn replace_if_equals(&self, key: &K, expected: &V, new_value: &V) -> anyhow::Result<bool> {
        Ok(self.swap_value(key, Some(expected), new_value).is_some())
    }

    fn replace(&self, key: &K, new_value: &V) -> anyhow::Result<bool> {
        Ok(self.swap_value(key, None, new_value).is_some())
    }

    fn get_and_replace(&self, key: &K, new_value: &V) -> anyhow::Result<Option<V>> {
        Ok(self.swap_value(key, None, new_value))
    }
}

impl<K, V> TemporalCache<K, V> for MemoryCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn put_with_lifespan(&self, key: &K, value: &V, lifespan_ms: i64) -> anyhow::Result<()> {
        self.upsert(key, value.clone(), ExpiryPolicy::from_millis(lifespan_ms, 0));
        Ok(())
    }

    fn put_with_lifespan_and_max_idle(
        &self,
        key: &K,
        value: &V,
        lifespan_ms: i64,
        max_idle_ms: i64,
    ) -> anyhow::Result<()> {
        let policy = ExpiryPolicy::from_millis(lifespan_ms, max_idle_ms);
        self.upsert(key, value.clone(), policy);
        Ok(())
    }

    fn get_and_put_with_lifespan(
        &self,
        key: &K,
        value: &V,
        lifespan_ms: i64,
    ) -> anyhow::Result<Option<V>> {
        Ok(self.upsert(key, value.clone(), ExpiryPolicy::from_millis(lifespan_ms, 0)))
    }

    fn get_and_put_with_lifespan_and_max_idle(
        &self,
        key: &K,
        value: &V,
        lifespan_ms: i64,
        max_idle_ms: i64,
    ) -> anyhow::Result<Option<V>> {
        let policy = ExpiryPolicy::from_millis(lifespan_ms, max_idle_ms);
        Ok(self.upsert(key, value.clone(), policy))
    }

    fn put_if_absent_with_lifespan(
        &self,
        key: &K,
        value: &V,
        lifespan_ms: i64,
    ) -> anyhow::Result<bool> {
        Ok(self.insert_if_absent(key, value, ExpiryPolicy::from_millis(lifespan_ms, 0)))
    }

    fn put_if_absent_with_lifespan_and_max_idle(
        &self,
        key: &K,
        value: &V,
        lifespan_ms: i64,
        max_idle_ms: i64,
    ) -> anyhow::Result<bool> {
        let policy = ExpiryPolicy::from_millis(lifespan_ms, max_idle_ms);
        Ok(self.insert_if_absent(key, value, policy))
    }
}

/// Native mode walks the map directly. Async mode drives the batch through
/// the single-key contract, the way a product without a bulk API would.
impl<K, V> BulkCache<K, V> for MemoryCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get_all(&self, keys: &HashSet<K>, mode: BulkMode) -> anyhow::Result<HashMap<K, V>> {
        self.count_bulk_call(mode);
        let mut found = HashMap::with_capacity(keys.len());
        for key in keys {
            let value = match mode {
                BulkMode::Native => self.read(key),
                BulkMode::Async => BasicCache::get(self, key)?,
            };
            if let Some(value) = value {
                found.insert(key.clone(), value);
            }
        }
        Ok(found)
    }

    fn put_all(&self, entries: &HashMap<K, V>, mode: BulkMode) -> anyhow::Result<()> {
        self.count_bulk_call(mode);
        for (key, value) in entries {
            match mode {
                BulkMode::Native => {
                    self.upsert(key, value.clone(), ExpiryPolicy::NONE);
                }
                BulkMode::Async => BasicCache::put(self, key, value)?,
            }
        }
        Ok(())
    }

    fn remove_all(&self, keys: &HashSet<K>, mode: BulkMode) -> anyhow::Result<()> {
        self.count_bulk_call(mode);
        for key in keys {
            match mode {
                BulkMode::Native => {
                    self.entries.remove(key);
                }
                BulkMode::Async => {
                    BasicCache::remove(self, key)?;
                }
            }
        }
        Ok(())
    }
}

/// Sink that buffers a streamed value and stores it on commit.
struct MemorySink<'c, K, V> {
    cache: &'c MemoryCache<K, V>,
    key: K,
    bytes: Vec<u8>,
}

impl<K, V> Write for MemorySink<'_, K, V> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<K, V> ByteSink for MemorySink<'_, K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + From<Vec<u8>>,
{
    fn commit(self: Box<Self>) -> io::Result<()> {
        let MemorySink { cache, key, bytes } = *self;
        cache.upsert(&key, V::from(bytes), ExpiryPolicy::NONE);
        Ok(())
    }
}

impl<K, V> StreamingCache<K> for MemoryCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + AsRef<[u8]> + From<Vec<u8>> + Send + Sync,
{
    fn get_via_stream<'c>(&'c self, key: &K) -> anyhow::Result<Option<Box<dyn Read + 'c>>> {
        Ok(self
            .read(key)
            .map(|value| Box::new(Cursor::new(value)) as Box<dyn Read + 'c>))
    }

    fn put_via_stream<'c>(&'c self, key: &K) -> anyhow::Result<Box<dyn ByteSink + 'c>> {
        Ok(Box::new(MemorySink {
            cache: self,
            key: key.clone(),
            bytes: Vec::new(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use gridbench_core::ManualClock;

    use super::*;

    fn cache_with_clock() -> (MemoryCache<String, String>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000));
        let cache = MemoryCache::with_clock(clock.clone());
        (cache, clock)
    }

    fn key(s: &str) -> String {
        s.to_string()
    }

    // ---- basic ----

    #[test]
    fn put_then_get() {
        let cache: MemoryCache<String, String> = MemoryCache::new();
        cache.put(&key("k"), &key("v")).unwrap();
        assert_eq!(cache.get(&key("k")).unwrap(), Some(key("v")));
        assert!(cache.contains_key(&key("k")).unwrap());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn get_absent_returns_none() {
        let cache: MemoryCache<String, String> = MemoryCache::new();
        assert_eq!(cache.get(&key("missing")).unwrap(), None);
        assert!(!cache.contains_key(&key("missing")).unwrap());
        assert!(cache.is_empty());
    }

    #[test]
    fn get_and_put_returns_previous() {
        let cache: MemoryCache<String, String> = MemoryCache::new();
        assert_eq!(cache.get_and_put(&key("k"), &key("a")).unwrap(), None);
        assert_eq!(cache.get_and_put(&key("k"), &key("b")).unwrap(), Some(key("a")));
        assert_eq!(cache.get(&key("k")).unwrap(), Some(key("b")));
    }

    #[test]
    fn remove_reports_presence() {
        let cache: MemoryCache<String, String> = MemoryCache::new();
        cache.put(&key("k"), &key("v")).unwrap();
        assert!(cache.remove(&key("k")).unwrap());
        assert!(!cache.remove(&key("k")).unwrap());
    }

    #[test]
    fn get_and_remove_returns_value() {
        let cache: MemoryCache<String, String> = MemoryCache::new();
        cache.put(&key("k"), &key("v")).unwrap();
        assert_eq!(cache.get_and_remove(&key("k")).unwrap(), Some(key("v")));
        assert_eq!(cache.get_and_remove(&key("k")).unwrap(), None);
    }

    #[test]
    fn clear_drops_everything() {
        let cache: MemoryCache<String, String> = MemoryCache::new();
        cache.put(&key("a"), &key("1")).unwrap();
        cache.put(&key("b"), &key("2")).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }

    // ---- conditional ----

    #[test]
    fn put_if_absent_only_first_wins() {
        let cache: MemoryCache<String, String> = MemoryCache::new();
        assert!(cache.put_if_absent(&key("k"), &key("a")).unwrap());
        assert!(!cache.put_if_absent(&key("k"), &key("b")).unwrap());
        assert_eq!(cache.get(&key("k")).unwrap(), Some(key("a")));
    }

    #[test]
    fn remove_if_equals_checks_value() {
        let cache: MemoryCache<String, String> = MemoryCache::new();
        cache.put(&key("k"), &key("a")).unwrap();
        assert!(!cache.remove_if_equals(&key("k"), &key("b")).unwrap());
        assert!(cache.remove_if_equals(&key("k"), &key("a")).unwrap());
        assert!(!cache.contains_key(&key("k")).unwrap());
    }

    #[test]
    fn replace_if_equals_checks_value() {
        let cache: MemoryCache<String, String> = MemoryCache::new();
        cache.put(&key("k"), &key("a")).unwrap();
        assert!(!cache.replace_if_equals(&key("k"), &key("x"), &key("b")).unwrap());
        assert!(cache.replace_if_equals(&key("k"), &key("a"), &key("b")).unwrap());
        assert_eq!(cache.get(&key("k")).unwrap(), Some(key("b")));
    }

    #[test]
    fn replace_requires_existing_entry() {
        let cache: MemoryCache<String, String> = MemoryCache::new();
        assert!(!cache.replace(&key("k"), &key("a")).unwrap());
        assert!(!cache.contains_key(&key("k")).unwrap());
        cache.put(&key("k"), &key("a")).unwrap();
        assert!(cache.replace(&key("k"), &key("b")).unwrap());
        assert_eq!(cache.get_and_replace(&key("k"), &key("c")).unwrap(), Some(key("b")));
        assert_eq!(cache.get_and_replace(&key("other"), &key("c")).unwrap(), None);
    }

    #[test]
    fn concurrent_put_if_absent_has_single_winner() {
        let cache: MemoryCache<String, String> = MemoryCache::new();
        let winners: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|i| {
                    let cache = &cache;
                    scope.spawn(move || cache.put_if_absent(&key("race"), &i.to_string()).unwrap())
                })
                .collect();
            handles
                .into_iter()
                .map(|h| usize::from(h.join().unwrap()))
                .sum()
        });
        assert_eq!(winners, 1);
    }

    // ---- temporal ----

    #[test]
    fn lifespan_expires_entry() {
        let (cache, clock) = cache_with_clock();
        cache.put_with_lifespan(&key("k"), &key("v"), 100).unwrap();
        clock.advance(99);
        assert_eq!(cache.get(&key("k")).unwrap(), Some(key("v")));
        clock.advance(1);
        assert_eq!(cache.get(&key("k")).unwrap(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn max_idle_is_refreshed_by_reads() {
        let (cache, clock) = cache_with_clock();
        cache
            .put_with_lifespan_and_max_idle(&key("k"), &key("v"), 0, 50)
            .unwrap();
        clock.advance(40);
        assert!(cache.get(&key("k")).unwrap().is_some());
        clock.advance(40);
        assert!(cache.get(&key("k")).unwrap().is_some());
        clock.advance(50);
        assert!(cache.get(&key("k")).unwrap().is_none());
    }

    #[test]
    fn non_positive_lifespan_means_immortal() {
        let (cache, clock) = cache_with_clock();
        cache.put_with_lifespan(&key("neg"), &key("v"), -1).unwrap();
        cache.put_with_lifespan(&key("zero"), &key("v"), 0).unwrap();
        clock.advance(1_000_000);
        assert!(cache.contains_key(&key("neg")).unwrap());
        assert!(cache.contains_key(&key("zero")).unwrap());
    }

    #[test]
    fn get_and_put_with_lifespan_ignores_expired_previous() {
        let (cache, clock) = cache_with_clock();
        cache.put_with_lifespan(&key("k"), &key("old"), 10).unwrap();
        clock.advance(10);
        let previous = cache
            .get_and_put_with_lifespan(&key("k"), &key("new"), 10)
            .unwrap();
        assert_eq!(previous, None);
        assert_eq!(
            cache
                .get_and_put_with_lifespan_and_max_idle(&key("k"), &key("newer"), 10, 5)
                .unwrap(),
            Some(key("new"))
        );
    }

    #[test]
    fn put_if_absent_succeeds_over_expired_entry() {
        let (cache, clock) = cache_with_clock();
        assert!(cache.put_if_absent_with_lifespan(&key("k"), &key("a"), 10).unwrap());
        assert!(!cache.put_if_absent_with_lifespan(&key("k"), &key("b"), 10).unwrap());
        clock.advance(10);
        assert!(cache
            .put_if_absent_with_lifespan_and_max_idle(&key("k"), &key("c"), 10, 10)
            .unwrap());
        assert_eq!(cache.get(&key("k")).unwrap(), Some(key("c")));
    }

    #[test]
    fn conditional_ops_treat_expired_as_absent() {
        let (cache, clock) = cache_with_clock();
        cache.put_with_lifespan(&key("k"), &key("a"), 10).unwrap();
        clock.advance(10);
        assert!(!cache.replace(&key("k"), &key("b")).unwrap());
        assert!(!cache.remove_if_equals(&key("k"), &key("a")).unwrap());
        assert!(!cache.remove(&key("k")).unwrap());
    }

    // ---- bulk ----

    #[test]
    fn bulk_roundtrip_in_both_modes() {
        for mode in [BulkMode::Native, BulkMode::Async] {
            let cache: MemoryCache<String, String> = MemoryCache::new();
            let entries: HashMap<String, String> = (0..5)
                .map(|i| (format!("k{i}"), format!("v{i}")))
                .collect();
            cache.put_all(&entries, mode).unwrap();

            let mut keys: HashSet<String> = entries.keys().cloned().collect();
            keys.insert(key("absent"));
            let fetched = cache.get_all(&keys, mode).unwrap();
            assert_eq!(fetched, entries);

            cache.remove_all(&keys, mode).unwrap();
            assert!(cache.is_empty());
            assert_eq!(cache.bulk_calls(mode), 3);
        }
    }

    #[test]
    fn bulk_calls_are_counted_per_mode() {
        let cache: MemoryCache<String, String> = MemoryCache::new();
        cache.get_all(&HashSet::new(), BulkMode::Async).unwrap();
        assert_eq!(cache.bulk_calls(BulkMode::Async), 1);
        assert_eq!(cache.bulk_calls(BulkMode::Native), 0);
    }

    // ---- streaming ----

    #[test]
    fn stream_roundtrip() {
        let cache: MemoryCache<String, Vec<u8>> = MemoryCache::new();
        let mut sink = cache.put_via_stream(&key("blob")).unwrap();
        sink.write_all(b"hello ").unwrap();
        sink.write_all(b"world").unwrap();
        sink.commit().unwrap();

        let mut source = cache.get_via_stream(&key("blob")).unwrap().unwrap();
        let mut read_back = Vec::new();
        source.read_to_end(&mut read_back).unwrap();
        assert_eq!(read_back, b"hello world");
    }

    #[test]
    fn uncommitted_sink_stores_nothing() {
        let cache: MemoryCache<String, Vec<u8>> = MemoryCache::new();
        {
            let mut sink = cache.put_via_stream(&key("blob")).unwrap();
            sink.write_all(b"partial").unwrap();
        }
        assert!(cache.get_via_stream(&key("blob")).unwrap().is_none());
    }

    #[test]
    fn expiry_policy_from_millis() {
        assert_eq!(ExpiryPolicy::from_millis(-5, -1), ExpiryPolicy::NONE);
        let policy = ExpiryPolicy::from_millis(100, 20);
        assert_eq!(policy.ttl_millis, 100);
        assert_eq!(policy.max_idle_millis, 20);
    }
}
