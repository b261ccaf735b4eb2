//! Interned statistic bucket identities.
//!
//! An [`Operation`] names the bucket a benchmark invocation is recorded under
//! (`"GET"`, `"PUT-tx"`, `"GET_ALL-Async-tx"`). Operations are interned in a
//! process-wide registry: registering or deriving the same name twice yields
//! the same identity, so buckets are determined by content rather than by the
//! instance that produced them.
//!
//! # Derivation
//!
//! [`Operation::derive`] appends a suffix to a parent name using
//! [`SUFFIX_SEPARATOR`]. Suffixes may not contain the separator, which makes
//! every derived name split back into exactly one `(parent, suffix)` pair:
//! distinct pairs can never produce the same bucket.
//!
//! Definitions are allocated once and live for the rest of the process, which
//! lets [`Operation`] be a `Copy` handle that compares by id.

use std::cmp::Ordering as CmpOrdering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use dashmap::DashMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Separator placed between a parent name and a derivation suffix.
pub const SUFFIX_SEPARATOR: char = '-';

/// Registered definition behind an [`Operation`] handle.
#[derive(Debug)]
struct OperationDef {
    id: u32,
    name: Box<str>,
    parent: Option<Operation>,
    suffix: Option<Box<str>>,
}

/// Process-wide intern table keyed by operation name.
struct Registry {
    by_name: DashMap<Box<str>, Operation>,
    next_id: AtomicU32,
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| Registry {
    by_name: DashMap::new(),
    next_id: AtomicU32::new(0),
});

impl Registry {
    fn intern(&self, name: &str, parent: Option<Operation>, suffix: Option<&str>) -> Operation {
        if let Some(existing) = self.by_name.get(name) {
            return *existing;
        }

        // The entry lock serializes concurrent first registrations of one name.
        *self.by_name.entry(name.into()).or_insert_with(|| {
            let id = self.next_id.fetch_add(1, Ordering::Relaxed);
            let def: &'static OperationDef = Box::leak(Box::new(OperationDef {
                id,
                name: name.into(),
                parent,
                suffix: suffix.map(Into::into),
            }));
            tracing::debug!(name = name, id = id, "registered operation");
            Operation { def }
        })
    }
}

/// Interned, immutable identity of a statistic bucket.
///
/// Cheap to copy and compare. Equality and hashing use the registry id;
/// ordering uses the name so that reports list buckets deterministically.
#[derive(Clone, Copy)]
pub struct Operation {
    def: &'static OperationDef,
}

impl Operation {
    /// Registers (or looks up) an operation by its full name.
    ///
    /// A name containing [`SUFFIX_SEPARATOR`] with text on both sides is
    /// split at the last separator and registered as that derivation, so
    /// `register("PUT-tx")` and `register("PUT").derive("tx")` agree on
    /// parent and suffix whichever runs first.
    #[must_use]
    pub fn register(name: &str) -> Self {
        match name.rsplit_once(SUFFIX_SEPARATOR) {
            Some((parent, suffix)) if !parent.is_empty() && !suffix.is_empty() => {
                Self::register(parent).derive(suffix)
            }
            _ => REGISTRY.intern(name, None, None),
        }
    }

    /// Derives the operation `"{self}-{suffix}"`.
    ///
    /// Deterministic and idempotent: the same `(self, suffix)` pair always
    /// yields the same identity.
    ///
    /// # Panics
    ///
    /// Panics if `suffix` is empty or contains [`SUFFIX_SEPARATOR`]. Suffixes
    /// are static program text, so either case is a programming error.
    #[must_use]
    pub fn derive(self, suffix: &str) -> Self {
        assert!(
            !suffix.is_empty() && !suffix.contains(SUFFIX_SEPARATOR),
            "invalid operation suffix {suffix:?}"
        );
        let name = format!("{}{SUFFIX_SEPARATOR}{suffix}", self.name());
        REGISTRY.intern(&name, Some(self), Some(suffix))
    }

    /// Looks up a registered operation by its full name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        REGISTRY.by_name.get(name).map(|op| *op)
    }

    /// All operations registered so far, in registration order.
    #[must_use]
    pub fn registered() -> Vec<Self> {
        let mut all: Vec<Self> = REGISTRY.by_name.iter().map(|op| *op).collect();
        all.sort_by_key(|op| op.id());
        all
    }

    /// Registry id, unique within the process.
    #[must_use]
    pub fn id(self) -> u32 {
        self.def.id
    }

    /// Full bucket name.
    #[must_use]
    pub fn name(self) -> &'static str {
        &self.def.name
    }

    /// The operation this one was derived from, if any.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.def.parent
    }

    /// The suffix used to derive this operation, if any.
    #[must_use]
    pub fn suffix(self) -> Option<&'static str> {
        self.def.suffix.as_deref()
    }

    /// Whether this operation was produced by [`Operation::derive`].
    #[must_use]
    pub fn is_derived(self) -> bool {
        self.def.parent.is_some()
    }

    /// The base operation at the top of the derivation chain.
    #[must_use]
    pub fn root(self) -> Self {
        let mut current = self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        self.def.id == other.def.id
    }
}

impl Eq for Operation {}

impl Hash for Operation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.def.id.hash(state);
    }
}

impl Ord for Operation {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.name().cmp(other.name())
    }
}

impl PartialOrd for Operation {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Operation").field(&self.name()).finish()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Operation::by_name(&name)
            .ok_or_else(|| de::Error::custom(format!("unknown operation {name:?}")))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn register_is_idempotent() {
        let a = Operation::register("TEST_REGISTER");
        let b = Operation::register("TEST_REGISTER");
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
        assert_eq!(a.name(), "TEST_REGISTER");
        assert!(!a.is_derived());
    }

    #[test]
    fn derive_appends_suffix() {
        let get = Operation::register("TEST_DERIVE_GET");
        let null = get.derive("Null");
        assert_eq!(null.name(), "TEST_DERIVE_GET-Null");
        assert_eq!(null.parent(), Some(get));
        assert_eq!(null.suffix(), Some("Null"));
        assert!(null.is_derived());
    }

    #[test]
    fn derive_is_referentially_stable() {
        let put = Operation::register("TEST_STABLE_PUT");
        assert_eq!(put.derive("tx"), put.derive("tx"));
        assert_ne!(put.derive("tx"), put);
    }

    #[test]
    fn derived_chain_resolves_root() {
        let get_all = Operation::register("TEST_CHAIN_GET_ALL");
        let async_tx = get_all.derive("Async").derive("tx");
        assert_eq!(async_tx.name(), "TEST_CHAIN_GET_ALL-Async-tx");
        assert_eq!(async_tx.root(), get_all);
        assert_eq!(async_tx.parent(), Some(get_all.derive("Async")));
    }

    #[test]
    fn by_name_finds_derived_operation() {
        let op = Operation::register("TEST_LOOKUP").derive("Null");
        assert_eq!(Operation::by_name("TEST_LOOKUP-Null"), Some(op));
        assert_eq!(Operation::by_name("TEST_LOOKUP-Missing"), None);
    }

    #[test]
    fn registered_contains_new_operations_in_id_order() {
        let first = Operation::register("TEST_LIST_A");
        let second = first.derive("x");
        let all = Operation::registered();
        let pos_first = all.iter().position(|op| *op == first).unwrap();
        let pos_second = all.iter().position(|op| *op == second).unwrap();
        assert!(pos_first < pos_second);
    }

    #[test]
    fn register_of_derived_name_returns_derived_identity() {
        let derived = Operation::register("TEST_ALIAS").derive("tx");
        let by_register = Operation::register("TEST_ALIAS-tx");
        assert_eq!(derived, by_register);
        assert!(by_register.is_derived());
    }

    #[test]
    fn register_before_derive_keeps_lineage() {
        let by_register = Operation::register("TEST_LINEAGE-Async-tx");
        let base = Operation::register("TEST_LINEAGE");
        let derived = base.derive("Async").derive("tx");
        assert_eq!(by_register, derived);
        assert_eq!(derived.parent(), Some(base.derive("Async")));
        assert_eq!(derived.suffix(), Some("tx"));
        assert!(derived.is_derived());
        assert_eq!(derived.root(), base);
        assert!(!base.is_derived());
    }

    #[test]
    fn register_keeps_edge_separators_in_base_names() {
        let leading = Operation::register("-TEST_EDGE");
        let trailing = Operation::register("TEST_EDGE-");
        assert!(!leading.is_derived());
        assert!(!trailing.is_derived());
        assert_eq!(trailing.name(), "TEST_EDGE-");
    }

    #[test]
    #[should_panic(expected = "invalid operation suffix")]
    fn derive_rejects_separator_in_suffix() {
        let _ = Operation::register("TEST_BAD_SUFFIX").derive("a-b");
    }

    #[test]
    #[should_panic(expected = "invalid operation suffix")]
    fn derive_rejects_empty_suffix() {
        let _ = Operation::register("TEST_EMPTY_SUFFIX").derive("");
    }

    #[test]
    fn display_and_debug_use_name() {
        let op = Operation::register("TEST_FMT").derive("Null");
        assert_eq!(op.to_string(), "TEST_FMT-Null");
        assert_eq!(format!("{op:?}"), "Operation(\"TEST_FMT-Null\")");
    }

    #[test]
    fn ordering_follows_name() {
        let a = Operation::register("TEST_ORD_A");
        let b = Operation::register("TEST_ORD_B");
        assert!(a < b);
    }

    #[test]
    fn serde_roundtrip_preserves_identity() {
        let op = Operation::register("TEST_SERDE").derive("tx");
        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(json, "\"TEST_SERDE-tx\"");
        let decoded: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, op);
    }

    #[test]
    fn deserialize_rejects_unregistered_names() {
        let err = serde_json::from_str::<Operation>("\"TEST_NEVER_REGISTERED\"").unwrap_err();
        assert!(err.to_string().contains("unknown operation"));
        assert_eq!(Operation::by_name("TEST_NEVER_REGISTERED"), None);
    }

    #[test]
    fn concurrent_registration_yields_single_identity() {
        let ids: Vec<u32> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| Operation::register("TEST_CONCURRENT").derive("tx").id()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
    }

    proptest! {
        #[test]
        fn derive_is_deterministic(base in "PROP_[A-Z_]{1,12}", suffix in "[A-Za-z]{1,8}") {
            let op = Operation::register(&base);
            let first = op.derive(&suffix);
            let second = Operation::register(&base).derive(&suffix);
            prop_assert_eq!(first, second);
            prop_assert_eq!(first.name(), format!("{base}-{suffix}"));
        }

        #[test]
        fn distinct_suffixes_never_collide(
            base in "PROP_[A-Z_]{1,12}",
            a in "[A-Za-z]{1,8}",
            b in "[A-Za-z]{1,8}",
        ) {
            prop_assume!(a != b);
            let op = Operation::register(&base);
            prop_assert_ne!(op.derive(&a), op.derive(&b));
        }

        #[test]
        fn distinct_parents_never_collide(
            a in "PROP_[A-Z_]{1,12}",
            b in "PROP_[A-Z_]{1,12}",
            suffix in "[A-Za-z]{1,8}",
        ) {
            prop_assume!(a != b);
            let left = Operation::register(&a).derive(&suffix);
            let right = Operation::register(&b).derive(&suffix);
            prop_assert_ne!(left, right);
        }
    }
}
