//! Plain key/value invocations over [`BasicCache`].

use std::sync::LazyLock;

use gridbench_core::operations::{basic, NULL_SUFFIX, TX_SUFFIX};
use gridbench_core::{BasicCache, Operation};

use super::Invocation;
use crate::error::InvocationError;

/// Bucket for a `GET` that found no entry.
pub static GET_NULL: LazyLock<Operation> = LazyLock::new(|| basic::GET.derive(NULL_SUFFIX));
pub static GET_TX: LazyLock<Operation> = LazyLock::new(|| basic::GET.derive(TX_SUFFIX));
pub static PUT_TX: LazyLock<Operation> = LazyLock::new(|| basic::PUT.derive(TX_SUFFIX));
pub static REMOVE_TX: LazyLock<Operation> = LazyLock::new(|| basic::REMOVE.derive(TX_SUFFIX));
pub static CONTAINS_KEY_TX: LazyLock<Operation> =
    LazyLock::new(|| basic::CONTAINS_KEY.derive(TX_SUFFIX));
pub static GET_AND_PUT_TX: LazyLock<Operation> =
    LazyLock::new(|| basic::GET_AND_PUT.derive(TX_SUFFIX));
pub static GET_AND_REMOVE_TX: LazyLock<Operation> =
    LazyLock::new(|| basic::GET_AND_REMOVE.derive(TX_SUFFIX));

/// Reads one key. Reported as `GET-Null` when the key was absent, so hit and
/// miss latencies land in separate buckets.
pub struct Get<'a, K, V> {
    cache: &'a dyn BasicCache<K, V>,
    key: K,
    found: bool,
}

impl<'a, K, V> Get<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn BasicCache<K, V>, key: K) -> Self {
        Self {
            cache,
            key,
            found: false,
        }
    }
}

impl<K, V> Invocation for Get<'_, K, V> {
    type Output = Option<V>;

    fn invoke(&mut self) -> Result<Option<V>, InvocationError> {
        let value = self.cache.get(&self.key)?;
        self.found = value.is_some();
        Ok(value)
    }

    fn operation(&self) -> Operation {
        if self.found {
            *basic::GET
        } else {
            *GET_NULL
        }
    }

    fn tx_operation(&self) -> Operation {
        *GET_TX
    }
}

pub struct Put<'a, K, V> {
    cache: &'a dyn BasicCache<K, V>,
    key: K,
    value: V,
}

impl<'a, K, V> Put<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn BasicCache<K, V>, key: K, value: V) -> Self {
        Self { cache, key, value }
    }
}

impl<K, V> Invocation for Put<'_, K, V> {
    type Output = ();

    fn invoke(&mut self) -> Result<(), InvocationError> {
        self.cache.put(&self.key, &self.value)?;
        Ok(())
    }

    fn operation(&self) -> Operation {
        *basic::PUT
    }

    fn tx_operation(&self) -> Operation {
        *PUT_TX
    }
}

/// Removes one key; yields whether an entry was removed.
pub struct Remove<'a, K, V> {
    cache: &'a dyn BasicCache<K, V>,
    key: K,
}

impl<'a, K, V> Remove<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn BasicCache<K, V>, key: K) -> Self {
        Self { cache, key }
    }
}

impl<K, V> Invocation for Remove<'_, K, V> {
    type Output = bool;

    fn invoke(&mut self) -> Result<bool, InvocationError> {
        Ok(self.cache.remove(&self.key)?)
    }

    fn operation(&self) -> Operation {
        *basic::REMOVE
    }

    fn tx_operation(&self) -> Operation {
        *REMOVE_TX
    }
}

pub struct ContainsKey<'a, K, V> {
    cache: &'a dyn BasicCache<K, V>,
    key: K,
}

impl<'a, K, V> ContainsKey<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn BasicCache<K, V>, key: K) -> Self {
        Self { cache, key }
    }
}

impl<K, V> Invocation for ContainsKey<'_, K, V> {
    type Output = bool;

    fn invoke(&mut self) -> Result<bool, InvocationError> {
        Ok(self.cache.contains_key(&self.key)?)
    }

    fn operation(&self) -> Operation {
        *basic::CONTAINS_KEY
    }

    fn tx_operation(&self) -> Operation {
        *CONTAINS_KEY_TX
    }
}

/// Stores a value and yields the one it replaced.
pub struct GetAndPut<'a, K, V> {
    cache: &'a dyn BasicCache<K, V>,
    key: K,
    value: V,
}

impl<'a, K, V> GetAndPut<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn BasicCache<K, V>, key: K, value: V) -> Self {
        Self { cache, key, value }
    }
}

impl<K, V> Invocation for GetAndPut<'_, K, V> {
    type Output = Option<V>;

    fn invoke(&mut self) -> Result<Option<V>, InvocationError> {
        Ok(self.cache.get_and_put(&self.key, &self.value)?)
    }

    fn operation(&self) -> Operation {
        *basic::GET_AND_PUT
    }

    fn tx_operation(&self) -> Operation {
        *GET_AND_PUT_TX
    }
}

pub struct GetAndRemove<'a, K, V> {
    cache: &'a dyn BasicCache<K, V>,
    key: K,
}

impl<'a, K, V> GetAndRemove<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn BasicCache<K, V>, key: K) -> Self {
        Self { cache, key }
    }
}

impl<K, V> Invocation for GetAndRemove<'_, K, V> {
    type Output = Option<V>;

    fn invoke(&mut self) -> Result<Option<V>, InvocationError> {
        Ok(self.cache.get_and_remove(&self.key)?)
    }

    fn operation(&self) -> Operation {
        *basic::GET_AND_REMOVE
    }

    fn tx_operation(&self) -> Operation {
        *GET_AND_REMOVE_TX
    }
}
