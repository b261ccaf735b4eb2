//! Compare-and-swap invocations over [`ConditionalCache`].
//!
//! Each variant maps to exactly one conditional primitive. None of them read
//! first and then write; atomicity belongs to the adapter.

use std::sync::LazyLock;

use gridbench_core::operations::{conditional, TX_SUFFIX};
use gridbench_core::{ConditionalCache, Operation};

use super::Invocation;
use crate::error::InvocationError;

pub static PUT_IF_ABSENT_TX: LazyLock<Operation> =
    LazyLock::new(|| conditional::PUT_IF_ABSENT.derive(TX_SUFFIX));
pub static REMOVE_CONDITIONALLY_TX: LazyLock<Operation> =
    LazyLock::new(|| conditional::REMOVE.derive(TX_SUFFIX));
pub static REPLACE_TX: LazyLock<Operation> =
    LazyLock::new(|| conditional::REPLACE.derive(TX_SUFFIX));
pub static REPLACE_ANY_TX: LazyLock<Operation> =
    LazyLock::new(|| conditional::REPLACE_ANY.derive(TX_SUFFIX));
pub static GET_AND_REPLACE_TX: LazyLock<Operation> =
    LazyLock::new(|| conditional::GET_AND_REPLACE.derive(TX_SUFFIX));

/// Stores the value only if the key has no entry.
pub struct PutIfAbsent<'a, K, V> {
    cache: &'a dyn ConditionalCache<K, V>,
    key: K,
    value: V,
}

impl<'a, K, V> PutIfAbsent<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn ConditionalCache<K, V>, key: K, value: V) -> Self {
        Self { cache, key, value }
    }
}

impl<K, V> Invocation for PutIfAbsent<'_, K, V> {
    type Output = bool;

    fn invoke(&mut self) -> Result<bool, InvocationError> {
        Ok(self.cache.put_if_absent(&self.key, &self.value)?)
    }

    fn operation(&self) -> Operation {
        *conditional::PUT_IF_ABSENT
    }

    fn tx_operation(&self) -> Operation {
        *PUT_IF_ABSENT_TX
    }
}

/// Removes the entry only while it still maps to `expected`.
pub struct RemoveConditionally<'a, K, V> {
    cache: &'a dyn ConditionalCache<K, V>,
    key: K,
    expected: V,
}

impl<'a, K, V> RemoveConditionally<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn ConditionalCache<K, V>, key: K, expected: V) -> Self {
        Self {
            cache,
            key,
            expected,
        }
    }
}

impl<K, V> Invocation for RemoveConditionally<'_, K, V> {
    type Output = bool;

    fn invoke(&mut self) -> Result<bool, InvocationError> {
        Ok(self.cache.remove_if_equals(&self.key, &self.expected)?)
    }

    fn operation(&self) -> Operation {
        *conditional::REMOVE
    }

    fn tx_operation(&self) -> Operation {
        *REMOVE_CONDITIONALLY_TX
    }
}

/// Swaps in `new_value` only while the entry still maps to `expected`.
pub struct Replace<'a, K, V> {
    cache: &'a dyn ConditionalCache<K, V>,
    key: K,
    expected: V,
    new_value: V,
}

impl<'a, K, V> Replace<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn ConditionalCache<K, V>, key: K, expected: V, new_value: V) -> Self {
        Self {
            cache,
            key,
            expected,
            new_value,
        }
    }
}

impl<K, V> Invocation for Replace<'_, K, V> {
    type Output = bool;

    fn invoke(&mut self) -> Result<bool, InvocationError> {
        Ok(self
            .cache
            .replace_if_equals(&self.key, &self.expected, &self.new_value)?)
    }

    fn operation(&self) -> Operation {
        *conditional::REPLACE
    }

    fn tx_operation(&self) -> Operation {
        *REPLACE_TX
    }
}

/// Swaps in `new_value` whenever any entry exists.
pub struct ReplaceAny<'a, K, V> {
    cache: &'a dyn ConditionalCache<K, V>,
    key: K,
    new_value: V,
}

impl<'a, K, V> ReplaceAny<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn ConditionalCache<K, V>, key: K, new_value: V) -> Self {
        Self {
            cache,
            key,
            new_value,
        }
    }
}

impl<K, V> Invocation for ReplaceAny<'_, K, V> {
    type Output = bool;

    fn invoke(&mut self) -> Result<bool, InvocationError> {
        Ok(self.cache.replace(&self.key, &self.new_value)?)
    }

    fn operation(&self) -> Operation {
        *conditional::REPLACE_ANY
    }

    fn tx_operation(&self) -> Operation {
        *REPLACE_ANY_TX
    }
}

pub struct GetAndReplace<'a, K, V> {
    cache: &'a dyn ConditionalCache<K, V>,
    key: K,
    new_value: V,
}

impl<'a, K, V> GetAndReplace<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn ConditionalCache<K, V>, key: K, new_value: V) -> Self {
        Self {
            cache,
            key,
            new_value,
        }
    }
}

impl<K, V> Invocation for GetAndReplace<'_, K, V> {
    type Output = Option<V>;

    fn invoke(&mut self) -> Result<Option<V>, InvocationError> {
        Ok(self.cache.get_and_replace(&self.key, &self.new_value)?)
    }

    fn operation(&self) -> Operation {
        *conditional::GET_AND_REPLACE
    }

    fn tx_operation(&self) -> Operation {
        *GET_AND_REPLACE_TX
    }
}
