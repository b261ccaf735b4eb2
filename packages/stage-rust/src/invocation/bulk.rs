//! Batch invocations over [`BulkCache`].
//!
//! The bucket is chosen by [`BulkMode`] alone and is already final at
//! construction, so it reads the same before and after the call and whether
//! or not the call succeeded.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use gridbench_core::operations::{bulk, TX_SUFFIX};
use gridbench_core::{BulkCache, BulkMode, Operation};

use super::Invocation;
use crate::error::InvocationError;

pub static GET_ALL_NATIVE_TX: LazyLock<Operation> =
    LazyLock::new(|| bulk::GET_ALL_NATIVE.derive(TX_SUFFIX));
pub static GET_ALL_ASYNC_TX: LazyLock<Operation> =
    LazyLock::new(|| bulk::GET_ALL_ASYNC.derive(TX_SUFFIX));
pub static PUT_ALL_NATIVE_TX: LazyLock<Operation> =
    LazyLock::new(|| bulk::PUT_ALL_NATIVE.derive(TX_SUFFIX));
pub static PUT_ALL_ASYNC_TX: LazyLock<Operation> =
    LazyLock::new(|| bulk::PUT_ALL_ASYNC.derive(TX_SUFFIX));
pub static REMOVE_ALL_NATIVE_TX: LazyLock<Operation> =
    LazyLock::new(|| bulk::REMOVE_ALL_NATIVE.derive(TX_SUFFIX));
pub static REMOVE_ALL_ASYNC_TX: LazyLock<Operation> =
    LazyLock::new(|| bulk::REMOVE_ALL_ASYNC.derive(TX_SUFFIX));

/// Picks the bucket pair for `mode` from the native and async statics.
fn classify(
    mode: BulkMode,
    native: &LazyLock<Operation>,
    native_tx: &LazyLock<Operation>,
    async_: &LazyLock<Operation>,
    async_tx: &LazyLock<Operation>,
) -> (Operation, Operation) {
    match mode {
        BulkMode::Native => (**native, **native_tx),
        BulkMode::Async => (**async_, **async_tx),
    }
}

/// Fetches a set of keys; yields the entries that were present.
pub struct GetAll<'a, K, V> {
    cache: &'a dyn BulkCache<K, V>,
    keys: HashSet<K>,
    mode: BulkMode,
    operation: Operation,
    tx_operation: Operation,
}

impl<'a, K, V> GetAll<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn BulkCache<K, V>, mode: BulkMode, keys: HashSet<K>) -> Self {
        let (operation, tx_operation) = classify(
            mode,
            &bulk::GET_ALL_NATIVE,
            &GET_ALL_NATIVE_TX,
            &bulk::GET_ALL_ASYNC,
            &GET_ALL_ASYNC_TX,
        );
        Self {
            cache,
            keys,
            mode,
            operation,
            tx_operation,
        }
    }
}

impl<K, V> Invocation for GetAll<'_, K, V> {
    type Output = HashMap<K, V>;

    fn invoke(&mut self) -> Result<HashMap<K, V>, InvocationError> {
        Ok(self.cache.get_all(&self.keys, self.mode)?)
    }

    fn operation(&self) -> Operation {
        self.operation
    }

    fn tx_operation(&self) -> Operation {
        self.tx_operation
    }
}

pub struct PutAll<'a, K, V> {
    cache: &'a dyn BulkCache<K, V>,
    entries: HashMap<K, V>,
    mode: BulkMode,
    operation: Operation,
    tx_operation: Operation,
}

impl<'a, K, V> PutAll<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn BulkCache<K, V>, mode: BulkMode, entries: HashMap<K, V>) -> Self {
        let (operation, tx_operation) = classify(
            mode,
            &bulk::PUT_ALL_NATIVE,
            &PUT_ALL_NATIVE_TX,
            &bulk::PUT_ALL_ASYNC,
            &PUT_ALL_ASYNC_TX,
        );
        Self {
            cache,
            entries,
            mode,
            operation,
            tx_operation,
        }
    }
}

impl<K, V> Invocation for PutAll<'_, K, V> {
    type Output = ();

    fn invoke(&mut self) -> Result<(), InvocationError> {
        self.cache.put_all(&self.entries, self.mode)?;
        Ok(())
    }

    fn operation(&self) -> Operation {
        self.operation
    }

    fn tx_operation(&self) -> Operation {
        self.tx_operation
    }
}

pub struct RemoveAll<'a, K, V> {
    cache: &'a dyn BulkCache<K, V>,
    keys: HashSet<K>,
    mode: BulkMode,
    operation: Operation,
    tx_operation: Operation,
}

impl<'a, K, V> RemoveAll<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn BulkCache<K, V>, mode: BulkMode, keys: HashSet<K>) -> Self {
        let (operation, tx_operation) = classify(
            mode,
            &bulk::REMOVE_ALL_NATIVE,
            &REMOVE_ALL_NATIVE_TX,
            &bulk::REMOVE_ALL_ASYNC,
            &REMOVE_ALL_ASYNC_TX,
        );
        Self {
            cache,
            keys,
            mode,
            operation,
            tx_operation,
        }
    }
}

impl<K, V> Invocation for RemoveAll<'_, K, V> {
    type Output = ();

    fn invoke(&mut self) -> Result<(), InvocationError> {
        self.cache.remove_all(&self.keys, self.mode)?;
        Ok(())
    }

    fn operation(&self) -> Operation {
        self.operation
    }

    fn tx_operation(&self) -> Operation {
        self.tx_operation
    }
}
