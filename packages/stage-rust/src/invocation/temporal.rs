//! Expiry-carrying writes over [`TemporalCache`].
//!
//! Durations are forwarded exactly as constructed. Zero, negative, or
//! out-of-range values are the adapter's to accept or reject.

use std::sync::LazyLock;

use gridbench_core::operations::{temporal, TX_SUFFIX};
use gridbench_core::{Operation, TemporalCache};

use super::Invocation;
use crate::error::InvocationError;

pub static PUT_WITH_LIFESPAN_TX: LazyLock<Operation> =
    LazyLock::new(|| temporal::PUT_WITH_LIFESPAN.derive(TX_SUFFIX));
pub static PUT_WITH_LIFESPAN_AND_MAXIDLE_TX: LazyLock<Operation> =
    LazyLock::new(|| temporal::PUT_WITH_LIFESPAN_AND_MAXIDLE.derive(TX_SUFFIX));
pub static GET_AND_PUT_WITH_LIFESPAN_TX: LazyLock<Operation> =
    LazyLock::new(|| temporal::GET_AND_PUT_WITH_LIFESPAN.derive(TX_SUFFIX));
pub static GET_AND_PUT_WITH_LIFESPAN_AND_MAXIDLE_TX: LazyLock<Operation> =
    LazyLock::new(|| temporal::GET_AND_PUT_WITH_LIFESPAN_AND_MAXIDLE.derive(TX_SUFFIX));
pub static PUT_IF_ABSENT_WITH_LIFESPAN_TX: LazyLock<Operation> =
    LazyLock::new(|| temporal::PUT_IF_ABSENT_WITH_LIFESPAN.derive(TX_SUFFIX));
pub static PUT_IF_ABSENT_WITH_LIFESPAN_AND_MAXIDLE_TX: LazyLock<Operation> =
    LazyLock::new(|| temporal::PUT_IF_ABSENT_WITH_LIFESPAN_AND_MAXIDLE.derive(TX_SUFFIX));

pub struct PutWithLifespan<'a, K, V> {
    cache: &'a dyn TemporalCache<K, V>,
    key: K,
    value: V,
    lifespan_ms: i64,
}

impl<'a, K, V> PutWithLifespan<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn TemporalCache<K, V>, key: K, value: V, lifespan_ms: i64) -> Self {
        Self {
            cache,
            key,
            value,
            lifespan_ms,
        }
    }
}

impl<K, V> Invocation for PutWithLifespan<'_, K, V> {
    type Output = ();

    fn invoke(&mut self) -> Result<(), InvocationError> {
        self.cache
            .put_with_lifespan(&self.key, &self.value, self.lifespan_ms)?;
        Ok(())
    }

    fn operation(&self) -> Operation {
        *temporal::PUT_WITH_LIFESPAN
    }

    fn tx_operation(&self) -> Operation {
        *PUT_WITH_LIFESPAN_TX
    }
}

pub struct PutWithLifespanAndMaxIdle<'a, K, V> {
    cache: &'a dyn TemporalCache<K, V>,
    key: K,
    value: V,
    lifespan_ms: i64,
    max_idle_ms: i64,
}

impl<'a, K, V> PutWithLifespanAndMaxIdle<'a, K, V> {
    #[must_use]
    pub fn new(
        cache: &'a dyn TemporalCache<K, V>,
        key: K,
        value: V,
        lifespan_ms: i64,
        max_idle_ms: i64,
    ) -> Self {
        Self {
            cache,
            key,
            value,
            lifespan_ms,
            max_idle_ms,
        }
    }
}

impl<K, V> Invocation for PutWithLifespanAndMaxIdle<'_, K, V> {
    type Output = ();

    fn invoke(&mut self) -> Result<(), InvocationError> {
        self.cache.put_with_lifespan_and_max_idle(
            &self.key,
            &self.value,
            self.lifespan_ms,
            self.max_idle_ms,
        )?;
        Ok(())
    }

    fn operation(&self) -> Operation {
        *temporal::PUT_WITH_LIFESPAN_AND_MAXIDLE
    }

    fn tx_operation(&self) -> Operation {
        *PUT_WITH_LIFESPAN_AND_MAXIDLE_TX
    }
}

pub struct GetAndPutWithLifespan<'a, K, V> {
    cache: &'a dyn TemporalCache<K, V>,
    key: K,
    value: V,
    lifespan_ms: i64,
}

impl<'a, K, V> GetAndPutWithLifespan<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn TemporalCache<K, V>, key: K, value: V, lifespan_ms: i64) -> Self {
        Self {
            cache,
            key,
            value,
            lifespan_ms,
        }
    }
}

impl<K, V> Invocation for GetAndPutWithLifespan<'_, K, V> {
    type Output = Option<V>;

    fn invoke(&mut self) -> Result<Option<V>, InvocationError> {
        Ok(self
            .cache
            .get_and_put_with_lifespan(&self.key, &self.value, self.lifespan_ms)?)
    }

    fn operation(&self) -> Operation {
        *temporal::GET_AND_PUT_WITH_LIFESPAN
    }

    fn tx_operation(&self) -> Operation {
        *GET_AND_PUT_WITH_LIFESPAN_TX
    }
}

pub struct GetAndPutWithLifespanAndMaxIdle<'a, K, V> {
    cache: &'a dyn TemporalCache<K, V>,
    key: K,
    value: V,
    lifespan_ms: i64,
    max_idle_ms: i64,
}

impl<'a, K, V> GetAndPutWithLifespanAndMaxIdle<'a, K, V> {
    #[must_use]
    pub fn new(
        cache: &'a dyn TemporalCache<K, V>,
        key: K,
        value: V,
        lifespan_ms: i64,
        max_idle_ms: i64,
    ) -> Self {
        Self {
            cache,
            key,
            value,
            lifespan_ms,
            max_idle_ms,
        }
    }
}

impl<K, V> Invocation for GetAndPutWithLifespanAndMaxIdle<'_, K, V> {
    type Output = Option<V>;

    fn invoke(&mut self) -> Result<Option<V>, InvocationError> {
        Ok(self.cache.get_and_put_with_lifespan_and_max_idle(
            &self.key,
            &self.value,
            self.lifespan_ms,
            self.max_idle_ms,
        )?)
    }

    fn operation(&self) -> Operation {
        *temporal::GET_AND_PUT_WITH_LIFESPAN_AND_MAXIDLE
    }

    fn tx_operation(&self) -> Operation {
        *GET_AND_PUT_WITH_LIFESPAN_AND_MAXIDLE_TX
    }
}

pub struct PutIfAbsentWithLifespan<'a, K, V> {
    cache: &'a dyn TemporalCache<K, V>,
    key: K,
    value: V,
    lifespan_ms: i64,
}

impl<'a, K, V> PutIfAbsentWithLifespan<'a, K, V> {
    #[must_use]
    pub fn new(cache: &'a dyn TemporalCache<K, V>, key: K, value: V, lifespan_ms: i64) -> Self {
        Self {
            cache,
            key,
            value,
            lifespan_ms,
        }
    }
}

impl<K, V> Invocation for PutIfAbsentWithLifespan<'_, K, V> {
    type Output = bool;

    fn invoke(&mut self) -> Result<bool, InvocationError> {
        Ok(self
            .cache
            .put_if_absent_with_lifespan(&self.key, &self.value, self.lifespan_ms)?)
    }

    fn operation(&self) -> Operation {
        *temporal::PUT_IF_ABSENT_WITH_LIFESPAN
    }

    fn tx_operation(&self) -> Operation {
        *PUT_IF_ABSENT_WITH_LIFESPAN_TX
    }
}

pub struct PutIfAbsentWithLifespanAndMaxIdle<'a, K, V> {
    cache: &'a dyn TemporalCache<K, V>,
    key: K,
    value: V,
    lifespan_ms: i64,
    max_idle_ms: i64,
}

impl<'a, K, V> PutIfAbsentWithLifespanAndMaxIdle<'a, K, V> {
    #[must_use]
    pub fn new(
        cache: &'a dyn TemporalCache<K, V>,
        key: K,
        value: V,
        lifespan_ms: i64,
        max_idle_ms: i64,
    ) -> Self {
        Self {
            cache,
            key,
            value,
            lifespan_ms,
            max_idle_ms,
        }
    }
}

impl<K, V> Invocation for PutIfAbsentWithLifespanAndMaxIdle<'_, K, V> {
    type Output = bool;

    fn invoke(&mut self) -> Result<bool, InvocationError> {
        Ok(self.cache.put_if_absent_with_lifespan_and_max_idle(
            &self.key,
            &self.value,
            self.lifespan_ms,
            self.max_idle_ms,
        )?)
    }

    fn operation(&self) -> Operation {
        *temporal::PUT_IF_ABSENT_WITH_LIFESPAN_AND_MAXIDLE
    }

    fn tx_operation(&self) -> Operation {
        *PUT_IF_ABSENT_WITH_LIFESPAN_AND_MAXIDLE_TX
    }
}
