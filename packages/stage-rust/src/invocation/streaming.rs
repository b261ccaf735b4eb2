//! Large-value invocations over [`StreamingCache`].
//!
//! Bytes move through a caller-owned buffer that the invocation borrows
//! exclusively, so memory use stays bounded by the buffer size no matter how
//! large the entry is. Sources and sinks are owned boxes: they are dropped on
//! every exit path, and a sink only publishes its bytes once `commit` returns.
//!
//! I/O errors raised during the copy, including [`io::ErrorKind::Interrupted`],
//! are not retried. They surface as [`InvocationError::Stream`].

use std::io::{self, Read, Write};
use std::sync::LazyLock;

use gridbench_core::operations::{basic, streaming, NULL_SUFFIX, TX_SUFFIX};
use gridbench_core::{Operation, StreamingCache};

use super::Invocation;
use crate::error::InvocationError;

/// Bucket for a streaming get whose key had no entry.
pub static STREAM_GET_NULL: LazyLock<Operation> =
    LazyLock::new(|| streaming::GET.derive(NULL_SUFFIX));
pub static STREAM_GET_TX: LazyLock<Operation> =
    LazyLock::new(|| streaming::GET.derive(TX_SUFFIX));
pub static STREAM_PUT_TX: LazyLock<Operation> =
    LazyLock::new(|| streaming::PUT.derive(TX_SUFFIX));

/// Reads `source` to exhaustion through `buffer`, returning the byte count.
fn drain<R: Read + ?Sized>(source: &mut R, buffer: &mut [u8]) -> io::Result<u64> {
    let mut total = 0u64;
    loop {
        let read = source.read(buffer)?;
        if read == 0 {
            return Ok(total);
        }
        total += read as u64;
    }
}

/// Copies `source` into `sink` through `buffer`, returning the byte count.
fn pump<R, W>(source: &mut R, sink: &mut W, buffer: &mut [u8]) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut total = 0u64;
    loop {
        let read = source.read(buffer)?;
        if read == 0 {
            sink.flush()?;
            return Ok(total);
        }
        let mut written = 0;
        while written < read {
            match sink.write(&buffer[written..read])? {
                0 => return Err(io::ErrorKind::WriteZero.into()),
                n => written += n,
            }
        }
        total += read as u64;
    }
}

fn assert_usable(buffer: &[u8]) {
    assert!(!buffer.is_empty(), "transfer buffer must not be empty");
}

/// Streams one entry out of the cache and counts its bytes.
///
/// Yields `None` when the key has no entry; that outcome is reported as
/// `GET_VIA_STREAM-Null`. A present entry is reported under the plain `GET`
/// bucket, even when it holds zero bytes.
pub struct GetViaStream<'a, 'b, K> {
    cache: &'a dyn StreamingCache<K>,
    key: K,
    buffer: &'b mut [u8],
    transferred: Option<u64>,
}

impl<'a, 'b, K> GetViaStream<'a, 'b, K> {
    /// # Panics
    ///
    /// Panics if `buffer` is empty.
    #[must_use]
    pub fn new(cache: &'a dyn StreamingCache<K>, key: K, buffer: &'b mut [u8]) -> Self {
        assert_usable(buffer);
        Self {
            cache,
            key,
            buffer,
            transferred: None,
        }
    }
}

impl<K> Invocation for GetViaStream<'_, '_, K> {
    type Output = Option<u64>;

    fn invoke(&mut self) -> Result<Option<u64>, InvocationError> {
        let Some(mut source) = self.cache.get_via_stream(&self.key)? else {
            return Ok(None);
        };
        let total = drain(&mut *source, self.buffer).map_err(InvocationError::Stream)?;
        self.transferred = Some(total);
        Ok(Some(total))
    }

    fn operation(&self) -> Operation {
        match self.transferred {
            Some(_) => *basic::GET,
            None => *STREAM_GET_NULL,
        }
    }

    fn tx_operation(&self) -> Operation {
        *STREAM_GET_TX
    }
}

/// Streams a caller-supplied source into the cache entry for one key.
///
/// The source is consumed by the first `invoke` and dropped before it
/// returns. The sink is committed only after the whole source was copied.
pub struct PutViaStream<'a, 'b, K, R> {
    cache: &'a dyn StreamingCache<K>,
    key: K,
    source: Option<R>,
    buffer: &'b mut [u8],
}

impl<'a, 'b, K, R: Read> PutViaStream<'a, 'b, K, R> {
    /// # Panics
    ///
    /// Panics if `buffer` is empty.
    #[must_use]
    pub fn new(cache: &'a dyn StreamingCache<K>, key: K, source: R, buffer: &'b mut [u8]) -> Self {
        assert_usable(buffer);
        Self {
            cache,
            key,
            source: Some(source),
            buffer,
        }
    }
}

impl<K, R: Read> Invocation for PutViaStream<'_, '_, K, R> {
    type Output = u64;

    fn invoke(&mut self) -> Result<u64, InvocationError> {
        let mut source = self.source.take().ok_or_else(|| {
            InvocationError::Stream(io::Error::other("stream source already consumed"))
        })?;
        let mut sink = self.cache.put_via_stream(&self.key)?;
        let total =
            pump(&mut source, &mut *sink, self.buffer).map_err(InvocationError::Stream)?;
        sink.commit().map_err(InvocationError::Stream)?;
        Ok(total)
    }

    fn operation(&self) -> Operation {
        *streaming::PUT
    }

    fn tx_operation(&self) -> Operation {
        *STREAM_PUT_TX
    }
}
