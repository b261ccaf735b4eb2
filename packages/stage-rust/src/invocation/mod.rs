//! Executable units of benchmark work.
//!
//! An [`Invocation`] is bound at construction to a borrowed capability object
//! and the arguments of one cache action. Invoking it performs exactly one
//! call on the capability object; afterwards it reports the statistic bucket
//! the call belongs to, both for plain and for transactional execution.
//!
//! Variants are grouped by capability contract:
//!
//! - [`basic`]: `Get`, `Put`, `Remove`, `ContainsKey`, `GetAndPut`, `GetAndRemove`
//! - [`temporal`]: writes carrying a lifespan, or a lifespan and max-idle
//! - [`conditional`]: single-call compare-and-swap primitives
//! - [`bulk`]: batch operations in native or asynchronous mode
//! - [`streaming`]: large values copied through a caller-owned buffer
//!
//! Transactional and derived buckets are process-wide statics, so
//! classification never allocates on the hot path.

pub mod basic;
pub mod bulk;
pub mod conditional;
pub mod streaming;
pub mod temporal;

use gridbench_core::Operation;

use crate::error::InvocationError;

pub use basic::{ContainsKey, Get, GetAndPut, GetAndRemove, Put, Remove};
pub use bulk::{GetAll, PutAll, RemoveAll};
pub use conditional::{GetAndReplace, PutIfAbsent, RemoveConditionally, Replace, ReplaceAny};
pub use streaming::{GetViaStream, PutViaStream};
pub use temporal::{
    GetAndPutWithLifespan, GetAndPutWithLifespanAndMaxIdle, PutIfAbsentWithLifespan,
    PutIfAbsentWithLifespanAndMaxIdle, PutWithLifespan, PutWithLifespanAndMaxIdle,
};

/// One cache action, bound to its capability object and arguments.
///
/// Constructed immediately before dispatch, invoked once by a single worker
/// thread, then discarded.
pub trait Invocation {
    /// Value handed back by the underlying call.
    type Output;

    /// Performs the call. Never retries.
    ///
    /// # Errors
    ///
    /// [`InvocationError::Cache`] carries the capability object's failure
    /// unchanged; [`InvocationError::Stream`] reports a failed byte copy.
    fn invoke(&mut self) -> Result<Self::Output, InvocationError>;

    /// Bucket for this invocation outside a transaction. Only meaningful
    /// after [`Invocation::invoke`] for variants that classify by outcome.
    fn operation(&self) -> Operation;

    /// Bucket for this invocation inside a transaction. Fixed at
    /// construction regardless of outcome.
    fn tx_operation(&self) -> Operation;

    /// Bucket for the given execution context.
    fn operation_for(&self, transactional: bool) -> Operation {
        if transactional {
            self.tx_operation()
        } else {
            self.operation()
        }
    }
}
