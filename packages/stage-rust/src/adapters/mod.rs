//! Capability adapters shipped with the stage.
//!
//! Product bindings live outside this crate; [`MemoryCache`] is the in-process
//! reference implementation used for tests and smoke runs.

mod memory;

pub use memory::{ExpiryPolicy, MemoryCache};
