//! Well-known operations, one family per capability contract.
//!
//! Each constant is registered on first access and shared by every worker for
//! the rest of the process. Bulk operations come pre-derived into their
//! native and asynchronous forms.

use std::sync::LazyLock;

use crate::operation::Operation;

/// Suffix for reads that found no entry.
pub const NULL_SUFFIX: &str = "Null";
/// Suffix for operations executed inside a transaction.
pub const TX_SUFFIX: &str = "tx";
/// Suffix for bulk operations executed through the product's own bulk API.
pub const NATIVE_SUFFIX: &str = "Native";
/// Suffix for bulk operations driven by concurrent single-key requests.
pub const ASYNC_SUFFIX: &str = "Async";

/// Operations of [`BasicCache`](crate::traits::BasicCache).
pub mod basic {
    use super::{LazyLock, Operation};

    pub static GET: LazyLock<Operation> = LazyLock::new(|| Operation::register("GET"));
    pub static PUT: LazyLock<Operation> = LazyLock::new(|| Operation::register("PUT"));
    pub static REMOVE: LazyLock<Operation> = LazyLock::new(|| Operation::register("REMOVE"));
    pub static CONTAINS_KEY: LazyLock<Operation> =
        LazyLock::new(|| Operation::register("CONTAINS_KEY"));
    pub static GET_AND_PUT: LazyLock<Operation> =
        LazyLock::new(|| Operation::register("GET_AND_PUT"));
    pub static GET_AND_REMOVE: LazyLock<Operation> =
        LazyLock::new(|| Operation::register("GET_AND_REMOVE"));
}

/// Operations of [`ConditionalCache`](crate::traits::ConditionalCache).
pub mod conditional {
    use super::{LazyLock, Operation};

    pub static PUT_IF_ABSENT: LazyLock<Operation> =
        LazyLock::new(|| Operation::register("PUT_IF_ABSENT"));
    pub static REMOVE: LazyLock<Operation> =
        LazyLock::new(|| Operation::register("REMOVE_CONDITIONALLY"));
    pub static REPLACE: LazyLock<Operation> = LazyLock::new(|| Operation::register("REPLACE"));
    pub static REPLACE_ANY: LazyLock<Operation> =
        LazyLock::new(|| Operation::register("REPLACE_ANY"));
    pub static GET_AND_REPLACE: LazyLock<Operation> =
        LazyLock::new(|| Operation::register("GET_AND_REPLACE"));
}

/// Operations of [`TemporalCache`](crate::traits::TemporalCache).
pub mod temporal {
    use super::{LazyLock, Operation};

    pub static PUT_WITH_LIFESPAN: LazyLock<Operation> =
        LazyLock::new(|| Operation::register("PUT_WITH_LIFESPAN"));
    pub static PUT_WITH_LIFESPAN_AND_MAXIDLE: LazyLock<Operation> =
        LazyLock::new(|| Operation::register("PUT_WITH_LIFESPAN_AND_MAXIDLE"));
    pub static GET_AND_PUT_WITH_LIFESPAN: LazyLock<Operation> =
        LazyLock::new(|| Operation::register("GET_AND_PUT_WITH_LIFESPAN"));
    pub static GET_AND_PUT_WITH_LIFESPAN_AND_MAXIDLE: LazyLock<Operation> =
        LazyLock::new(|| Operation::register("GET_AND_PUT_WITH_LIFESPAN_AND_MAXIDLE"));
    pub static PUT_IF_ABSENT_WITH_LIFESPAN: LazyLock<Operation> =
        LazyLock::new(|| Operation::register("PUT_IF_ABSENT_WITH_LIFESPAN"));
    pub static PUT_IF_ABSENT_WITH_LIFESPAN_AND_MAXIDLE: LazyLock<Operation> =
        LazyLock::new(|| Operation::register("PUT_IF_ABSENT_WITH_LIFESPAN_AND_MAXIDLE"));
}

/// Operations of [`BulkCache`](crate::traits::BulkCache).
///
/// The undecorated constants are never reported directly; invocations report
/// the mode-specific derivations.
pub mod bulk {
    use super::{LazyLock, Operation, ASYNC_SUFFIX, NATIVE_SUFFIX};

    pub static GET_ALL: LazyLock<Operation> = LazyLock::new(|| Operation::register("GET_ALL"));
    pub static PUT_ALL: LazyLock<Operation> = LazyLock::new(|| Operation::register("PUT_ALL"));
    pub static REMOVE_ALL: LazyLock<Operation> =
        LazyLock::new(|| Operation::register("REMOVE_ALL"));

    pub static GET_ALL_NATIVE: LazyLock<Operation> =
        LazyLock::new(|| GET_ALL.derive(NATIVE_SUFFIX));
    pub static GET_ALL_ASYNC: LazyLock<Operation> = LazyLock::new(|| GET_ALL.derive(ASYNC_SUFFIX));
    pub static PUT_ALL_NATIVE: LazyLock<Operation> =
        LazyLock::new(|| PUT_ALL.derive(NATIVE_SUFFIX));
    pub static PUT_ALL_ASYNC: LazyLock<Operation> = LazyLock::new(|| PUT_ALL.derive(ASYNC_SUFFIX));
    pub static REMOVE_ALL_NATIVE: LazyLock<Operation> =
        LazyLock::new(|| REMOVE_ALL.derive(NATIVE_SUFFIX));
    pub static REMOVE_ALL_ASYNC: LazyLock<Operation> =
        LazyLock::new(|| REMOVE_ALL.derive(ASYNC_SUFFIX));
}

/// Operations of [`StreamingCache`](crate::traits::StreamingCache).
pub mod streaming {
    use super::{LazyLock, Operation};

    pub static GET: LazyLock<Operation> = LazyLock::new(|| Operation::register("GET_VIA_STREAM"));
    pub static PUT: LazyLock<Operation> = LazyLock::new(|| Operation::register("PUT_VIA_STREAM"));
}
