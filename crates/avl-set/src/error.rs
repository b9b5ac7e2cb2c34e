use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AvlSetError {
    /// A cursor was moved before the first element.
    #[error("cursor out of range")]
    OutOfRange,
    /// Growing node storage failed; the set is left as it was.
    #[error("node allocation failed: {0}")]
    AllocationFailed(#[from] TryReserveError),
    /// Every `u32` slot index is in use.
    #[error("arena slot indices exhausted")]
    SlotsExhausted,
}
