//! Unified error handling for the storefront core.
//!
//! Invalid references (unknown product id, absent line item, unmatched order
//! id) are deliberately *not* errors: the stores report them through result
//! variants such as [`CartUpdate::NotFound`](crate::cart::CartUpdate) or
//! `Option::None` so the observed behavior stays a quiet no-op. `StoreError`
//! covers the failures that genuinely abort an operation.

use thiserror::Error;

use crate::storage::StorageError;

/// Application-level error type for the storefront core.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Persistent storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Checkout was attempted on an empty cart.
    #[error("cannot check out an empty cart")]
    EmptyCart,
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
