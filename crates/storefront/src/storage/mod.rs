//! Key-value storage adapter.
//!
//! Each logical entity (cart, last order, chat transcript) lives as a whole
//! JSON document under a fixed key. All operations are synchronous and work
//! whole-document read-modify-write; there are no transactions across keys.
//! A crash between two single-key writes can leave state partially updated,
//! which is acceptable here because each entity lives under one key. Writers
//! to the same key from multiple processes are not coordinated.
//!
//! Malformed payloads never surface as errors: the document helpers degrade
//! them to empty/default values (see [`read_or_default`] and
//! [`read_optional`]), so corrupt storage reads as "nothing stored yet".

mod file;
mod memory;

pub use file::FileKv;
pub use memory::MemoryKv;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

// =============================================================================
// Storage Keys
// =============================================================================

/// Key for the persisted cart document (JSON array of line items).
pub const CART_KEY: &str = "shoplite_cart_v1";
/// Key for the single-slot last-order document.
pub const LAST_ORDER_KEY: &str = "shoplite_last_order_v1";
/// Key for the support-chat transcript.
pub const CHAT_KEY: &str = "shoplite_chat_v1";

// =============================================================================
// Backend Contract
// =============================================================================

/// Errors from the storage backend itself (I/O, serialization).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the persistent medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be serialized for writing.
    #[error("failed to serialize document for key {key}: {source}")]
    Serialize {
        /// Storage key the write was addressed to.
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A synchronous, string-keyed store of whole JSON documents.
///
/// Implementations provide the persistent medium; the free functions in this
/// module layer the JSON document semantics on top.
pub trait KvStore: Send + Sync {
    /// Fetch the raw document under `key`, if present.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the document under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the document under `key`; removing an absent key is a no-op.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// JSON Document Helpers
// =============================================================================

/// Read a document, treating a missing or malformed payload as `T::default()`.
///
/// # Errors
///
/// Returns `StorageError` only when the backend itself fails.
pub fn read_or_default<T>(store: &dyn KvStore, key: &str) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    Ok(read_optional(store, key)?.unwrap_or_default())
}

/// Read a document, treating a missing or malformed payload as `None`.
///
/// # Errors
///
/// Returns `StorageError` only when the backend itself fails.
pub fn read_optional<T>(store: &dyn KvStore, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(key, error = %err, "discarding malformed stored document");
            Ok(None)
        }
    }
}

/// Serialize `value` and overwrite the document under `key`.
///
/// # Errors
///
/// Returns `StorageError` if serialization or the backend write fails.
pub fn write_doc<T>(store: &dyn KvStore, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, &raw)
}
