//! ShopLite Core - Shared types library.
//!
//! This crate provides common types used across all ShopLite components:
//! - `storefront` - Catalog, cart, order, and support-chat stores
//! - `integration-tests` - End-to-end flow tests
//!
//! # Architecture
//!
//! The core crate contains only types and helpers - no I/O and no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money helpers, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
