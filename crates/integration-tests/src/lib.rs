//! Integration tests for ShopLite.
//!
//! The suites under `tests/` drive the public storefront API end to end over
//! an in-memory backend (or a temp-dir file backend); no external services
//! are required.
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart-to-order lifecycle and tracking
//! - `cart_persistence` - Storage round-trips and degradation
//! - `support_chat` - Transcript seeding and scripted replies

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use shoplite_storefront::Storefront;
use shoplite_storefront::catalog::Catalog;
use shoplite_storefront::storage::{KvStore, MemoryKv};

/// Shared context for integration suites.
pub struct TestContext {
    /// Backend handle, kept for direct document inspection.
    pub backend: Arc<MemoryKv>,
    /// Storefront under test.
    pub store: Storefront,
}

impl TestContext {
    /// Storefront over a fresh in-memory backend with the demo catalog.
    #[must_use]
    pub fn new() -> Self {
        init_tracing();
        let backend = Arc::new(MemoryKv::new());
        let injected: Arc<dyn KvStore> = backend.clone();
        let store = Storefront::with_backend(injected, Catalog::default());
        Self { backend, store }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Install a test subscriber once; `RUST_LOG` controls verbosity.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
