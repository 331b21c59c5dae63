//! Wiring for the storefront stores.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::catalog::{Catalog, Product};
use crate::chat::ChatStore;
use crate::config::StoreConfig;
use crate::error::Result;
use crate::orders::OrderStore;
use crate::storage::{FileKv, KvStore, MemoryKv};

/// The assembled storefront: one storage backend shared by every store.
///
/// Cheaply cloneable; clones address the same keys on the same backend, so
/// they observe each other's writes. The catalog is fixed at construction.
#[derive(Clone)]
pub struct Storefront {
    catalog: Arc<Catalog>,
    cart: CartStore,
    orders: OrderStore,
    chat: ChatStore,
    featured_count: usize,
}

impl Storefront {
    /// Open a file-backed storefront under `config.data_dir` with the demo
    /// catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let backend: Arc<dyn KvStore> = Arc::new(FileKv::open(config.data_dir.clone())?);
        Ok(Self::assemble(
            backend,
            Catalog::default(),
            config.featured_count,
        ))
    }

    /// Build a storefront over an injected backend, so tests can supply an
    /// in-memory fake instead of a real persistent medium.
    #[must_use]
    pub fn with_backend(backend: Arc<dyn KvStore>, catalog: Catalog) -> Self {
        let featured_count = StoreConfig::default().featured_count;
        Self::assemble(backend, catalog, featured_count)
    }

    /// In-memory storefront with the demo catalog, for tests and demos.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryKv::new()), Catalog::default())
    }

    fn assemble(backend: Arc<dyn KvStore>, catalog: Catalog, featured_count: usize) -> Self {
        let catalog = Arc::new(catalog);
        let cart = CartStore::new(backend.clone(), catalog.clone());
        let orders = OrderStore::new(backend.clone());
        let chat = ChatStore::new(backend);
        Self {
            catalog,
            cart,
            orders,
            chat,
            featured_count,
        }
    }

    /// The product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The cart store.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The order store.
    #[must_use]
    pub const fn orders(&self) -> &OrderStore {
        &self.orders
    }

    /// The support-chat store.
    #[must_use]
    pub const fn chat(&self) -> &ChatStore {
        &self.chat
    }

    /// The products featured on the home page.
    #[must_use]
    pub fn featured(&self) -> &[Product] {
        self.catalog.featured(self.featured_count)
    }
}
