//! Persistent shopping cart.
//!
//! The cart is an insertion-ordered list of line items with at most one line
//! per product id. It is read from storage on every query and written back
//! whole on every mutation, so there is no in-memory cache to invalidate.
//! Mutators return the new derived aggregates, letting the presentation
//! layer refresh its badge and summary without a second query.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use shoplite_core::ProductId;

use crate::catalog::{Catalog, Product};
use crate::error::Result;
use crate::storage::{self, CART_KEY, KvStore};

/// Lowest quantity `set_quantity` will store.
pub const MIN_QTY: u32 = 1;
/// Highest quantity `set_quantity` will store.
pub const MAX_QTY: u32 = 99;

/// A cart line, denormalized from the catalog at add-time.
///
/// `id` references a catalog product as a lookup key, not an owning
/// reference; `name`, `price`, and `img` are copies taken when the line was
/// created, so later catalog changes do not alter cart display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product id this line refers to.
    pub id: ProductId,
    /// Product name at add-time.
    pub name: String,
    /// Unit price at add-time.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image reference at add-time.
    pub img: String,
    /// Quantity. `set_quantity` keeps this within `[MIN_QTY, MAX_QTY]`;
    /// the merge path of `add_item` does not clamp (see there).
    pub qty: u32,
}

impl CartLineItem {
    fn from_product(product: &Product, qty: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            img: product.img.clone(),
            qty,
        }
    }

    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.qty)
    }
}

/// Derived cart aggregates, returned by every query and mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of quantities across all lines.
    pub count: u32,
    /// Sum of line totals across all lines.
    pub subtotal: Decimal,
}

impl CartTotals {
    /// Compute the aggregates for a list of lines.
    #[must_use]
    pub fn of(items: &[CartLineItem]) -> Self {
        Self {
            count: items.iter().map(|line| line.qty).sum(),
            subtotal: items.iter().map(CartLineItem::line_total).sum(),
        }
    }
}

/// Outcome of a cart mutation.
///
/// Unknown product ids and absent line items are not errors: the cart is
/// left untouched and `NotFound` is returned, so callers can keep the
/// storefront's quiet no-op behavior while still being able to test for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartUpdate {
    /// The cart changed; carries the new derived aggregates.
    Changed(CartTotals),
    /// The referenced product or line item does not exist; nothing changed.
    NotFound,
}

/// The persistent cart store.
#[derive(Clone)]
pub struct CartStore {
    storage: Arc<dyn KvStore>,
    catalog: Arc<Catalog>,
}

impl CartStore {
    /// Create a cart store over the given backend and catalog.
    #[must_use]
    pub fn new(storage: Arc<dyn KvStore>, catalog: Arc<Catalog>) -> Self {
        Self { storage, catalog }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current cart lines in insertion order. Missing or corrupt stored data
    /// reads as an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend fails.
    pub fn items(&self) -> Result<Vec<CartLineItem>> {
        Ok(storage::read_or_default(self.storage.as_ref(), CART_KEY)?)
    }

    /// Both derived aggregates at once.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend fails.
    pub fn totals(&self) -> Result<CartTotals> {
        Ok(CartTotals::of(&self.items()?))
    }

    /// Sum of quantities across all lines.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend fails.
    pub fn count(&self) -> Result<u32> {
        Ok(self.totals()?.count)
    }

    /// Sum of unit price times quantity across all lines.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend fails.
    pub fn subtotal(&self) -> Result<Decimal> {
        Ok(self.totals()?.subtotal)
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Add `qty` of a product to the cart.
    ///
    /// An unknown product id returns `NotFound` and leaves the cart alone.
    /// If a line for the product already exists its quantity is incremented
    /// *without clamping* - repeated adds can push a line past [`MAX_QTY`],
    /// and only [`set_quantity`](Self::set_quantity) clamps. A new line
    /// denormalizes name, price, and image from the catalog at this instant.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend fails.
    pub fn add_item(&self, id: &ProductId, qty: u32) -> Result<CartUpdate> {
        let Some(product) = self.catalog.lookup(id) else {
            debug!(product_id = %id, "add_item ignored: unknown product");
            return Ok(CartUpdate::NotFound);
        };

        let mut items = self.items()?;
        if let Some(line) = items.iter_mut().find(|line| &line.id == id) {
            line.qty = line.qty.saturating_add(qty);
        } else {
            items.push(CartLineItem::from_product(product, qty));
        }
        self.persist(&items)
    }

    /// Remove the line for a product; `NotFound` if no such line exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend fails.
    pub fn remove_item(&self, id: &ProductId) -> Result<CartUpdate> {
        let mut items = self.items()?;
        let before = items.len();
        items.retain(|line| &line.id != id);
        if items.len() == before {
            return Ok(CartUpdate::NotFound);
        }
        self.persist(&items)
    }

    /// Overwrite a line's quantity, clamped into `[MIN_QTY, MAX_QTY]`;
    /// `NotFound` if no line for the product exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend fails.
    pub fn set_quantity(&self, id: &ProductId, qty: u32) -> Result<CartUpdate> {
        let mut items = self.items()?;
        let Some(line) = items.iter_mut().find(|line| &line.id == id) else {
            return Ok(CartUpdate::NotFound);
        };
        line.qty = qty.clamp(MIN_QTY, MAX_QTY);
        self.persist(&items)
    }

    /// Delete the persisted cart entirely; equivalent to an empty cart
    /// thereafter. Returns the (zeroed) aggregates.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend fails.
    pub fn clear(&self) -> Result<CartTotals> {
        self.storage.delete(CART_KEY)?;
        debug!("cart cleared");
        Ok(CartTotals::default())
    }

    fn persist(&self, items: &[CartLineItem]) -> Result<CartUpdate> {
        storage::write_doc(self.storage.as_ref(), CART_KEY, items)?;
        let totals = CartTotals::of(items);
        debug!(count = totals.count, subtotal = %totals.subtotal, "cart persisted");
        Ok(CartUpdate::Changed(totals))
    }
}
