//! Order lifecycle: checkout, last-order persistence, tracking.
//!
//! Only the most recent order is retained: checkout writes into a single
//! slot, silently replacing whatever was there. A real store would keep a
//! history and look orders up by id; the single slot is the demo stand-in.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use shoplite_core::{OrderId, OrderStatus, money};

use crate::cart::{CartLineItem, CartStore, CartTotals};
use crate::error::{Result, StoreError};
use crate::storage::{self, KvStore, LAST_ORDER_KEY};

/// Flat sales-tax rate applied at checkout: 0.08 (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// An immutable order record created at checkout.
///
/// Once written, `items` and `total` never change; no status mutator exists
/// in the demo storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Human-readable order identifier, e.g. `SL-2026-0827-4521`.
    pub id: OrderId,
    /// Checkout timestamp.
    pub created_at: DateTime<Utc>,
    /// Lifecycle status; checkout always writes `Processing`.
    pub status: OrderStatus,
    /// Tax-inclusive total, rounded half-up to whole cents.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// Frozen copy of the cart lines at checkout time.
    pub items: Vec<CartLineItem>,
}

/// Single-slot store for the most recent order.
#[derive(Clone)]
pub struct OrderStore {
    storage: Arc<dyn KvStore>,
}

impl OrderStore {
    /// Create an order store over the given backend.
    #[must_use]
    pub fn new(storage: Arc<dyn KvStore>) -> Self {
        Self { storage }
    }

    /// Convert the current cart into an order: compute the tax-inclusive
    /// total, persist the order as the sole last order, clear the cart, and
    /// return the new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyCart`] if the cart has no lines, or
    /// `StoreError::Storage` if the backend fails.
    pub fn checkout(&self, cart: &CartStore) -> Result<Order> {
        let items = cart.items()?;
        if items.is_empty() {
            return Err(StoreError::EmptyCart);
        }

        let subtotal = CartTotals::of(&items).subtotal;
        let total = money::round_to_cents(subtotal + subtotal * TAX_RATE);
        let now = Utc::now();
        let order = Order {
            id: generate_order_id(now),
            created_at: now,
            status: OrderStatus::Processing,
            total,
            items,
        };

        storage::write_doc(self.storage.as_ref(), LAST_ORDER_KEY, &order)?;
        cart.clear()?;
        info!(order_id = %order.id, total = %order.total, "order placed");
        Ok(order)
    }

    /// The most recent order, if any. Absent or corrupt stored data reads as
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend fails.
    pub fn last_order(&self) -> Result<Option<Order>> {
        Ok(storage::read_optional(self.storage.as_ref(), LAST_ORDER_KEY)?)
    }

    /// Look up the last order by a candidate id.
    ///
    /// An empty or whitespace candidate matches whatever last order exists
    /// (the tracking page pre-fills the latest id); any other candidate must
    /// equal the stored order id exactly. No order, or a mismatch, is `None`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend fails.
    pub fn track(&self, candidate_id: &str) -> Result<Option<Order>> {
        let Some(order) = self.last_order()? else {
            return Ok(None);
        };
        let candidate = candidate_id.trim();
        if candidate.is_empty() || candidate == order.id.as_str() {
            Ok(Some(order))
        } else {
            Ok(None)
        }
    }
}

/// Generate an order id of the form `SL-YYYY-MMDD-NNNN`.
///
/// The suffix is random in `1000..=9999`; same-day collisions within that
/// 9000-value space are possible and accepted for the demo. A production
/// system needs a monotonic or cryptographically unique id.
fn generate_order_id(now: DateTime<Utc>) -> OrderId {
    let suffix: u32 = rand::rng().random_range(1000..10_000);
    OrderId::new(format!(
        "SL-{}-{:02}{:02}-{suffix}",
        now.year(),
        now.month(),
        now.day()
    ))
}
