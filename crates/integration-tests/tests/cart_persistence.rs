//! Integration tests for cart persistence and degradation.
//!
//! Covers round-trips through both storage backends and the fail-soft
//! handling of corrupt documents.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rust_decimal::Decimal;
use shoplite_core::ProductId;
use shoplite_integration_tests::TestContext;
use shoplite_storefront::Storefront;
use shoplite_storefront::cart::CartUpdate;
use shoplite_storefront::catalog::Catalog;
use shoplite_storefront::storage::{CART_KEY, FileKv, KvStore};

// =============================================================================
// Round-Trip Tests
// =============================================================================

#[test]
fn test_cart_survives_reopening_a_file_backend() {
    let dir = tempfile::tempdir().unwrap();

    {
        let backend: Arc<dyn KvStore> = Arc::new(FileKv::open(dir.path()).unwrap());
        let store = Storefront::with_backend(backend, Catalog::default());
        store.cart().add_item(&ProductId::new("p1"), 1).unwrap();
        store.cart().add_item(&ProductId::new("p4"), 3).unwrap();
    }

    // A fresh storefront over the same directory sees the same cart.
    let backend: Arc<dyn KvStore> = Arc::new(FileKv::open(dir.path()).unwrap());
    let store = Storefront::with_backend(backend, Catalog::default());
    let items = store.cart().items().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id.as_str(), "p1");
    assert_eq!(items[1].qty, 3);
    assert_eq!(store.cart().count().unwrap(), 4);
}

#[test]
fn test_cart_document_round_trips_structurally() {
    let ctx = TestContext::new();
    let cart = ctx.store.cart();
    cart.add_item(&ProductId::new("p2"), 2).unwrap();
    cart.add_item(&ProductId::new("p3"), 1).unwrap();
    let before = cart.items().unwrap();

    // Re-read through the adapter; structural equality must hold.
    let raw = ctx.backend.get(CART_KEY).unwrap().unwrap();
    let reloaded: Vec<shoplite_storefront::cart::CartLineItem> =
        serde_json::from_str(&raw).unwrap();
    assert_eq!(reloaded, before);
}

// =============================================================================
// Degradation Tests
// =============================================================================

#[test]
fn test_malformed_cart_document_reads_as_empty() {
    let ctx = TestContext::new();
    ctx.backend.set(CART_KEY, "{definitely not json").unwrap();

    assert!(ctx.store.cart().items().unwrap().is_empty());
    assert_eq!(ctx.store.cart().count().unwrap(), 0);
    assert_eq!(ctx.store.cart().subtotal().unwrap(), Decimal::ZERO);
}

#[test]
fn test_mutating_after_corruption_starts_fresh() {
    let ctx = TestContext::new();
    ctx.backend.set(CART_KEY, "[[[").unwrap();

    ctx.store.cart().add_item(&ProductId::new("p1"), 1).unwrap();
    let items = ctx.store.cart().items().unwrap();
    assert_eq!(items.len(), 1);
}

// =============================================================================
// Mutation Sequence Tests
// =============================================================================

#[test]
fn test_badge_refresh_comes_from_returned_totals() {
    let ctx = TestContext::new();
    let cart = ctx.store.cart();

    // The presentation layer re-renders its badge from the totals each
    // mutator returns, never from a cached value.
    let CartUpdate::Changed(totals) = cart.add_item(&ProductId::new("p1"), 2).unwrap() else {
        panic!("expected a change");
    };
    assert_eq!(totals.count, 2);

    let CartUpdate::Changed(totals) = cart.set_quantity(&ProductId::new("p1"), 9).unwrap() else {
        panic!("expected a change");
    };
    assert_eq!(totals.count, 9);

    let CartUpdate::Changed(totals) = cart.remove_item(&ProductId::new("p1")).unwrap() else {
        panic!("expected a change");
    };
    assert_eq!(totals.count, 0);
    assert_eq!(totals.subtotal, Decimal::ZERO);
}

#[test]
fn test_mixed_sequence_keeps_one_line_per_product() {
    let ctx = TestContext::new();
    let cart = ctx.store.cart();

    cart.add_item(&ProductId::new("p1"), 1).unwrap();
    cart.add_item(&ProductId::new("p2"), 2).unwrap();
    cart.set_quantity(&ProductId::new("p1"), 4).unwrap();
    cart.add_item(&ProductId::new("p1"), 1).unwrap();
    cart.remove_item(&ProductId::new("p2")).unwrap();
    cart.add_item(&ProductId::new("p2"), 7).unwrap();

    let items = cart.items().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id.as_str(), "p1");
    assert_eq!(items[0].qty, 5);
    assert_eq!(items[1].id.as_str(), "p2");
    assert_eq!(items[1].qty, 7);
}

#[test]
fn test_clear_removes_the_document_entirely() {
    let ctx = TestContext::new();
    let cart = ctx.store.cart();
    cart.add_item(&ProductId::new("p1"), 1).unwrap();
    assert!(ctx.backend.get(CART_KEY).unwrap().is_some());

    cart.clear().unwrap();
    assert!(ctx.backend.get(CART_KEY).unwrap().is_none());
}
