//! ShopLite storefront library.
//!
//! A client-side storefront core: static product catalog, persistent
//! shopping cart, simulated checkout with single-slot order tracking, and a
//! scripted support chat. All state lives as whole JSON documents in a
//! synchronous key-value store injected at construction time; there is no
//! server, no network protocol, and no authentication.
//!
//! The presentation layer is expected to call the store APIs in response to
//! user actions and re-render from the values they return - mutators hand
//! back fresh derived aggregates so views never have to re-query.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod orders;
pub mod state;
pub mod storage;

pub use state::Storefront;
