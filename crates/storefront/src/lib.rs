//! Creators Hub storefront - the customer-facing state layer.
//!
//! Everything the views need sits behind [`state::AppState`]:
//!
//! - [`hub`] - REST gateway client for the Hub backend (one method per
//!   endpoint, unified error channel, bearer auth)
//! - [`storage`] - durable client-side key-value storage (session and cart
//!   survive restarts, independently of each other)
//! - [`stores`] - session, cart, and settings stores (single logical owner
//!   mutates, observers subscribe to snapshots)
//! - [`checkout`] - turns the cart into an order draft and places it
//!
//! The rendering layer is out of scope; the `creators-hub-cli` crate is the
//! view surface that consumes this one.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod hub;
pub mod models;
pub mod state;
pub mod storage;
pub mod stores;

pub use config::HubConfig;
pub use hub::{HubClient, HubError};
pub use state::AppState;
