//! Creators Hub Core - Shared types library.
//!
//! This crate provides common types used across all Creators Hub components:
//! - `storefront` - Customer-facing state layer (gateway client, stores)
//! - `admin` - Back-office client (product CRUD, orders, team, analytics)
//! - `cli` - Command-line surface for the storefront and admin views
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, money/currency, statuses, and the
//!   catalog/order/settings domain model shared with the Hub backend

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod commerce;
pub mod types;

pub use types::*;
