//! Creators Hub admin - the back-office client.
//!
//! Everything the admin console views need: product CRUD, order
//! management, the customer/team list, analytics, and settings updates.
//! Every call here requires an admin bearer token; the role check a view
//! performs before offering these commands is a UX convenience only - the
//! backend authorizes each request itself.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod hub;
pub mod types;

pub use hub::{AdminClient, AdminError};
pub use types::{AnalyticsReport, DailyRevenue, OrderStatusBucket, TopProduct};
