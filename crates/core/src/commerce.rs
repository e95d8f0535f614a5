//! Commerce constants shared between checkout and the views.
//!
//! Centralized so the storefront and the stub backend used in tests agree
//! on the same figures.

use rust_decimal::Decimal;

/// Flat shipping cost applied to every order.
#[must_use]
pub fn flat_shipping() -> Decimal {
    Decimal::new(1000, 2) // 10.00
}

/// Tax rate applied at checkout. Currently zero.
#[must_use]
pub fn tax_rate() -> Decimal {
    Decimal::ZERO
}

/// Country used when the shopper does not specify one.
pub const DEFAULT_COUNTRY: &str = "USA";

/// Page size for storefront catalog listings.
pub const STOREFRONT_PAGE_SIZE: u32 = 12;

/// Page size for admin listings.
pub const ADMIN_PAGE_SIZE: u32 = 20;
