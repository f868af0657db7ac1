//! Money and stock arithmetic using rust_decimal
//!
//! All calculations are done using `Decimal` internally, then converted to `f64`
//! for storage/serialization.

use rust_decimal::prelude::*;
use shared::error::{AppError, ErrorCode};

/// Money: 2 decimal places, half away from zero
const MONEY_DP: u32 = 2;
/// Stock quantities: 3 decimal places (grams of a kilogram)
const STOCK_DP: u32 = 3;

/// Maximum allowed unit price
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i64 = 9999;

#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Convert a stock Decimal back to f64, rounded to 3 decimal places
#[inline]
pub fn stock_to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(STOCK_DP, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Line total: unit price × quantity
pub fn line_total(price: f64, quantity: i64) -> Decimal {
    to_decimal(price) * Decimal::from(quantity)
}

/// Validate a unit price: finite, non-negative, bounded
pub fn validate_price(price: f64, field: &str) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::MenuItemInvalidPrice,
            format!("{field} must be a finite, non-negative number"),
        )
        .with_detail("field", field));
    }
    if price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::MenuItemInvalidPrice,
            format!("{field} exceeds maximum allowed ({MAX_PRICE})"),
        )
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate a stock amount: finite and non-negative
pub fn validate_stock(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::InventoryInvalidQuantity,
            format!("{field} must be a finite, non-negative number"),
        )
        .with_detail("field", field));
    }
    Ok(())
}
