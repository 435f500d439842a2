//! Order pricing.
//!
//! Amounts are whole minor currency units. Each line is discounted and rounded on its
//! own; the order totals are exact sums of the rounded lines.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("discount percentage {0} is outside (0, 100]")]
    InvalidPercentage(Decimal),

    #[error("amount overflow")]
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PricedLine {
    /// `unit_price * quantity`
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderTotals {
    pub subtotal: u64,
    pub discount_total: u64,
    pub total_price: u64,
}

/// Price one line, applying `percentage` off when a discount is active.
///
/// # Errors
///
/// Returns an error if the percentage is not in `(0, 100]` or the amounts overflow.
pub fn price_line(
    unit_price: u64,
    quantity: u32,
    percentage: Option<Decimal>,
) -> Result<PricedLine, PricingError> {
    let subtotal = unit_price
        .checked_mul(u64::from(quantity))
        .ok_or(PricingError::Overflow)?;

    let Some(percentage) = percentage else {
        return Ok(PricedLine {
            subtotal,
            discount: 0,
            total: subtotal,
        });
    };

    if percentage <= Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
        return Err(PricingError::InvalidPercentage(percentage));
    }

    let total = Decimal::from(subtotal)
        .checked_mul(Decimal::ONE_HUNDRED - percentage)
        .and_then(|net| net.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(PricingError::Overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(PricingError::Overflow)?;

    Ok(PricedLine {
        subtotal,
        discount: subtotal - total,
        total,
    })
}

/// Sum priced lines into order totals.
///
/// # Errors
///
/// Returns an error if a sum overflows.
pub fn order_totals<'a>(
    lines: impl IntoIterator<Item = &'a PricedLine>,
) -> Result<OrderTotals, PricingError> {
    lines
        .into_iter()
        .try_fold(OrderTotals::default(), |totals, line| {
            Ok(OrderTotals {
                subtotal: totals
                    .subtotal
                    .checked_add(line.subtotal)
                    .ok_or(PricingError::Overflow)?,
                discount_total: totals
                    .discount_total
                    .checked_add(line.discount)
                    .ok_or(PricingError::Overflow)?,
                total_price: totals
                    .total_price
                    .checked_add(line.total)
                    .ok_or(PricingError::Overflow)?,
            })
        })
}
