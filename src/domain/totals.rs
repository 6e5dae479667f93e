//! Order financial figures derived from an editable line-item list.
//!
//! All functions are pure: the item-list operations return a fresh `Vec`
//! and never touch their input, so callers can detect changes by comparing
//! containers.

use bigdecimal::{BigDecimal, One, RoundingMode, Zero};

use super::errors::DomainError;
use super::order::LineItem;

/// Σ(unit price × quantity). Zero for an empty list.
pub fn subtotal(items: &[LineItem]) -> BigDecimal {
    items
        .iter()
        .fold(BigDecimal::zero(), |acc, item| acc + item.amount())
}

pub fn tax(subtotal: &BigDecimal, rate: &BigDecimal) -> BigDecimal {
    subtotal * rate
}

/// `subtotal × (1 + rate) + shipping_fee`
pub fn grand_total(
    subtotal: &BigDecimal,
    rate: &BigDecimal,
    shipping_fee: &BigDecimal,
) -> BigDecimal {
    subtotal * (BigDecimal::one() + rate) + shipping_fee
}

/// Copy of `items` without the entry whose code is `code`.
///
/// An unknown code yields an unchanged copy; it is logged, not an error.
pub fn remove_item(items: &[LineItem], code: &str) -> Vec<LineItem> {
    let mut remaining = items.to_vec();
    match remaining.iter().position(|item| item.code == code) {
        Some(index) => {
            remaining.remove(index);
        }
        None => log::warn!("No line item with code '{}' to remove", code),
    }
    remaining
}

/// Copy of `items` with `item` appended. Fails if its code is already present.
pub fn add_item(items: &[LineItem], item: LineItem) -> Result<Vec<LineItem>, DomainError> {
    if items.iter().any(|existing| existing.code == item.code) {
        return Err(DomainError::DuplicateItem(item.code));
    }
    let mut extended = Vec::with_capacity(items.len() + 1);
    extended.extend_from_slice(items);
    extended.push(item);
    Ok(extended)
}

/// Round to two decimal places, halves away from zero (`0.125` → `0.13`).
pub fn to_cents(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfUp)
}

/// `value` rounded to cents and written with exactly two decimal places
/// (`0` → `0.00`, `25` → `25.00`, `-1.5` → `-1.50`).
pub fn format_cents(value: &BigDecimal) -> String {
    let (cents, _) = (value * BigDecimal::from(100))
        .with_scale_round(0, RoundingMode::HalfUp)
        .as_bigint_and_exponent();
    if cents.is_zero() {
        return "0.00".to_string();
    }
    let text = cents.to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", text.as_str()),
    };
    let padded = format!("{:0>3}", digits);
    let (units, fraction) = padded.split_at(padded.len() - 2);
    format!("{sign}{units}.{fraction}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderTotals {
    pub subtotal: BigDecimal,
    pub tax: BigDecimal,
    pub shipping: BigDecimal,
    pub total: BigDecimal,
}

impl OrderTotals {
    pub fn compute(items: &[LineItem], tax_rate: &BigDecimal, shipping_fee: &BigDecimal) -> Self {
        let subtotal = subtotal(items);
        Self {
            tax: tax(&subtotal, tax_rate),
            total: grand_total(&subtotal, tax_rate, shipping_fee),
            shipping: shipping_fee.clone(),
            subtotal,
        }
    }

    /// Figures rounded to cents for display.
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: to_cents(&self.subtotal),
            tax: to_cents(&self.tax),
            shipping: to_cents(&self.shipping),
            total: to_cents(&self.total),
        }
    }
}
