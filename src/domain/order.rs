use bigdecimal::{BigDecimal, Zero};
use uuid::Uuid;

use super::errors::{DomainError, FieldError};
use super::totals::{self, OrderTotals};

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Unique within the enclosing order.
    pub code: String,
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

impl LineItem {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        unit_price: BigDecimal,
        quantity: i32,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    pub fn amount(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

/// An order held client-side while the operator edits it. `id` and `code` are
/// absent until the draft has been persisted once.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub id: Option<Uuid>,
    pub code: Option<String>,
    pub items: Vec<LineItem>,
    pub shipping_fee: BigDecimal,
    pub customer_name: String,
    pub customer_contact: String,
    pub shipping_address: String,
    pub billing_address: String,
}

impl OrderDraft {
    /// Append a line item. The draft is left untouched when the code is taken.
    pub fn add_item(&mut self, item: LineItem) -> Result<(), DomainError> {
        self.items = totals::add_item(&self.items, item)?;
        Ok(())
    }

    /// Remove the line item carrying `code`. Unknown codes are a no-op.
    pub fn remove_item(&mut self, code: &str) {
        self.items = totals::remove_item(&self.items, code);
    }

    pub fn totals(&self, tax_rate: &BigDecimal) -> OrderTotals {
        OrderTotals::compute(&self.items, tax_rate, &self.shipping_fee)
    }

    /// Check the required fields of the order form and every amount.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("customerName", &self.customer_name),
            ("customerContact", &self.customer_contact),
            ("shippingAddress", &self.shipping_address),
            ("billingAddress", &self.billing_address),
        ] {
            if value.trim().is_empty() {
                errors.push(FieldError::required(field));
            }
        }

        errors.extend(self.amount_errors());
        into_result(errors)
    }

    /// Check only the amounts, for drafts that are priced but not stored.
    pub fn validate_amounts(&self) -> Result<(), DomainError> {
        into_result(self.amount_errors())
    }

    fn amount_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        errors.extend(SHIPPING_FEE_LIMIT.check("shippingFee", &self.shipping_fee));
        for item in &self.items {
            errors.extend(item.validate());
        }
        errors
    }
}

fn into_result(errors: Vec<FieldError>) -> Result<(), DomainError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}

impl LineItem {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.code.trim().is_empty() {
            errors.push(FieldError::required("items.code"));
        }
        errors.extend(UNIT_PRICE_LIMIT.check("items.unitPrice", &self.unit_price));
        if self.quantity < 0 {
            errors.push(FieldError::new("items.quantity", "Must not be negative"));
        }
        errors
    }
}

/// Digits a stored amount may carry, mirroring its `NUMERIC(precision, scale)` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountLimit {
    pub precision: i64,
    pub scale: i64,
}

pub const UNIT_PRICE_LIMIT: AmountLimit = AmountLimit {
    precision: 12,
    scale: 4,
};

pub const SHIPPING_FEE_LIMIT: AmountLimit = AmountLimit {
    precision: 12,
    scale: 2,
};

impl AmountLimit {
    /// Reject negative amounts and anything the column would round or refuse.
    ///
    /// Works on the unscaled digits and exponent, so `1e1000000` is rejected
    /// without ever being expanded.
    pub fn check(&self, field: &'static str, value: &BigDecimal) -> Option<FieldError> {
        let (unscaled, scale) = value.normalized().as_bigint_and_exponent();
        if unscaled.is_zero() {
            return None;
        }
        let text = unscaled.to_string();
        if text.starts_with('-') {
            return Some(FieldError::new(field, "Must not be negative"));
        }
        if scale > self.scale {
            return Some(FieldError::new(field, "Too many decimal places"));
        }
        let integer_digits = (text.len() as i64).saturating_sub(scale);
        if integer_digits > self.precision - self.scale {
            return Some(FieldError::new(field, "Out of range"));
        }
        None
    }
}
