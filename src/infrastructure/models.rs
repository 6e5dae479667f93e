use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::account::{Account, AccountStatus};
use crate::domain::order::{LineItem, OrderDraft};
use crate::schema::{accounts, order_items, orders};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccountRow {
    pub id: Uuid,
    pub store_id: Uuid,
    pub code: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
    pub joined_on: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            code: row.code,
            name: row.name,
            email: row.email,
            role: row.role,
            status: AccountStatus::from(row.active),
            joined_on: row.joined_on,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = accounts)]
pub struct NewAccountRow<'a> {
    pub id: Uuid,
    pub store_id: Uuid,
    pub code: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub store_id: Uuid,
    pub code: String,
    pub customer_name: String,
    pub customer_contact: String,
    pub shipping_address: String,
    pub billing_address: String,
    pub shipping_fee: BigDecimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderRow {
    pub fn into_draft(self, items: Vec<OrderItemRow>) -> OrderDraft {
        OrderDraft {
            id: Some(self.id),
            code: Some(self.code),
            items: items.into_iter().map(LineItem::from).collect(),
            shipping_fee: self.shipping_fee,
            customer_name: self.customer_name,
            customer_contact: self.customer_contact,
            shipping_address: self.shipping_address,
            billing_address: self.billing_address,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub id: Uuid,
    pub store_id: Uuid,
    pub code: &'a str,
    pub customer_name: &'a str,
    pub customer_contact: &'a str,
    pub shipping_address: &'a str,
    pub billing_address: &'a str,
    pub shipping_fee: &'a BigDecimal,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = orders)]
pub struct OrderChangeset<'a> {
    pub customer_name: &'a str,
    pub customer_contact: &'a str,
    pub shipping_address: &'a str,
    pub billing_address: &'a str,
    pub shipping_fee: &'a BigDecimal,
    pub updated_at: DateTime<Utc>,
}

impl<'a> OrderChangeset<'a> {
    pub fn from_draft(draft: &'a OrderDraft) -> Self {
        Self {
            customer_name: &draft.customer_name,
            customer_contact: &draft.customer_contact,
            shipping_address: &draft.shipping_address,
            billing_address: &draft.billing_address,
            shipping_fee: &draft.shipping_fee,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_items)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub position: i32,
    pub code: String,
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

impl From<OrderItemRow> for LineItem {
    fn from(row: OrderItemRow) -> Self {
        LineItem {
            code: row.code,
            name: row.name,
            unit_price: row.unit_price,
            quantity: row.quantity,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow<'a> {
    pub id: Uuid,
    pub order_id: Uuid,
    pub position: i32,
    pub code: &'a str,
    pub name: &'a str,
    pub unit_price: &'a BigDecimal,
    pub quantity: i32,
}

impl<'a> NewOrderItemRow<'a> {
    /// Rows for every line item of `draft`, keeping display order in `position`.
    pub fn for_draft(order_id: Uuid, draft: &'a OrderDraft) -> Vec<Self> {
        draft
            .items
            .iter()
            .enumerate()
            .map(|(position, item)| NewOrderItemRow {
                id: Uuid::new_v4(),
                order_id,
                position: position as i32,
                code: &item.code,
                name: &item.name,
                unit_price: &item.unit_price,
                quantity: item.quantity,
            })
            .collect()
    }
}
