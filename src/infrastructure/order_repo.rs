use diesel::prelude::*;
use diesel::pg::PgConnection;
use diesel::result::DatabaseErrorKind;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::OrderDraft;
use crate::domain::ports::{DraftChange, OrderRepository};
use crate::schema::{order_items, orders};

use super::models::{NewOrderItemRow, NewOrderRow, OrderChangeset, OrderItemRow, OrderRow};
use super::order_number;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

fn insert_items(conn: &mut PgConnection, order_id: Uuid, draft: &OrderDraft) -> QueryResult<()> {
    if draft.items.is_empty() {
        return Ok(());
    }
    diesel::insert_into(order_items::table)
        .values(&NewOrderItemRow::for_draft(order_id, draft))
        .execute(conn)?;
    Ok(())
}

fn load_items(conn: &mut PgConnection, order: &OrderRow) -> QueryResult<Vec<OrderItemRow>> {
    OrderItemRow::belonging_to(order)
        .select(OrderItemRow::as_select())
        .order(order_items::position.asc())
        .load(conn)
}

pub(super) fn is_unique_violation(e: &diesel::result::Error) -> bool {
    matches!(
        e,
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn insert(
        conn: &mut PgConnection,
        store_id: Uuid,
        order_id: Uuid,
        code: &str,
        draft: &OrderDraft,
    ) -> QueryResult<()> {
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: order_id,
                    store_id,
                    code,
                    customer_name: &draft.customer_name,
                    customer_contact: &draft.customer_contact,
                    shipping_address: &draft.shipping_address,
                    billing_address: &draft.billing_address,
                    shipping_fee: &draft.shipping_fee,
                })
                .execute(conn)?;

            insert_items(conn, order_id, draft)
        })
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, store_id: Uuid, draft: &OrderDraft) -> Result<(Uuid, String), DomainError> {
        let mut conn = self.pool.get()?;

        let mut attempt = 1;
        loop {
            let order_id = Uuid::new_v4();
            let code = order_number::order_code(order_id);
            match Self::insert(&mut conn, store_id, order_id, &code, draft) {
                Ok(()) => return Ok((order_id, code)),
                Err(e) if is_unique_violation(&e) && attempt < order_number::MAX_ATTEMPTS => {
                    log::warn!("Order number {} already taken, retrying", code);
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn find_by_id(&self, store_id: Uuid, id: Uuid) -> Result<Option<OrderDraft>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .filter(orders::id.eq(id))
            .filter(orders::store_id.eq(store_id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = load_items(&mut conn, &order)?;
        Ok(Some(order.into_draft(items)))
    }

    fn modify(
        &self,
        store_id: Uuid,
        id: Uuid,
        change: DraftChange<'_>,
    ) -> Result<OrderDraft, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // The row lock is held until commit.
            let order = orders::table
                .filter(orders::id.eq(id))
                .filter(orders::store_id.eq(store_id))
                .select(OrderRow::as_select())
                .for_update()
                .load::<OrderRow>(conn)?
                .into_iter()
                .next()
                .ok_or(DomainError::NotFound("Order"))?;

            let items = load_items(conn, &order)?;
            let stored = order.into_draft(items);
            let mut draft = stored.clone();
            change(&mut draft)?;
            if draft == stored {
                return Ok(draft);
            }

            diesel::update(orders::table.filter(orders::id.eq(id)))
                .set(&OrderChangeset::from_draft(&draft))
                .execute(conn)?;

            // The item list is replaced wholesale.
            diesel::delete(order_items::table.filter(order_items::order_id.eq(id)))
                .execute(conn)?;
            insert_items(conn, id, &draft)?;

            Ok(draft)
        })
    }
}
