use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::account::{Account, AccountStatus, NewAccount};
use crate::domain::errors::DomainError;
use crate::domain::pagination::{PageRequest, PageResult};
use crate::domain::ports::AccountRepository;
use crate::schema::accounts;

use super::models::{AccountRow, NewAccountRow};
use super::order_number;
use super::order_repo::is_unique_violation;

pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for DieselAccountRepository {
    fn create(&self, store_id: Uuid, account: NewAccount) -> Result<Account, DomainError> {
        let mut conn = self.pool.get()?;

        let mut attempt = 1;
        loop {
            let id = Uuid::new_v4();
            let code = order_number::account_code(id);
            let inserted = diesel::insert_into(accounts::table)
                .values(&NewAccountRow {
                    id,
                    store_id,
                    code: &code,
                    name: &account.name,
                    email: &account.email,
                    role: &account.role,
                })
                .returning(AccountRow::as_returning())
                .get_result(&mut conn);

            match inserted {
                Ok(row) => return Ok(row.into()),
                Err(e) if is_unique_violation(&e) && attempt < order_number::MAX_ATTEMPTS => {
                    log::warn!("Account number {} already taken, retrying", code);
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn find_by_id(&self, store_id: Uuid, id: Uuid) -> Result<Option<Account>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = accounts::table
            .filter(accounts::id.eq(id))
            .filter(accounts::store_id.eq(store_id))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(Account::from))
    }

    fn list(&self, store_id: Uuid, page: PageRequest) -> Result<PageResult<Account>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let total_count: i64 = accounts::table
                .filter(accounts::store_id.eq(store_id))
                .count()
                .get_result(conn)?;
            let page = page.within(total_count);

            let rows = accounts::table
                .filter(accounts::store_id.eq(store_id))
                .select(AccountRow::as_select())
                .order((accounts::joined_on.asc(), accounts::id.asc()))
                .limit(page.limit())
                .offset(page.offset())
                .load(conn)?;

            Ok(PageResult {
                items: rows.into_iter().map(Account::from).collect(),
                total_count,
                page,
            })
        })
    }

    fn set_status(
        &self,
        store_id: Uuid,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(
            accounts::table
                .filter(accounts::id.eq(id))
                .filter(accounts::store_id.eq(store_id)),
        )
        .set(accounts::active.eq(status.is_active()))
        .execute(&mut conn)?;

        match updated {
            0 => Err(DomainError::NotFound("Account")),
            _ => Ok(()),
        }
    }
}
