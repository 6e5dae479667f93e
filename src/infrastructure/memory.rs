use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::{Account, AccountStatus, NewAccount};
use crate::domain::errors::DomainError;
use crate::domain::order::OrderDraft;
use crate::domain::pagination::{PageRequest, PageResult};
use crate::domain::ports::{AccountRepository, DraftChange, OrderRepository};

use super::order_number;

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, DomainError> {
    mutex
        .lock()
        .map_err(|_| DomainError::Internal("repository lock poisoned".to_string()))
}

/// Accounts kept in insertion order, keyed by owning store.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<(Uuid, Account)>>,
}

impl AccountRepository for InMemoryAccountRepository {
    fn create(&self, store_id: Uuid, account: NewAccount) -> Result<Account, DomainError> {
        let id = Uuid::new_v4();
        let created = Account {
            id,
            code: order_number::account_code(id),
            name: account.name,
            email: account.email,
            role: account.role,
            status: AccountStatus::Active,
            joined_on: Utc::now(),
        };
        lock(&self.accounts)?.push((store_id, created.clone()));
        Ok(created)
    }

    fn find_by_id(&self, store_id: Uuid, id: Uuid) -> Result<Option<Account>, DomainError> {
        Ok(lock(&self.accounts)?
            .iter()
            .find(|(store, a)| *store == store_id && a.id == id)
            .map(|(_, a)| a.clone()))
    }

    fn list(&self, store_id: Uuid, page: PageRequest) -> Result<PageResult<Account>, DomainError> {
        let accounts = lock(&self.accounts)?;
        let owned: Vec<&Account> = accounts
            .iter()
            .filter(|(store, _)| *store == store_id)
            .map(|(_, a)| a)
            .collect();

        let total_count = owned.len() as i64;
        let page = page.within(total_count);
        Ok(PageResult {
            total_count,
            items: owned
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.limit() as usize)
                .cloned()
                .collect(),
            page,
        })
    }

    fn set_status(
        &self,
        store_id: Uuid,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<(), DomainError> {
        let mut accounts = lock(&self.accounts)?;
        let (_, account) = accounts
            .iter_mut()
            .find(|(store, a)| *store == store_id && a.id == id)
            .ok_or(DomainError::NotFound("Account"))?;
        account.status = status;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<HashMap<Uuid, (Uuid, OrderDraft)>>,
}

impl OrderRepository for InMemoryOrderRepository {
    fn create(&self, store_id: Uuid, draft: &OrderDraft) -> Result<(Uuid, String), DomainError> {
        let mut orders = lock(&self.orders)?;
        let (id, code) = loop {
            let id = Uuid::new_v4();
            let code = order_number::order_code(id);
            if !orders.values().any(|(_, o)| o.code.as_deref() == Some(code.as_str())) {
                break (id, code);
            }
        };
        let mut stored = draft.clone();
        stored.id = Some(id);
        stored.code = Some(code.clone());
        orders.insert(id, (store_id, stored));
        Ok((id, code))
    }

    fn find_by_id(&self, store_id: Uuid, id: Uuid) -> Result<Option<OrderDraft>, DomainError> {
        Ok(lock(&self.orders)?
            .get(&id)
            .filter(|(store, _)| *store == store_id)
            .map(|(_, draft)| draft.clone()))
    }

    fn modify(
        &self,
        store_id: Uuid,
        id: Uuid,
        change: DraftChange<'_>,
    ) -> Result<OrderDraft, DomainError> {
        let mut orders = lock(&self.orders)?;
        let (_, stored) = orders
            .get_mut(&id)
            .filter(|(store, _)| *store == store_id)
            .ok_or(DomainError::NotFound("Order"))?;
        let mut draft = stored.clone();
        change(&mut draft)?;
        *stored = draft.clone();
        Ok(draft)
    }
}
