use std::sync::Arc;

use uuid::Uuid;

use super::account::{Account, AccountStatus, NewAccount};
use super::errors::DomainError;
use super::order::OrderDraft;
use super::pagination::{PageRequest, PageResult};

pub trait AccountRepository: Send + Sync + 'static {
    fn create(&self, store_id: Uuid, account: NewAccount) -> Result<Account, DomainError>;
    fn find_by_id(&self, store_id: Uuid, id: Uuid) -> Result<Option<Account>, DomainError>;
    fn list(&self, store_id: Uuid, page: PageRequest) -> Result<PageResult<Account>, DomainError>;
    /// Fails with `NotFound` when the account does not belong to the store.
    fn set_status(
        &self,
        store_id: Uuid,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<(), DomainError>;
}

/// An edit applied to a stored draft. An error aborts the edit and nothing is written.
pub type DraftChange<'a> = Box<dyn FnOnce(&mut OrderDraft) -> Result<(), DomainError> + 'a>;

pub trait OrderRepository: Send + Sync + 'static {
    /// Persist a new draft, returning its id and generated order number.
    fn create(&self, store_id: Uuid, draft: &OrderDraft) -> Result<(Uuid, String), DomainError>;
    fn find_by_id(&self, store_id: Uuid, id: Uuid) -> Result<Option<OrderDraft>, DomainError>;
    /// Load, edit and store an order as one step, so concurrent edits of the
    /// same order are applied one after the other. Returns the stored draft.
    /// Nothing is written when `change` leaves the draft as it was.
    fn modify(
        &self,
        store_id: Uuid,
        id: Uuid,
        change: DraftChange<'_>,
    ) -> Result<OrderDraft, DomainError>;
}

impl<T: AccountRepository + ?Sized> AccountRepository for Arc<T> {
    fn create(&self, store_id: Uuid, account: NewAccount) -> Result<Account, DomainError> {
        (**self).create(store_id, account)
    }

    fn find_by_id(&self, store_id: Uuid, id: Uuid) -> Result<Option<Account>, DomainError> {
        (**self).find_by_id(store_id, id)
    }

    fn list(&self, store_id: Uuid, page: PageRequest) -> Result<PageResult<Account>, DomainError> {
        (**self).list(store_id, page)
    }

    fn set_status(
        &self,
        store_id: Uuid,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<(), DomainError> {
        (**self).set_status(store_id, id, status)
    }
}

impl<T: OrderRepository + ?Sized> OrderRepository for Arc<T> {
    fn create(&self, store_id: Uuid, draft: &OrderDraft) -> Result<(Uuid, String), DomainError> {
        (**self).create(store_id, draft)
    }

    fn find_by_id(&self, store_id: Uuid, id: Uuid) -> Result<Option<OrderDraft>, DomainError> {
        (**self).find_by_id(store_id, id)
    }

    fn modify(
        &self,
        store_id: Uuid,
        id: Uuid,
        change: DraftChange<'_>,
    ) -> Result<OrderDraft, DomainError> {
        (**self).modify(store_id, id, change)
    }
}
