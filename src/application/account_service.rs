use uuid::Uuid;

use crate::domain::account::{Account, AccountStatus, NewAccount};
use crate::domain::errors::DomainError;
use crate::domain::pagination::{PageRequest, PageResult};
use crate::domain::ports::AccountRepository;

pub struct AccountService<R> {
    repo: R,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_account(
        &self,
        store_id: Uuid,
        account: NewAccount,
    ) -> Result<Account, DomainError> {
        account.validate()?;
        let created = self.repo.create(store_id, account)?;
        log::info!("Created account {} for store {}", created.id, store_id);
        Ok(created)
    }

    pub fn get_account(&self, store_id: Uuid, id: Uuid) -> Result<Account, DomainError> {
        self.repo
            .find_by_id(store_id, id)?
            .ok_or(DomainError::NotFound("Account"))
    }

    pub fn list_accounts(
        &self,
        store_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<Account>, DomainError> {
        self.repo.list(store_id, page)
    }

    pub fn set_status(
        &self,
        store_id: Uuid,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<(), DomainError> {
        self.repo.set_status(store_id, id, status)?;
        log::info!("Account {} of store {} is now {:?}", id, store_id, status);
        Ok(())
    }
}
