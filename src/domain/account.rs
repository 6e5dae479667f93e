use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::{DomainError, FieldError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Disabled,
}

impl AccountStatus {
    pub fn is_active(self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

impl From<bool> for AccountStatus {
    fn from(active: bool) -> Self {
        if active {
            AccountStatus::Active
        } else {
            AccountStatus::Disabled
        }
    }
}

/// A store operator account.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: AccountStatus,
    pub joined_on: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl NewAccount {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::required("name"));
        }
        if self.email.trim().is_empty() {
            errors.push(FieldError::required("email"));
        } else if !self.email.contains('@') {
            errors.push(FieldError::new("email", "Invalid email"));
        }
        if self.role.trim().is_empty() {
            errors.push(FieldError::required("role"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }
}
