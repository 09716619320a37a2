use thiserror::Error;

use crate::contract::model::UserId;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: UserId },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn user_not_found(id: UserId) -> Self {
        Self::UserNotFound { id }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
