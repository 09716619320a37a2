use thiserror::Error;

/// Errors that are safe to expose to other modules and API clients.
///
/// "Not found" has two shapes in this API: `update_user` reports it as
/// [`UsersInfoError::NotFound`], while `delete_user` answers `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsersInfoError {
    /// `id` is the identifier as the caller supplied it.
    #[error("User not found: {id}")]
    NotFound { id: String },

    #[error("Internal error")]
    Internal,
}

impl UsersInfoError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for UsersInfoError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            UserNotFound { id } => Self::not_found(id.to_string()),
            Storage { message } => {
                tracing::error!(%message, "users_info storage failure");
                Self::internal()
            }
        }
    }
}
