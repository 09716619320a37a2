use async_graphql::ErrorExtensions;

use crate::contract::error::UsersInfoError;

/// Turn a contract error into a field error with a machine-readable
/// `extensions.code`.
pub fn map_users_error(err: &UsersInfoError) -> async_graphql::Error {
    match err {
        UsersInfoError::NotFound { id } => {
            let id = id.clone();
            async_graphql::Error::new(err.to_string()).extend_with(move |_, e| {
                e.set("code", "USERS_NOT_FOUND");
                e.set("id", id);
            })
        }
        UsersInfoError::Internal => async_graphql::Error::new(err.to_string())
            .extend_with(|_, e| e.set("code", "INTERNAL")),
    }
}
