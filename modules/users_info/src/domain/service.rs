use std::sync::Arc;

use crate::contract::model::{NewUser, User, UserId, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;
use tracing::{debug, info, instrument};

/// Domain service with business rules for user management.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "users_info.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self.all_users().await?;
        debug!("Listed {} users", users.len());
        Ok(users)
    }

    #[instrument(name = "users_info.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: UserId) -> Result<Option<User>, DomainError> {
        debug!("Getting user by id");

        let user = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        debug!(found = user.is_some(), "User lookup finished");
        Ok(user)
    }

    /// Users with a known age strictly greater than `age`.
    #[instrument(name = "users_info.service.list_users_older_than", skip(self))]
    pub async fn list_users_older_than(&self, age: i32) -> Result<Vec<User>, DomainError> {
        let users: Vec<User> = self
            .all_users()
            .await?
            .into_iter()
            .filter(|u| u.age.is_some_and(|a| a > age))
            .collect();

        debug!("{} users older than {}", users.len(), age);
        Ok(users)
    }

    /// Case-insensitive substring search on the user name.
    #[instrument(name = "users_info.service.search_users", skip(self))]
    pub async fn search_users(&self, name: &str) -> Result<Vec<User>, DomainError> {
        let needle = name.to_lowercase();
        let users: Vec<User> = self
            .all_users()
            .await?
            .into_iter()
            .filter(|u| u.name.to_lowercase().contains(&needle))
            .collect();

        debug!("{} users match '{}'", users.len(), name);
        Ok(users)
    }

    #[instrument(
        name = "users_info.service.create_user",
        skip(self),
        fields(email = %new_user.email, name = %new_user.name)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        let user = self
            .repo
            .insert(new_user)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(
        name = "users_info.service.update_user",
        skip(self),
        fields(user_id = %id)
    )]
    pub async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");

        let patch = Self::effective_patch(patch);

        let updated = self
            .repo
            .update(id, patch)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        info!("Successfully updated user");
        Ok(updated)
    }

    /// Returns `false` for unknown ids instead of failing.
    #[instrument(
        name = "users_info.service.delete_user",
        skip(self),
        fields(user_id = %id)
    )]
    pub async fn delete_user(&self, id: UserId) -> Result<bool, DomainError> {
        info!("Deleting user");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;

        if deleted {
            info!("Successfully deleted user");
        } else {
            debug!("Nothing to delete");
        }
        Ok(deleted)
    }

    // --- helpers ---

    async fn all_users(&self) -> Result<Vec<User>, DomainError> {
        self.repo
            .list()
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    /// Empty name/email count as "not supplied"; age is taken as given.
    fn effective_patch(patch: UserPatch) -> UserPatch {
        UserPatch {
            name: patch.name.filter(|n| !n.is_empty()),
            email: patch.email.filter(|e| !e.is_empty()),
            age: patch.age,
        }
    }
}
