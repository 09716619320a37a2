use async_trait::async_trait;

use crate::contract::{
    error::UsersInfoError,
    model::{NewUser, User, UserId, UserPatch},
};

/// Public API trait for the users_info module that other modules (and the
/// GraphQL resolvers) use.
#[async_trait]
pub trait UsersInfoApi: Send + Sync {
    /// All users in storage order
    async fn list_users(&self) -> Result<Vec<User>, UsersInfoError>;

    /// A user by ID, `None` when absent
    async fn get_user(&self, id: UserId) -> Result<Option<User>, UsersInfoError>;

    /// Users whose age is strictly greater than `age`
    async fn list_users_older_than(&self, age: i32) -> Result<Vec<User>, UsersInfoError>;

    /// Users whose name contains `name`, ignoring case
    async fn search_users(&self, name: &str) -> Result<Vec<User>, UsersInfoError>;

    /// Create a new user
    async fn create_user(&self, new_user: NewUser) -> Result<User, UsersInfoError>;

    /// Update a user with partial data; unknown ids are an error
    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, UsersInfoError>;

    /// Delete a user by ID; `false` when there was nothing to delete
    async fn delete_user(&self, id: UserId) -> Result<bool, UsersInfoError>;
}
