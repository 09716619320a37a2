use crate::contract::model::{NewUser, User, UserId, UserPatch};
use async_trait::async_trait;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
///
/// Each call is atomic with respect to the others.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// All users in insertion order.
    async fn list(&self) -> anyhow::Result<Vec<User>>;
    /// Load a user by id.
    async fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<User>>;
    /// Store a new user under a freshly allocated id and return it.
    ///
    /// Ids are never reused, even after deletes.
    async fn insert(&self, new_user: NewUser) -> anyhow::Result<User>;
    /// Apply `patch` verbatim to the user `id`. Returns `None` if absent.
    async fn update(&self, id: UserId, patch: UserPatch) -> anyhow::Result<Option<User>>;
    /// Delete by id. Returns true if a user was deleted.
    async fn delete(&self, id: UserId) -> anyhow::Result<bool>;
}
