use async_trait::async_trait;
use parking_lot::RwLock;

use crate::contract::model::{NewUser, User, UserId, UserPatch};
use crate::domain::repo::UsersRepository;
use crate::infra::storage::seed::sample_users;

/// Process-local user store: one ordered collection plus the id counter,
/// both behind a single lock so every operation is one atomic step.
pub struct InMemoryUsersRepository {
    state: RwLock<State>,
}

struct State {
    users: Vec<User>,
    // None once u64::MAX has been handed out
    next_id: Option<u64>,
}

impl InMemoryUsersRepository {
    /// An empty store; the first user gets id 1.
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// A store pre-filled with `users` in the given order.
    /// New ids continue after the largest existing one.
    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users
            .iter()
            .map(|u| u.id.get())
            .max()
            .map_or(Some(1), |max| max.checked_add(1));
        Self {
            state: RwLock::new(State { users, next_id }),
        }
    }

    /// A store holding the sample users (ids 1–4).
    pub fn with_sample_users() -> Self {
        Self::with_users(sample_users())
    }
}

impl Default for InMemoryUsersRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn list(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.state.read().users.clone())
    }

    async fn find_by_id(&self, id: UserId) -> anyhow::Result<Option<User>> {
        Ok(self.state.read().users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, new_user: NewUser) -> anyhow::Result<User> {
        let mut state = self.state.write();

        let id = state
            .next_id
            .ok_or_else(|| anyhow::anyhow!("user id space exhausted"))?;
        state.next_id = id.checked_add(1);

        let user = User {
            id: UserId::new(id),
            name: new_user.name,
            email: new_user.email,
            age: new_user.age,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, patch: UserPatch) -> anyhow::Result<Option<User>> {
        let mut state = self.state.write();
        let Some(user) = state.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        patch.apply_to(user);
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: UserId) -> anyhow::Result<bool> {
        let mut state = self.state.write();
        match state.users.iter().position(|u| u.id == id) {
            Some(index) => {
                state.users.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
