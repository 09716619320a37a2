use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::UsersInfoApi,
    error::UsersInfoError,
    model::{NewUser, User, UserId, UserPatch},
};
use crate::domain::service::Service;

/// Local implementation of the UsersInfoApi trait that delegates to the domain service
pub struct UsersInfoLocalClient {
    service: Arc<Service>,
}

impl UsersInfoLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UsersInfoApi for UsersInfoLocalClient {
    async fn list_users(&self) -> Result<Vec<User>, UsersInfoError> {
        self.service.list_users().await.map_err(Into::into)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, UsersInfoError> {
        self.service.get_user(id).await.map_err(Into::into)
    }

    async fn list_users_older_than(&self, age: i32) -> Result<Vec<User>, UsersInfoError> {
        self.service
            .list_users_older_than(age)
            .await
            .map_err(Into::into)
    }

    async fn search_users(&self, name: &str) -> Result<Vec<User>, UsersInfoError> {
        self.service.search_users(name).await.map_err(Into::into)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, UsersInfoError> {
        self.service.create_user(new_user).await.map_err(Into::into)
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, UsersInfoError> {
        self.service
            .update_user(id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, UsersInfoError> {
        self.service.delete_user(id).await.map_err(Into::into)
    }
}
