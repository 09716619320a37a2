use std::sync::Arc;

use async_graphql::{Context, Object, Result, ID};

use super::error::map_users_error;
use super::types::{into_list, parse_id, UserObject};
use crate::contract::client::UsersInfoApi;

pub(super) fn users_api<'a>(ctx: &Context<'a>) -> Result<&'a Arc<dyn UsersInfoApi>> {
    ctx.data::<Arc<dyn UsersInfoApi>>()
}

#[derive(Default)]
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// Every user, in insertion order.
    async fn users(&self, ctx: &Context<'_>) -> Result<Option<Vec<Option<UserObject>>>> {
        let users = users_api(ctx)?
            .list_users()
            .await
            .map_err(|e| map_users_error(&e))?;
        Ok(into_list(users))
    }

    /// The user with this id, or null.
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<UserObject>> {
        let Some(id) = parse_id(&id) else {
            return Ok(None);
        };
        let user = users_api(ctx)?
            .get_user(id)
            .await
            .map_err(|e| map_users_error(&e))?;
        Ok(user.map(Into::into))
    }

    /// Users with a known age strictly greater than `age`.
    async fn users_older_than(
        &self,
        ctx: &Context<'_>,
        age: i32,
    ) -> Result<Option<Vec<Option<UserObject>>>> {
        let users = users_api(ctx)?
            .list_users_older_than(age)
            .await
            .map_err(|e| map_users_error(&e))?;
        Ok(into_list(users))
    }

    /// Users whose name contains `name`, case-insensitively.
    async fn search_users(
        &self,
        ctx: &Context<'_>,
        name: String,
    ) -> Result<Option<Vec<Option<UserObject>>>> {
        let users = users_api(ctx)?
            .search_users(&name)
            .await
            .map_err(|e| map_users_error(&e))?;
        Ok(into_list(users))
    }
}
