use async_graphql::{Context, MaybeUndefined, Object, Result, ID};

use super::error::map_users_error;
use super::query::users_api;
use super::types::{parse_id, UserObject};
use crate::contract::error::UsersInfoError;
use crate::contract::model::{NewUser, UserPatch};

#[derive(Default)]
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Create a user; the id is assigned by the store.
    async fn add_user(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        age: Option<i32>,
    ) -> Result<Option<UserObject>> {
        let user = users_api(ctx)?
            .create_user(NewUser { name, email, age })
            .await
            .map_err(|e| map_users_error(&e))?;
        Ok(Some(user.into()))
    }

    /// Update the supplied fields of a user.
    ///
    /// Empty `name`/`email` leave the field unchanged; `age: null` clears it.
    /// Unknown ids fail with `USERS_NOT_FOUND`.
    async fn update_user(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: Option<String>,
        email: Option<String>,
        age: MaybeUndefined<i32>,
    ) -> Result<Option<UserObject>> {
        let Some(user_id) = parse_id(&id) else {
            return Err(map_users_error(&UsersInfoError::not_found(id.as_str())));
        };

        let patch = UserPatch {
            name,
            email,
            age: match age {
                MaybeUndefined::Undefined => None,
                MaybeUndefined::Null => Some(None),
                MaybeUndefined::Value(age) => Some(Some(age)),
            },
        };

        let user = users_api(ctx)?
            .update_user(user_id, patch)
            .await
            .map_err(|e| map_users_error(&e))?;
        Ok(Some(user.into()))
    }

    /// Remove a user. `false` when no user had this id.
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<bool>> {
        let Some(id) = parse_id(&id) else {
            return Ok(Some(false));
        };
        let deleted = users_api(ctx)?
            .delete_user(id)
            .await
            .map_err(|e| map_users_error(&e))?;
        Ok(Some(deleted))
    }
}
