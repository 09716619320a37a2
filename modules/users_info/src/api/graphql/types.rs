use async_graphql::{SimpleObject, ID};

use crate::contract::model::{User, UserId};

/// GraphQL projection of [`User`].
#[derive(SimpleObject, Debug, Clone, PartialEq)]
#[graphql(name = "User")]
pub struct UserObject {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

impl From<User> for UserObject {
    fn from(user: User) -> Self {
        Self {
            id: ID(user.id.to_string()),
            name: user.name,
            email: user.email,
            age: user.age,
        }
    }
}

/// Lists are `[User]` on the wire: both the list and its items are nullable.
pub(super) fn into_list(users: Vec<User>) -> Option<Vec<Option<UserObject>>> {
    Some(users.into_iter().map(|u| Some(u.into())).collect())
}

pub(super) fn parse_id(id: &ID) -> Option<UserId> {
    UserId::parse_loose(id.as_str())
}
