use std::fmt;

/// Canonical user identifier.
///
/// Ids are positive integers handed out by the store; clients see them as
/// GraphQL `ID` strings and [`UserId::parse_loose`] maps them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(u64);

impl UserId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Normalize an identifier received as text.
    ///
    /// Surrounding whitespace is ignored and the rest must be a decimal
    /// unsigned integer, so `"2"`, `" 2 "` and `"+2"` all name user 2.
    /// Anything else names no user.
    pub fn parse_loose(raw: &str) -> Option<Self> {
        raw.trim().parse::<u64>().ok().map(Self)
    }
}

impl From<u64> for UserId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Pure user model for inter-module communication (no transport types)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

/// Data for creating a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
}

/// Partial update data for a user.
///
/// `age` is doubly optional: `None` leaves it alone, `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<Option<i32>>,
}

impl UserPatch {
    /// Write every supplied field into `user`.
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(age) = self.age {
            user.age = age;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_loose_accepts_padded_and_signed_decimals() {
        assert_eq!(UserId::parse_loose("2"), Some(UserId::new(2)));
        assert_eq!(UserId::parse_loose(" 2 "), Some(UserId::new(2)));
        assert_eq!(UserId::parse_loose("+7"), Some(UserId::new(7)));
        assert_eq!(UserId::parse_loose("0042"), Some(UserId::new(42)));
    }

    #[test]
    fn parse_loose_rejects_non_integers() {
        for raw in ["", "  ", "abc", "1.5", "-1", "1e3", "0x10", "99999999999999999999"] {
            assert_eq!(UserId::parse_loose(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn patch_applies_only_supplied_fields() {
        let mut user = User {
            id: UserId::new(1),
            name: "Ana".into(),
            email: "ana@email.com".into(),
            age: Some(28),
        };

        UserPatch {
            email: Some("ana@new.com".into()),
            ..Default::default()
        }
        .apply_to(&mut user);
        assert_eq!(user.name, "Ana");
        assert_eq!(user.email, "ana@new.com");
        assert_eq!(user.age, Some(28));

        UserPatch {
            age: Some(None),
            ..Default::default()
        }
        .apply_to(&mut user);
        assert_eq!(user.age, None);
    }
}
