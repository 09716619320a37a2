use crate::contract::model::{User, UserId};

/// The four users a fresh server starts with (ids 1–4).
pub fn sample_users() -> Vec<User> {
    [
        (1, "Ana García", "ana@email.com", 28),
        (2, "Carlos López", "carlos@email.com", 32),
        (3, "María Rodríguez", "maria@email.com", 25),
        (4, "Pedro Martínez", "pedro@email.com", 30),
    ]
    .into_iter()
    .map(|(id, name, email, age)| User {
        id: UserId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        age: Some(age),
    })
    .collect()
}
