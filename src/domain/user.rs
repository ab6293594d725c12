//! Signed-in user identity.

use serde::{Deserialize, Serialize};

/// The identity returned by the identity provider and persisted by the session.
///
/// Only `id` matters to discovery: a present user is the gate for the home
/// screen. `email` is carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

impl User {
    #[must_use]
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}
