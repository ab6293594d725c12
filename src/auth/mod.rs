//! Identity and the signed-in session.
//!
//! The home screen only runs discovery for a signed-in user. [`Session`]
//! owns that user, restores it from a [`KeyValueStore`] at startup and keeps
//! the store in step with sign-in and sign-out. The remote side sits behind
//! [`IdentityProvider`]; [`FirebaseIdentity`] talks to the Identity Toolkit
//! REST API.
//!
//! [`KeyValueStore`]: crate::storage::KeyValueStore

pub mod firebase;
pub mod session;

pub use firebase::FirebaseIdentity;
pub use session::{Session, USER_KEY};

use crate::domain::{Result, User};
use async_trait::async_trait;

/// Remote identity service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies existing credentials.
    ///
    /// # Errors
    ///
    /// Returns [`FoodiePalError::Auth`](crate::FoodiePalError::Auth) with the
    /// provider's error code when the credentials are rejected.
    async fn sign_in(&self, email: &str, password: &str) -> Result<User>;

    /// Creates an account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`FoodiePalError::Auth`](crate::FoodiePalError::Auth) when the
    /// provider refuses the account (e.g. `EMAIL_EXISTS`).
    async fn sign_up(&self, email: &str, password: &str) -> Result<User>;

    /// Ends the remote session, if the provider keeps one.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider could not be reached.
    async fn sign_out(&self) -> Result<()>;
}
