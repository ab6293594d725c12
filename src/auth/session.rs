//! The signed-in session.

use super::IdentityProvider;
use crate::domain::{Result, User};
use crate::storage::KeyValueStore;

/// Store key holding the serialized signed-in user.
pub const USER_KEY: &str = "user";

/// Owns the signed-in user and keeps it persisted.
///
/// The identity provider is passed into each call rather than held, so a
/// session can be restored and inspected without network configuration.
///
/// # Examples
///
/// ```
/// use foodiepal::auth::Session;
/// use foodiepal::storage::MemoryStore;
///
/// let session = Session::restore(MemoryStore::default());
/// assert!(session.current_user().is_none());
/// ```
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    user: Option<User>,
}

impl<S: KeyValueStore> Session<S> {
    /// Builds a session from whatever `store` holds under [`USER_KEY`].
    ///
    /// An unreadable store or a value that does not decode as a user is
    /// logged and treated as signed out.
    pub fn restore(store: S) -> Self {
        let user = match store.get(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "restored signed-in user");
                    Some(user)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stored user is corrupt, treating as signed out");
                    None
                }
            },
            Ok(None) => {
                tracing::debug!("no stored user");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored user");
                None
            }
        };

        Self { store, user }
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Signs in through `identity` and persists the user.
    ///
    /// # Errors
    ///
    /// Returns the provider's error if the credentials are rejected, or a
    /// storage error if the user cannot be persisted. The session is left
    /// unchanged on error.
    pub async fn sign_in(
        &mut self,
        identity: &dyn IdentityProvider,
        email: &str,
        password: &str,
    ) -> Result<&User> {
        let user = identity.sign_in(email, password).await?;
        self.remember(user)
    }

    /// Creates an account through `identity` and persists the new user.
    ///
    /// # Errors
    ///
    /// Same as [`Session::sign_in`].
    pub async fn sign_up(
        &mut self,
        identity: &dyn IdentityProvider,
        email: &str,
        password: &str,
    ) -> Result<&User> {
        let user = identity.sign_up(email, password).await?;
        self.remember(user)
    }

    /// Signs out and forgets the stored user.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider or the store fails. The in-memory
    /// user is cleared only once the store no longer holds it.
    pub async fn sign_out(&mut self, identity: &dyn IdentityProvider) -> Result<()> {
        identity.sign_out().await?;
        self.store.remove(USER_KEY)?;
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "signed out");
        }
        Ok(())
    }

    fn remember(&mut self, user: User) -> Result<&User> {
        let raw = serde_json::to_string(&user)?;
        self.store.set(USER_KEY, &raw)?;
        tracing::info!(user_id = %user.id, "signed in");
        let user: &User = self.user.insert(user);
        Ok(user)
    }
}
