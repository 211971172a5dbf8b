//! services/app/src/session.rs
//!
//! The auth session manager. Owns the current-user session, validates and
//! creates accounts against the local persistence port, and exposes
//! login/register/logout plus restore-on-startup.
//!
//! Accounts live as a JSON array under [`keys::USERS`]; the session is a
//! singleton under [`keys::SESSION`]. Every successful state change rewrites
//! the full snapshot of the affected key. A corrupted stored value degrades to
//! an empty collection rather than an error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use openhealth_core::domain::{fingerprint, Account, SessionUser};
use openhealth_core::ports::{load_or, save, BackendService, KeyValueStore};
use tracing::{debug, info};

use crate::keys;

/// Banner-level authentication failures. Never fatal; the caller shows the
/// message and the user tries again.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("An account with this email already exists.")]
    AccountExists,
    #[error("Invalid email or password. Try registering first.")]
    InvalidCredentials,
}

/// Root-level owner of the current-user session.
///
/// One instance lives in the shared `AppState`; views read the session through
/// it rather than through ad hoc globals. `is_initializing` stays true until
/// [`AuthManager::restore`] has run, gating protected-view rendering.
pub struct AuthManager {
    store: Arc<dyn KeyValueStore>,
    current: Mutex<Option<SessionUser>>,
    initializing: AtomicBool,
}

impl AuthManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            current: Mutex::new(None),
            initializing: AtomicBool::new(true),
        }
    }

    /// Attempts to restore a persisted session. Corrupted or partial records
    /// silently yield no session; either way the initializing gate is lifted.
    pub fn restore(&self) {
        let restored: Option<SessionUser> = self
            .store
            .get(keys::SESSION)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .filter(|u: &SessionUser| !u.name.is_empty() && !u.email.is_empty());
        if let Some(user) = restored {
            info!(email = %user.email, "restored session");
            *self.current.lock().expect("session lock poisoned") = Some(user);
        }
        self.initializing.store(false, Ordering::SeqCst);
    }

    /// True until [`AuthManager::restore`] completes. While true, protected
    /// views should show a loading indicator and suspend redirect decisions.
    pub fn is_initializing(&self) -> bool {
        self.initializing.load(Ordering::SeqCst)
    }

    /// Creates an account and signs the new user in.
    ///
    /// Fails with [`AuthError::AccountExists`] if the email is already taken.
    /// Uniqueness is a linear scan over the stored collection; concurrent
    /// processes can race it, which the store contract accepts.
    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let mut accounts: Vec<Account> = load_or(self.store.as_ref(), keys::USERS, Vec::new);
        if accounts.iter().any(|a| a.email == email) {
            return Err(AuthError::AccountExists);
        }

        accounts.push(Account {
            name: name.to_string(),
            email: email.to_string(),
            password_fingerprint: fingerprint(password),
        });
        save(self.store.as_ref(), keys::USERS, &accounts);

        info!(email, "registered account");
        Ok(self.establish(SessionUser {
            name: name.to_string(),
            email: email.to_string(),
        }))
    }

    /// Signs in with an exact (email, fingerprint) match against the stored
    /// accounts, or fails with [`AuthError::InvalidCredentials`].
    pub fn login(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let wanted = fingerprint(password);
        let accounts: Vec<Account> = load_or(self.store.as_ref(), keys::USERS, Vec::new);
        let found = accounts
            .iter()
            .find(|a| a.email == email && a.password_fingerprint == wanted)
            .ok_or(AuthError::InvalidCredentials)?;

        info!(email, "login succeeded");
        Ok(self.establish(SessionUser {
            name: found.name.clone(),
            email: found.email.clone(),
        }))
    }

    /// Clears the session from memory and from persistent storage. There is
    /// no server-side session to invalidate.
    pub fn logout(&self) {
        *self.current.lock().expect("session lock poisoned") = None;
        self.store.remove(keys::SESSION);
        info!("logged out");
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.current.lock().expect("session lock poisoned").clone()
    }

    /// Best-effort mirror of a local registration to the remote backend.
    /// Failures are logged and swallowed; local persistence already satisfied
    /// the user-visible contract.
    pub async fn mirror_registration(&self, backend: &dyn BackendService, email: &str) {
        let accounts: Vec<Account> = load_or(self.store.as_ref(), keys::USERS, Vec::new);
        let Some(account) = accounts.iter().find(|a| a.email == email) else {
            return;
        };
        if let Err(e) = backend.register_user(account).await {
            debug!(email, error = %e, "backend registration mirror failed");
        }
    }

    fn establish(&self, user: SessionUser) -> SessionUser {
        save(self.store.as_ref(), keys::SESSION, &user);
        *self.current.lock().expect("session lock poisoned") = Some(user.clone());
        user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::JsonFileStore;

    fn manager() -> (tempfile::TempDir, Arc<dyn KeyValueStore>, AuthManager) {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn KeyValueStore> =
            Arc::new(JsonFileStore::new(dir.path().to_path_buf()).unwrap());
        let auth = AuthManager::new(store.clone());
        auth.restore();
        (dir, store, auth)
    }

    #[test]
    fn registering_the_same_email_twice_fails() {
        let (_dir, _store, auth) = manager();
        auth.register("A", "a@x.com", "pw1").unwrap();
        assert_eq!(
            auth.register("B", "a@x.com", "pw2"),
            Err(AuthError::AccountExists)
        );
    }

    #[test]
    fn register_then_login_yields_the_same_session() {
        let (_dir, store, auth) = manager();
        auth.register("Dr. Jane Smith", "jane@x.com", "secret1").unwrap();
        assert_eq!(auth.current_user().unwrap().name, "Dr. Jane Smith");

        auth.logout();
        assert!(auth.current_user().is_none());

        assert_eq!(
            auth.login("jane@x.com", "wrong"),
            Err(AuthError::InvalidCredentials)
        );
        assert!(auth.current_user().is_none());

        let user = auth.login("jane@x.com", "secret1").unwrap();
        assert_eq!(user.name, "Dr. Jane Smith");
        assert_eq!(user.email, "jane@x.com");

        // And the session is persisted for the next "reload".
        let again = AuthManager::new(store);
        again.restore();
        assert_eq!(again.current_user(), Some(user));
    }

    #[test]
    fn login_with_unknown_email_fails_without_session() {
        let (_dir, _store, auth) = manager();
        assert_eq!(
            auth.login("nobody@x.com", "pw"),
            Err(AuthError::InvalidCredentials)
        );
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn restore_after_logout_yields_no_session() {
        let (_dir, store, auth) = manager();
        auth.register("A", "a@x.com", "pw").unwrap();
        auth.logout();

        let reloaded = AuthManager::new(store);
        assert!(reloaded.is_initializing());
        reloaded.restore();
        assert!(!reloaded.is_initializing());
        assert!(reloaded.current_user().is_none());
    }

    #[test]
    fn corrupted_session_record_is_ignored() {
        let (_dir, store, _auth) = manager();
        store.set(keys::SESSION, "{definitely not json");
        let auth = AuthManager::new(store);
        auth.restore();
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn corrupted_users_collection_degrades_to_empty() {
        let (_dir, store, _auth) = manager();
        store.set(keys::USERS, "[broken");
        let auth = AuthManager::new(store);
        auth.restore();
        // Registration still works; the broken collection reads as empty.
        auth.register("A", "a@x.com", "pw").unwrap();
        assert!(auth.login("a@x.com", "pw").is_ok());
    }
}
