//! Session state and the store that owns it.
//!
//! A [`Session`] is the token/username/role triple of the signed-in user.
//! The [`SessionStore`] is the only writer: it persists the triple to
//! durable storage, restores it at start-up, and publishes every change as
//! one complete snapshot on a watch channel so observers never see a
//! half-updated session.

use std::sync::Arc;

use chrono::Utc;
use contable_core::{KeyValueStore, StorageError};
use rootcause::Report;
use tokio::sync::watch;

use crate::auth::{AuthBackend, Navigator};
use crate::claims::{TokenClaims, local_part};
use crate::credentials::{LoginRequest, LoginResponse, RegisterRequest};
use crate::error::AuthError;
use crate::guard::LOGIN_PATH;
use crate::role::Role;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the display username.
pub const USERNAME_KEY: &str = "username";
/// Storage key of the normalized role.
pub const ROLE_KEY: &str = "role";

/// Username used when neither the response nor the token names the user.
pub const FALLBACK_USERNAME: &str = "usuario";

/// Name shown in the header when no username is known.
const ANONYMOUS_DISPLAY_NAME: &str = "Usuario";

/// The signed-in user's token, username and role.
///
/// The session is authenticated only when all three are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    username: Option<String>,
    role: Option<Role>,
}

impl Session {
    /// Creates an authenticated session.
    #[must_use]
    pub fn established(token: String, username: String, role: Role) -> Self {
        Self {
            token: Some(token),
            username: Some(username),
            role: Some(role),
        }
    }

    /// Returns the bearer token, if present.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the username, if present.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the normalized role, if present.
    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Returns true when token, username and role are all present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.username.is_some() && self.role.is_some()
    }

    /// Returns true if the current role is exactly `role`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_ref().is_some_and(|r| r.as_str() == role)
    }

    /// Returns true if the current role is a member of `roles`.
    #[must_use]
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        self.role.as_ref().is_some_and(|r| r.is_any_of(roles))
    }

    /// Returns true if the token is present and not expired at `now`
    /// (seconds since epoch).
    #[must_use]
    pub fn is_token_valid_at(&self, now: i64) -> bool {
        self.token
            .as_deref()
            .and_then(TokenClaims::try_decode)
            .is_some_and(|claims| claims.is_valid_at(now))
    }

    /// Name shown in the header.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(ANONYMOUS_DISPLAY_NAME)
    }

    /// Avatar initials: the first two characters of the username, uppercased.
    #[must_use]
    pub fn initials(&self) -> String {
        match self.username.as_deref() {
            None | Some("") | Some(ANONYMOUS_DISPLAY_NAME) => "U".to_string(),
            Some(name) => name.chars().take(2).collect::<String>().to_uppercase(),
        }
    }
}

/// Username and role derived from a login response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

impl Identity {
    /// Derives the identity from a login response.
    ///
    /// A response carrying an email is authoritative: the token is not
    /// consulted and a missing role falls back to `USER`. Without an email
    /// the token claims fill in whatever the response leaves out.
    #[must_use]
    pub fn from_login(response: &LoginResponse) -> Self {
        let response_role = response.role.as_deref().and_then(Role::parse);

        if let Some(email) = response.email.as_deref().filter(|e| !e.is_empty()) {
            let username = Some(local_part(email))
                .filter(|u| !u.is_empty())
                .unwrap_or(FALLBACK_USERNAME)
                .to_string();
            return Self {
                username,
                role: response_role.unwrap_or_else(Role::fallback),
            };
        }

        let claims = TokenClaims::decode(&response.token);
        let username = claims
            .username()
            .or_else(|| claims.subject().map(local_part))
            .filter(|u| !u.is_empty())
            .unwrap_or(FALLBACK_USERNAME)
            .to_string();
        let role = response_role
            .or_else(|| claims.role().and_then(Role::parse))
            .unwrap_or_else(Role::fallback);

        Self { username, role }
    }
}

struct Inner {
    storage: Arc<dyn KeyValueStore>,
    state: watch::Sender<Session>,
}

/// Single source of truth for authentication state.
///
/// Cloning is cheap; all clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Creates an unauthenticated store over `storage`.
    ///
    /// Call [`restore`](Self::restore) once at start-up to pick up a
    /// persisted session.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            inner: Arc::new(Inner { storage, state }),
        }
    }

    /// Restores a persisted session.
    ///
    /// Storage errors are treated as "no session". Returns true if a
    /// complete session was found.
    pub fn restore(&self) -> bool {
        let storage = &self.inner.storage;
        let read = |key: &str| match storage.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, key, "failed to read persisted session");
                None
            }
        };

        let (Some(token), Some(username), Some(stored_role)) =
            (read(TOKEN_KEY), read(USERNAME_KEY), read(ROLE_KEY))
        else {
            tracing::debug!("no persisted session");
            return false;
        };

        let Some(role) = Role::parse(&stored_role) else {
            tracing::debug!("persisted session has an empty role");
            return false;
        };

        if role.as_str() != stored_role
            && let Err(e) = storage.set(ROLE_KEY, role.as_str())
        {
            tracing::warn!(error = %e, "failed to rewrite normalized role");
        }

        tracing::info!(username = %username, role = %role, "session restored");
        self.inner
            .state
            .send_replace(Session::established(token, username, role));
        true
    }

    /// Authenticates against `backend` and establishes the session.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`AuthError`] unchanged, or
    /// [`AuthError::Storage`] if the session could not be persisted.
    pub async fn login<B>(
        &self,
        backend: &B,
        credentials: &LoginRequest,
    ) -> Result<Session, AuthError>
    where
        B: AuthBackend + ?Sized,
    {
        let response = backend.login(credentials).await.inspect_err(|e| {
            tracing::warn!(error = %e, email = %credentials.email, "login failed");
        })?;

        let Identity { username, role } = Identity::from_login(&response);
        let session = Session::established(response.token, username, role);

        if let Err(e) = self.persist(&session) {
            tracing::error!(error = %e, "failed to persist session");
            // Keep memory in step with the rolled-back storage.
            self.inner.state.send_replace(Session::default());
            return Err(AuthError::Storage {
                details: e.to_string(),
            });
        }

        tracing::info!(
            username = session.username().unwrap_or_default(),
            role = %session.role().map(Role::as_str).unwrap_or_default(),
            "session established"
        );
        self.inner.state.send_replace(session.clone());
        Ok(session)
    }

    /// Creates a new account. The current session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`AuthError`] unchanged.
    pub async fn register<B>(
        &self,
        backend: &B,
        data: &RegisterRequest,
    ) -> Result<serde_json::Value, AuthError>
    where
        B: AuthBackend + ?Sized,
    {
        let answer = backend.register(data).await;
        match &answer {
            Ok(_) => tracing::info!(email = %data.email, "account registered"),
            Err(e) => tracing::warn!(error = %e, email = %data.email, "registration failed"),
        }
        answer
    }

    /// Clears the session and sends the user to the login screen.
    pub fn logout(&self, navigator: &dyn Navigator) {
        self.clear();
        tracing::info!("session closed");
        navigator.navigate(LOGIN_PATH);
    }

    /// Clears the session without navigating.
    ///
    /// Used when the token turns out to be expired or rejected.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, USERNAME_KEY, ROLE_KEY] {
            if let Err(e) = self.inner.storage.remove(key) {
                tracing::warn!(error = %e, key, "failed to remove session key");
            }
        }
        self.inner.state.send_replace(Session::default());
    }

    /// Returns a copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Subscribes to session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Returns true when the current session is authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    /// Returns the current bearer token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token().map(str::to_string)
    }

    /// Returns the current normalized role.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.inner.state.borrow().role().cloned()
    }

    /// Returns true if the current token is present and not expired.
    #[must_use]
    pub fn is_token_valid(&self) -> bool {
        self.inner
            .state
            .borrow()
            .is_token_valid_at(Utc::now().timestamp())
    }

    /// Returns true if the current role is exactly `role`.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.inner.state.borrow().has_role(role)
    }

    /// Returns true if the current role is a member of `roles`.
    #[must_use]
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        self.inner.state.borrow().has_any_role(roles)
    }

    /// Writes all three keys, removing them all again if any write fails.
    fn persist(&self, session: &Session) -> Result<(), Report<StorageError>> {
        let storage = &self.inner.storage;
        let entries = [
            (TOKEN_KEY, session.token()),
            (USERNAME_KEY, session.username()),
            (ROLE_KEY, session.role().map(Role::as_str)),
        ];
        for (key, value) in entries {
            let written = storage.set(key, value.unwrap_or_default());
            if written.is_err() {
                for key in [TOKEN_KEY, USERNAME_KEY, ROLE_KEY] {
                    if let Err(e) = storage.remove(key) {
                        tracing::warn!(error = %e, key, "failed to roll back session key");
                    }
                }
                return written;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.inner.state.borrow();
        f.debug_struct("SessionStore")
            .field("authenticated", &session.is_authenticated())
            .field("role", &session.role())
            .finish_non_exhaustive()
    }
}
