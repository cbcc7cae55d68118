//! Session lifecycle for the signed-in administrator.
//!
//! The store holds at most one session and moves between two states:
//! unauthenticated and authenticated, gated by the presence of a token.
//! `login` and `logout` are the only mutating entry points; everything else
//! reads an immutable snapshot. Storage is written before memory so that a
//! failed login can never leave memory and storage disagreeing about the token.

use super::{
    client::AdminApi,
    error::{Error, Result},
    storage::{Storage, REFRESH_TOKEN_KEY, TOKEN_EXPIRY_KEY, TOKEN_KEY, USER_KEY},
    types::{Identity, LoginResponse},
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{error, info, warn};

/// Authenticated identity plus the tokens issued for it.
#[derive(Clone, Debug)]
pub struct Session {
    identity: Identity,
    token: SecretString,
    refresh_token: Option<SecretString>,
    expires_at: Option<String>,
}

impl Session {
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }

    #[must_use]
    pub const fn refresh_token(&self) -> Option<&SecretString> {
        self.refresh_token.as_ref()
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<&str> {
        self.expires_at.as_deref()
    }
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            identity: response.user,
            token: SecretString::from(response.token),
            refresh_token: response
                .refresh_token
                .filter(|token| !token.trim().is_empty())
                .map(SecretString::from),
            expires_at: response.expires_at,
        }
    }
}

pub struct SessionStore {
    storage: Arc<dyn Storage>,
    current: RwLock<Option<Session>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Creates an unauthenticated store; call [`SessionStore::restore`] to
    /// rehydrate a persisted session.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            current: RwLock::new(None),
        }
    }

    /// Rehydrates the session from storage. Missing or unreadable entries
    /// leave the store unauthenticated; this never fails.
    pub fn restore(&self) -> bool {
        let session = match self.read_persisted() {
            Ok(session) => session,
            Err(err) => {
                warn!("ignoring persisted session: {err}");
                None
            }
        };

        let authenticated = session.is_some();
        if let Some(session) = &session {
            info!(user = %session.identity.email, "session restored");
        }
        *self.write() = session;
        authenticated
    }

    /// Exchanges credentials for a session. Every failure, from transport to
    /// rejected credentials to storage, is logged and reported as `false`;
    /// the previous session, if any, stays in place.
    pub async fn login(&self, api: &AdminApi, email: &str, password: &SecretString) -> bool {
        match self.try_login(api, email, password).await {
            Ok(session) => {
                info!(user = %session.identity.email, "signed in");
                true
            }
            Err(err) => {
                error!("login failed: {err}");
                false
            }
        }
    }

    /// Same as [`SessionStore::login`] but returns the failure to the caller.
    ///
    /// # Errors
    /// Returns `Error::Auth` for rejected credentials, `Error::Storage` when the
    /// session cannot be persisted, or any gateway error from the login call.
    pub async fn try_login(
        &self,
        api: &AdminApi,
        email: &str,
        password: &SecretString,
    ) -> Result<Session> {
        let response = api.login(email, password).await?;
        if response.token.trim().is_empty() {
            return Err(Error::Auth("Login response did not include a token.".to_string()));
        }

        let session = Session::from(response);
        self.persist(&session)?;
        *self.write() = Some(session.clone());
        Ok(session)
    }

    /// Drops the session from memory and storage. Local only; no request is
    /// sent, and calling it while signed out is a no-op.
    pub fn logout(&self) {
        *self.write() = None;
        if let Err(err) = self.storage.clear() {
            error!("failed to clear session storage: {err}");
        }
        info!("signed out");
    }

    /// Immutable copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Current session or `Error::Auth` when signed out.
    ///
    /// # Errors
    /// Returns `Error::Auth` if no session is active.
    pub fn require(&self) -> Result<Session> {
        self.snapshot()
            .ok_or_else(|| Error::Auth("not signed in; run `login` first".to_string()))
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_persisted(&self) -> Result<Option<Session>> {
        let Some(token) = self.non_empty(TOKEN_KEY)? else {
            return Ok(None);
        };
        let Some(user) = self.non_empty(USER_KEY)? else {
            return Ok(None);
        };

        let identity: Identity = serde_json::from_str(&user)
            .map_err(|err| Error::Storage(format!("Failed to parse stored identity: {err}")))?;

        Ok(Some(Session {
            identity,
            token: SecretString::from(token),
            refresh_token: self.non_empty(REFRESH_TOKEN_KEY)?.map(SecretString::from),
            expires_at: self.non_empty(TOKEN_EXPIRY_KEY)?,
        }))
    }

    fn non_empty(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .storage
            .get(key)?
            .filter(|value| !value.trim().is_empty()))
    }

    /// Writes every session key, restoring the previous values if any write fails.
    fn persist(&self, session: &Session) -> Result<()> {
        let user = serde_json::to_string(&session.identity)
            .map_err(|err| Error::Storage(format!("Failed to encode identity: {err}")))?;

        let entries: [(&str, Option<&str>); 4] = [
            (TOKEN_KEY, Some(session.token.expose_secret())),
            (
                REFRESH_TOKEN_KEY,
                session
                    .refresh_token
                    .as_ref()
                    .map(|token| token.expose_secret()),
            ),
            (TOKEN_EXPIRY_KEY, session.expires_at.as_deref()),
            (USER_KEY, Some(user.as_str())),
        ];

        let mut previous = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let result = self.storage.get(key).and_then(|old| {
                previous.push((key, old));
                match value {
                    Some(value) => self.storage.set(key, value),
                    None => self.storage.remove(key),
                }
            });

            if let Err(err) = result {
                self.rollback(&previous);
                return Err(err);
            }
        }

        Ok(())
    }

    fn rollback(&self, previous: &[(&str, Option<String>)]) {
        for (key, old) in previous {
            let restored = match old {
                Some(value) => self.storage.set(key, value),
                None => self.storage.remove(key),
            };
            if let Err(err) = restored {
                error!("failed to restore {key} in storage: {err}");
            }
        }
    }
}
