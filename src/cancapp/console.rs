//! Wiring for a running console: one storage shared by the session store and
//! the gateway, with the session restored once at startup.

use super::{
    client::AdminApi,
    config::ConsoleConfig,
    error::Result,
    gateway::Gateway,
    session::{Session, SessionStore},
    storage::{FileStorage, Storage},
};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct Console {
    api: AdminApi,
    session: SessionStore,
}

impl Console {
    /// Opens the console with file-backed storage at `config.session_file`.
    ///
    /// # Errors
    /// Returns `Error::Config` if the gateway cannot be built.
    pub fn open(config: &ConsoleConfig) -> Result<Self> {
        let storage = Arc::new(FileStorage::new(&config.session_file));
        debug!(path = %config.session_file.display(), "using session file");
        Self::with_storage(config, storage)
    }

    /// Opens the console over any storage backend and restores its session.
    ///
    /// # Errors
    /// Returns `Error::Config` if the gateway cannot be built.
    pub fn with_storage(config: &ConsoleConfig, storage: Arc<dyn Storage>) -> Result<Self> {
        let gateway = Gateway::new(&config.api_base_url, config.timeout, storage.clone())?;
        let session = SessionStore::new(storage);
        session.restore();

        Ok(Self {
            api: AdminApi::new(gateway),
            session,
        })
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub const fn api(&self) -> &AdminApi {
        &self.api
    }

    /// Admin API for views that need a signed-in administrator.
    ///
    /// # Errors
    /// Returns `Error::Auth` when no session is active.
    pub fn authorized(&self) -> Result<&AdminApi> {
        self.session.require()?;
        Ok(&self.api)
    }

    pub async fn login(&self, email: &str, password: &SecretString) -> bool {
        self.session.login(&self.api, email, password).await
    }

    /// # Errors
    /// See [`SessionStore::try_login`].
    pub async fn try_login(&self, email: &str, password: &SecretString) -> Result<Session> {
        self.session.try_login(&self.api, email, password).await
    }

    pub fn logout(&self) {
        self.session.logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancapp::{
        error::Error,
        storage::{MemoryStorage, TOKEN_KEY, USER_KEY},
    };
    use anyhow::Result;
    use tempfile::TempDir;

    #[test]
    fn authorized_requires_session() -> Result<()> {
        let console = Console::with_storage(
            &ConsoleConfig::default(),
            Arc::new(MemoryStorage::new()),
        )?;
        assert!(matches!(console.authorized(), Err(Error::Auth(_))));
        Ok(())
    }

    #[test]
    fn open_restores_persisted_session() -> Result<()> {
        let dir = TempDir::new()?;
        let config = ConsoleConfig::with_overrides(
            None,
            dir.path().join("session.json").to_str(),
            None,
        );

        let storage = FileStorage::new(&config.session_file);
        storage.set(TOKEN_KEY, "persisted")?;
        storage.set(USER_KEY, r#"{"id":"1","email":"admin@cancapp.com"}"#)?;

        let console = Console::open(&config)?;
        assert!(console.session().is_authenticated());
        assert!(console.authorized().is_ok());

        console.logout();
        assert!(!config.session_file.exists());
        Ok(())
    }
}
