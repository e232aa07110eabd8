//! Shared state handed to every page: configuration, the session store and
//! a pooled HTTP client.

use std::sync::Arc;

use askknightro_core::navigation::{select_menu, NavMenu};
use askknightro_core::session::{self, Session, SessionResolver, SessionStore};
use askknightro_core::types::DbId;

use crate::api::KnightroApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, PageError};

#[derive(Clone)]
pub struct SessionContext {
    config: Arc<ClientConfig>,
    store: Arc<dyn SessionStore>,
    api: KnightroApi,
}

impl SessionContext {
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let api = KnightroApi::from_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            store,
            api,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    /// The current session, read fresh from the store.
    pub fn session(&self) -> Session {
        Session::load(self.store.as_ref())
    }

    /// Resolve the role for one page mount and pick its menu.
    pub fn mount_navigation(&self) -> (SessionResolver, Option<NavMenu>) {
        let mut resolver = SessionResolver::new();
        resolver.resolve(self.store.as_ref());
        let menu = select_menu(&resolver);
        (resolver, menu)
    }

    /// API client carrying the stored access token, if any.
    pub fn api(&self) -> KnightroApi {
        self.api
            .clone()
            .with_token(session::access_token(self.store.as_ref()))
    }

    pub fn user_id(&self) -> Option<DbId> {
        session::user_id(self.store.as_ref())
    }

    /// The stored user id, or [`PageError::NotSignedIn`].
    pub fn require_user_id(&self) -> Result<DbId, PageError> {
        self.user_id().ok_or(PageError::NotSignedIn)
    }
}
