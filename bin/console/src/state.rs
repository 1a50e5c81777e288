//! Application-wide state shared through Leptos context.

use contable_api::ApiClient;
use contable_core::KeyValueStore;
use contable_platform_access::{Session, SessionStore};
use leptos::prelude::*;
use std::sync::Arc;

/// Shared console state.
///
/// The [`SessionStore`] is the source of truth; `session` mirrors it so
/// views re-render when it changes.
#[derive(Clone)]
pub struct ConsoleState {
    pub store: SessionStore,
    pub storage: Arc<dyn KeyValueStore>,
    /// Latest session snapshot, for reactive reads.
    pub session: RwSignal<Session>,
    /// Set once the persisted session has been restored in the browser.
    pub restored: RwSignal<bool>,
    api_base: RwSignal<Option<String>>,
}

impl ConsoleState {
    /// Creates the state over `storage`. Nothing is restored yet.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let store = SessionStore::new(storage.clone());
        Self {
            session: RwSignal::new(store.snapshot()),
            store,
            storage,
            restored: RwSignal::new(false),
            api_base: RwSignal::new(None),
        }
    }

    /// Restores the persisted session, dropping it if the token expired.
    pub fn restore(&self) {
        if self.store.restore() && !self.store.is_token_valid() {
            tracing::info!("persisted token expired; clearing session");
            self.store.clear();
        }
        self.session.set(self.store.snapshot());
        self.restored.set(true);
    }

    /// Keeps `session` in step with the store.
    pub fn mirror(&self) {
        let mut changes = self.store.subscribe();
        let session = self.session;
        leptos::task::spawn_local(async move {
            while changes.changed().await.is_ok() {
                let latest = changes.borrow_and_update().clone();
                session.set(latest);
            }
        });
    }

    /// Builds an API client, looking up the backend location on first use.
    ///
    /// # Errors
    ///
    /// Returns a displayable message if the backend location is unknown or
    /// the client cannot be built.
    pub async fn client(&self) -> Result<ApiClient<SessionStore>, String> {
        let base = match self.api_base.get_untracked() {
            Some(base) => base,
            None => {
                let base = crate::app::api_settings().await.map_err(|e| {
                    tracing::warn!(error = %e, "failed to fetch API settings");
                    e.to_string()
                })?;
                self.api_base.set(Some(base.clone()));
                base
            }
        };

        ApiClient::new(base, self.store.clone()).map_err(|e| {
            tracing::error!(error = %e, "failed to build API client");
            e.to_string()
        })
    }

    /// Clears the session after the backend rejected the token.
    pub fn expire(&self) {
        tracing::info!("backend rejected token; clearing session");
        self.store.clear();
        self.session.set(self.store.snapshot());
    }
}
