//! Session context: login state plus the persisted bearer token.
//!
//! Replaces a page-level global with an explicit object handed to whoever needs
//! it. Every mutation bumps [`SessionManager::revision`] and notifies subscribers
//! so a renderer can re-draw.

use crate::config::TOKEN_STORAGE_KEY;
use crate::debug::{self, cat};
use crate::provider::IdentityProvider;
use crate::storage::TokenStore;

/// Current authentication state. Logged in iff a non-empty token is held.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        matches!(self.token.as_deref(), Some(t) if !t.is_empty())
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// First 20 characters of the token followed by `...`.
    pub fn token_preview(&self) -> Option<String> {
        self.token().map(token_preview)
    }
}

pub fn token_preview(token: &str) -> String {
    let head: String = token.chars().take(20).collect();
    format!("{head}...")
}

type Listener = Box<dyn Fn(&Session)>;

pub struct SessionManager {
    session: Session,
    store: Box<dyn TokenStore>,
    provider: Box<dyn IdentityProvider>,
    storage_key: String,
    revision: u64,
    listeners: Vec<Listener>,
}

impl SessionManager {
    pub fn new(store: Box<dyn TokenStore>, provider: Box<dyn IdentityProvider>) -> Self {
        Self {
            session: Session::default(),
            store,
            provider,
            storage_key: TOKEN_STORAGE_KEY.to_string(),
            revision: 0,
            listeners: Vec::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    /// Incremented on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn provider(&self) -> &dyn IdentityProvider {
        self.provider.as_ref()
    }

    /// Register a callback invoked after every session change.
    pub fn subscribe(&mut self, listener: impl Fn(&Session) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Load a previously persisted token. No network call.
    pub fn restore(&mut self) {
        match self.store.get(&self.storage_key) {
            Ok(Some(token)) if !token.is_empty() => {
                debug::log(cat::SESSION, "restored token from storage");
                self.set(Some(token));
            }
            Ok(_) => debug::log(cat::SESSION, "no stored token"),
            Err(e) => log::warn!("[session] failed to read stored token: {e:#}"),
        }
    }

    pub fn login(&mut self, token: &str) {
        if token.is_empty() {
            log::warn!("[session] ignoring login with empty token");
            return;
        }
        if let Err(e) = self.store.set(&self.storage_key, token) {
            log::warn!("[session] failed to persist token: {e:#}");
        }
        log::info!("[session] logged in");
        self.set(Some(token.to_string()));
    }

    pub fn logout(&mut self) {
        if let Err(e) = self.store.remove(&self.storage_key) {
            log::warn!("[session] failed to remove stored token: {e:#}");
        }
        self.set(None);
        match self.provider.logout() {
            Ok(()) => debug::log(cat::AUTH, "provider logout complete"),
            Err(e) => log::warn!("[session] provider logout failed: {e:#}"),
        }
        log::info!("[session] logged out");
    }

    fn set(&mut self, token: Option<String>) {
        self.session = Session { token };
        self.revision += 1;
        for listener in &self.listeners {
            listener(&self.session);
        }
    }
}
