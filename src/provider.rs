//! Identity provider client capability.
//!
//! The browser build talks to the Kakao JS SDK (`platform::KakaoSdk`); native
//! builds and tests use [`LocalProvider`] or their own mock.

use anyhow::{anyhow, Result};

use crate::debug::{self, cat};

pub trait IdentityProvider {
    /// Start (or restart) the client with the application's client id.
    fn initialize(&mut self, client_id: &str);

    /// True once the client can start an authorization redirect.
    fn is_ready(&self) -> bool;

    /// Tell the provider the user logged out. Callers treat failure as non-fatal.
    fn logout(&mut self) -> Result<()>;
}

/// Provider client without a remote SDK: ready as soon as it has a client id.
#[derive(Debug, Default, Clone)]
pub struct LocalProvider {
    client_id: Option<String>,
}

impl LocalProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityProvider for LocalProvider {
    fn initialize(&mut self, client_id: &str) {
        let id = client_id.trim();
        self.client_id = (!id.is_empty()).then(|| id.to_string());
        debug::log(cat::AUTH, format!("local provider ready={}", self.is_ready()));
    }

    fn is_ready(&self) -> bool {
        self.client_id.is_some()
    }

    fn logout(&mut self) -> Result<()> {
        if !self.is_ready() {
            return Err(anyhow!("provider client not initialized"));
        }
        debug::log(cat::AUTH, "local provider logout (nothing to notify)");
        Ok(())
    }
}
