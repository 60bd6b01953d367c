//! Shared test doubles for the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;

use kakao_login::platform::{MemoryNavigator, Navigator};
use kakao_login::provider::IdentityProvider;
use kakao_login::storage::MemoryStore;
use kakao_login::{App, AuthError, Backend, Config};

pub const ORIGIN: &str = "http://localhost:3000";
pub const CALLBACK: &str = "http://localhost:3000/api/auth/kakao-redirect";

/// Backend double that records calls and replays canned replies.
pub struct MockBackend {
    exchange_reply: Result<Value, AuthError>,
    probe_reply: Result<String, AuthError>,
    pub exchanged_codes: RefCell<Vec<String>>,
    pub probe_tokens: RefCell<Vec<Option<String>>>,
    /// Page query observed at the moment of the exchange.
    pub search_at_exchange: RefCell<Vec<String>>,
    watch: Option<MemoryNavigator>,
}

impl MockBackend {
    pub fn replying(exchange_reply: Result<Value, AuthError>) -> Self {
        Self {
            exchange_reply,
            probe_reply: Ok(String::new()),
            exchanged_codes: RefCell::new(Vec::new()),
            probe_tokens: RefCell::new(Vec::new()),
            search_at_exchange: RefCell::new(Vec::new()),
            watch: None,
        }
    }

    pub fn with_probe(mut self, reply: Result<String, AuthError>) -> Self {
        self.probe_reply = reply;
        self
    }

    pub fn watching(mut self, nav: MemoryNavigator) -> Self {
        self.watch = Some(nav);
        self
    }

    pub fn exchange_count(&self) -> usize {
        self.exchanged_codes.borrow().len()
    }
}

#[async_trait(?Send)]
impl Backend for MockBackend {
    async fn exchange_code(&self, code: &str) -> Result<Value, AuthError> {
        self.exchanged_codes.borrow_mut().push(code.to_string());
        if let Some(nav) = &self.watch {
            self.search_at_exchange.borrow_mut().push(nav.search());
        }
        self.exchange_reply.clone()
    }

    async fn probe(&self, token: Option<&str>) -> Result<String, AuthError> {
        self.probe_tokens
            .borrow_mut()
            .push(token.map(str::to_string));
        self.probe_reply.clone()
    }
}

/// Provider double: readiness is fixed, logout calls are counted.
#[derive(Clone)]
pub struct MockProvider {
    ready: bool,
    fail_logout: bool,
    pub logouts: Rc<Cell<usize>>,
}

impl MockProvider {
    pub fn ready() -> Self {
        Self {
            ready: true,
            fail_logout: false,
            logouts: Rc::new(Cell::new(0)),
        }
    }

    pub fn not_ready() -> Self {
        Self {
            ready: false,
            ..Self::ready()
        }
    }

    pub fn failing_logout() -> Self {
        Self {
            fail_logout: true,
            ..Self::ready()
        }
    }
}

impl IdentityProvider for MockProvider {
    fn initialize(&mut self, _client_id: &str) {}

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn logout(&mut self) -> Result<()> {
        self.logouts.set(self.logouts.get() + 1);
        if self.fail_logout {
            Err(anyhow!("sdk exploded"))
        } else {
            Ok(())
        }
    }
}

pub struct Harness {
    pub app: App,
    pub store: MemoryStore,
    pub nav: MemoryNavigator,
}

pub fn harness(page: &str, store: MemoryStore, provider: MockProvider) -> Harness {
    let nav = MemoryNavigator::new(page).expect("valid page url");
    let app = App::new(
        Config::default(),
        Box::new(store.clone()),
        Box::new(provider),
        Box::new(nav.clone()),
    );
    Harness { app, store, nav }
}
