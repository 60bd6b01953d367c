//! Headless app core shared by the CLI and the DOM front end.
//!
//! Owns the session, the callback handler and the navigator, plus the
//! user-visible fields a renderer needs (probe response, page error, notice).
//! Async work is split into begin/finish pairs so the browser front end can
//! await without holding a borrow of the app.

use serde_json::Value;

use crate::authorize;
use crate::backend::Backend;
use crate::callback::{Begin, CallbackHandler, CallbackState};
use crate::config::Config;
use crate::debug::{self, cat};
use crate::error::AuthError;
use crate::platform::Navigator;
use crate::probe::{self, ProbeOutcome};
use crate::provider::IdentityProvider;
use crate::router::{self, Route};
use crate::session::SessionManager;
use crate::storage::TokenStore;
use crate::ui_snapshot::UiSnapshot;

pub const LOGIN_SUCCESS_NOTICE: &str = "Kakao login succeeded!";
pub const MISSING_CODE_NOTICE: &str = "No authorization code was received.";
pub const LOGIN_ERROR_PREFIX: &str = "Error while processing login: ";

pub struct App {
    config: Config,
    session: SessionManager,
    callback: CallbackHandler,
    navigator: Box<dyn Navigator>,
    route: Route,
    response: Option<String>,
    error: Option<String>,
    notice: Option<String>,
}

impl App {
    /// Initialize the provider client and restore any persisted session.
    pub fn new(
        config: Config,
        store: Box<dyn TokenStore>,
        mut provider: Box<dyn IdentityProvider>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        provider.initialize(&config.client_id);
        let mut session = SessionManager::new(store, provider);
        session.restore();

        let route = router::parse(&navigator.pathname(), &config.callback_path);
        debug::log(cat::ROUTER, format!("route={route:?}"));

        let callback = CallbackHandler::new(config.callback_path.clone());
        Self {
            config,
            session,
            callback,
            navigator,
            route,
            response: None,
            error: None,
            notice: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionManager {
        &mut self.session
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn callback_state(&self) -> &CallbackState {
        self.callback.state()
    }

    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn snapshot(&self) -> UiSnapshot {
        UiSnapshot::from_app(self)
    }

    // ----- OAuth callback -----

    /// Returns the code to exchange when this page load should exchange one.
    pub fn start_callback(&mut self) -> Option<String> {
        match self.callback.begin(self.navigator.as_mut()) {
            Begin::Exchange(code) => {
                self.error = None;
                Some(code)
            }
            Begin::Failed(AuthError::Provider(reason)) => {
                // Must be shown before navigation: the next page load starts without a notice.
                let notice = format!("Kakao login error: {reason}");
                self.navigator.alert(&notice);
                self.notice = Some(notice);
                self.navigator.navigate("/");
                self.route = router::parse(&self.navigator.pathname(), &self.config.callback_path);
                None
            }
            Begin::Failed(AuthError::MissingCode) => {
                self.notice = Some(MISSING_CODE_NOTICE.to_string());
                None
            }
            Begin::Failed(err) => {
                self.error = Some(format!("{LOGIN_ERROR_PREFIX}{err}"));
                None
            }
            Begin::Suppressed | Begin::NotCallback => None,
        }
    }

    pub fn finish_callback(&mut self, result: Result<Value, AuthError>) {
        match self.callback.finish(result, &mut self.session) {
            CallbackState::Succeeded => {
                self.notice = Some(LOGIN_SUCCESS_NOTICE.to_string());
            }
            CallbackState::Failed(err) => {
                self.error = Some(format!("{LOGIN_ERROR_PREFIX}{err}"));
            }
            CallbackState::Idle | CallbackState::Processing => {}
        }
    }

    pub async fn process_callback(&mut self, backend: &dyn Backend) {
        if let Some(code) = self.start_callback() {
            let result = backend.exchange_code(&code).await;
            self.finish_callback(result);
        }
    }

    // ----- Buttons -----

    pub fn login_clicked(&mut self) {
        if let Err(err) =
            authorize::begin_login(&self.config, self.session.provider(), self.navigator.as_mut())
        {
            self.notice = Some(err.to_string());
        }
    }

    pub fn logout_clicked(&mut self) {
        self.session.logout();
    }

    /// Clears the previous probe output; returns the token to send, if any.
    pub fn begin_probe(&mut self) -> Option<String> {
        self.response = None;
        self.error = None;
        self.session.token().map(str::to_string)
    }

    pub fn finish_probe(&mut self, outcome: ProbeOutcome) {
        match outcome {
            ProbeOutcome::Response(text) => self.response = Some(text),
            ProbeOutcome::Error(msg) => self.error = Some(msg),
        }
    }

    pub async fn run_probe(&mut self, backend: &dyn Backend) {
        let token = self.begin_probe();
        let outcome = probe::run_probe(backend, token.as_deref()).await;
        self.finish_probe(outcome);
    }
}
