//! OAuth callback handling.
//!
//! `Idle -> Processing -> {Succeeded, Failed}` once per page load:
//! - `error=<reason>` in the query fails immediately, no network call
//! - no `code` either fails with [`AuthError::MissingCode`], no network call
//! - `code=<code>` strips the query from the visible URL, then exchanges the code
//!
//! [`CallbackHandler::begin`] and [`CallbackHandler::finish`] are synchronous so
//! a caller holding the app behind a `RefCell` can drop its borrow across the
//! exchange; [`CallbackHandler::run`] chains both for everyone else.

use serde_json::Value;

use crate::backend::Backend;
use crate::debug::{self, cat};
use crate::error::AuthError;
use crate::platform::Navigator;
use crate::router::{self, AuthorizationResult, Route};
use crate::session::SessionManager;

/// Response fields that may hold the token, in priority order.
pub const TOKEN_FIELDS: [&str; 3] = ["token", "accessToken", "access_token"];

/// Stored when a 2xx exchange response carries none of [`TOKEN_FIELDS`].
///
/// This treats "no token" as a successful login. Kept deliberately so the
/// backend contract can be settled before it changes.
///
/// Only non-empty JSON strings count as a token. A numeric or boolean `token`
/// (e.g. `12345`) is not stringified and falls through to this sentinel.
pub const FALLBACK_TOKEN: &str = "token_received";

/// First non-empty string among [`TOKEN_FIELDS`], else [`FALLBACK_TOKEN`].
pub fn extract_token(body: &Value) -> String {
    TOKEN_FIELDS
        .iter()
        .find_map(|field| match body.get(*field) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        })
        .unwrap_or_else(|| {
            log::warn!("[callback] exchange response has no token field, using fallback");
            FALLBACK_TOKEN.to_string()
        })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackState {
    Idle,
    Processing,
    Succeeded,
    Failed(AuthError),
}

impl CallbackState {
    pub fn name(&self) -> &'static str {
        match self {
            CallbackState::Idle => "idle",
            CallbackState::Processing => "processing",
            CallbackState::Succeeded => "succeeded",
            CallbackState::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CallbackState::Succeeded | CallbackState::Failed(_))
    }
}

/// Fires at most once.
#[derive(Debug, Default)]
pub struct OneShot {
    fired: bool,
}

impl OneShot {
    /// True on the first call only.
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }
}

/// What [`CallbackHandler::begin`] decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Begin {
    /// Query stripped, exchange this code next.
    Exchange(String),
    /// Terminal failure without a network call.
    Failed(AuthError),
    /// Already handled during this page load.
    Suppressed,
    /// Current page is not the callback route.
    NotCallback,
}

#[derive(Debug)]
pub struct CallbackHandler {
    callback_path: String,
    state: CallbackState,
    guard: OneShot,
}

impl CallbackHandler {
    pub fn new(callback_path: impl Into<String>) -> Self {
        Self {
            callback_path: callback_path.into(),
            state: CallbackState::Idle,
            guard: OneShot::default(),
        }
    }

    pub fn state(&self) -> &CallbackState {
        &self.state
    }

    /// Read the redirect query. The query is removed from the visible URL
    /// before returning [`Begin::Exchange`].
    pub fn begin(&mut self, navigator: &mut dyn Navigator) -> Begin {
        let path = navigator.pathname();
        if router::parse(&path, &self.callback_path) != Route::Callback {
            return Begin::NotCallback;
        }
        if !self.guard.fire() {
            debug::log(cat::CALLBACK, "callback already handled, suppressed");
            return Begin::Suppressed;
        }

        match router::parse_query(&navigator.search()) {
            AuthorizationResult::Error(reason) => {
                log::warn!("[callback] provider returned error: {reason}");
                let err = AuthError::Provider(reason);
                self.state = CallbackState::Failed(err.clone());
                Begin::Failed(err)
            }
            AuthorizationResult::Absent => {
                log::warn!("[callback] no authorization code in redirect");
                self.state = CallbackState::Failed(AuthError::MissingCode);
                Begin::Failed(AuthError::MissingCode)
            }
            AuthorizationResult::Code(code) => {
                navigator.replace_url(&path);
                self.state = CallbackState::Processing;
                debug::log(cat::CALLBACK, "code received, query stripped");
                Begin::Exchange(code)
            }
        }
    }

    /// Apply the exchange outcome. Only a success touches the session.
    pub fn finish(
        &mut self,
        result: Result<Value, AuthError>,
        session: &mut SessionManager,
    ) -> &CallbackState {
        if self.state != CallbackState::Processing {
            log::warn!(
                "[callback] exchange result ignored in state {}",
                self.state.name()
            );
            return &self.state;
        }
        self.state = match result {
            Ok(body) => {
                let token = extract_token(&body);
                session.login(&token);
                CallbackState::Succeeded
            }
            Err(err) => {
                log::error!("[callback] OAuth login error: {err}");
                CallbackState::Failed(err)
            }
        };
        &self.state
    }

    pub async fn run(
        &mut self,
        navigator: &mut dyn Navigator,
        backend: &dyn Backend,
        session: &mut SessionManager,
    ) -> &CallbackState {
        match self.begin(navigator) {
            Begin::Exchange(code) => {
                let result = backend.exchange_code(&code).await;
                self.finish(result, session)
            }
            Begin::Failed(_) | Begin::Suppressed | Begin::NotCallback => &self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_token_field_priority() {
        assert_eq!(extract_token(&json!({"token": "a", "accessToken": "b"})), "a");
        assert_eq!(extract_token(&json!({"accessToken": "b", "access_token": "c"})), "b");
        assert_eq!(extract_token(&json!({"access_token": "c"})), "c");
    }

    #[test]
    fn extract_token_skips_empty_and_non_string() {
        assert_eq!(extract_token(&json!({"token": "", "access_token": "c"})), "c");
        assert_eq!(extract_token(&json!({"token": null, "accessToken": 5})), FALLBACK_TOKEN);
        assert_eq!(extract_token(&json!({"token": 12345})), FALLBACK_TOKEN);
    }

    #[test]
    fn extract_token_falls_back() {
        assert_eq!(extract_token(&json!({})), FALLBACK_TOKEN);
        assert_eq!(extract_token(&json!("bare string")), FALLBACK_TOKEN);
    }

    #[test]
    fn one_shot_fires_once() {
        let mut g = OneShot::default();
        assert!(g.fire());
        assert!(!g.fire());
        assert!(!g.fire());
    }

    #[test]
    fn terminal_states() {
        assert!(!CallbackState::Idle.is_terminal());
        assert!(!CallbackState::Processing.is_terminal());
        assert!(CallbackState::Succeeded.is_terminal());
        assert!(CallbackState::Failed(AuthError::MissingCode).is_terminal());
    }
}
