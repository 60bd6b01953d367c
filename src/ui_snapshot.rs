//! UI snapshot and action types for DOM-based rendering
//!
//! A clean boundary between the headless App core and the DOM frontend:
//! snapshots flow Rust → JS as JSON, actions flow JS → Rust.

use serde::{Deserialize, Serialize};

use crate::app::App;
use crate::callback::CallbackState;
use crate::router::Route;

/// Snapshot of App state for rendering (one-way data flow: Rust → JS)
#[derive(Debug, Clone, Serialize)]
pub struct UiSnapshot {
    /// Which page to draw
    pub route: Route,

    pub session: SessionView,

    pub callback: CallbackView,

    pub probe: ProbeView,

    /// Transient message (login success, provider error, SDK not ready)
    pub notice: Option<String>,

    /// Session revision; changes whenever login state changes
    pub revision: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub logged_in: bool,
    /// First 20 characters of the token + "..."
    pub token_preview: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallbackView {
    /// idle | processing | succeeded | failed
    pub phase: &'static str,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeView {
    pub response: Option<String>,
    /// Probe failure or login failure text
    pub error: Option<String>,
}

impl UiSnapshot {
    pub fn from_app(app: &App) -> Self {
        let session = app.session().session();
        let state = app.callback_state();
        let message = match state {
            CallbackState::Failed(err) => Some(err.to_string()),
            _ => None,
        };
        UiSnapshot {
            route: app.route(),
            session: SessionView {
                logged_in: session.is_logged_in(),
                token_preview: session.token_preview(),
            },
            callback: CallbackView {
                phase: state.name(),
                message,
            },
            probe: ProbeView {
                response: app.response().map(str::to_string),
                error: app.error().map(str::to_string),
            },
            notice: app.notice().map(str::to_string),
            revision: app.session().revision(),
        }
    }
}

/// User actions from DOM (data flow: JS → Rust)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum UiAction {
    /// "Log in with Kakao" button
    Login,
    /// "Log out" button
    Logout,
    /// "API call test" button
    Probe,
    /// Close the notice
    DismissNotice,
}
