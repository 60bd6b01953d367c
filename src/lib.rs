//! kakao-login - Kakao OAuth login handshake and backend API probe
//!
//! The library holds the whole flow: session state with a persisted bearer
//! token, the OAuth callback state machine, login initiation and the
//! diagnostic probe. Two front ends sit on top of it.
//!
//! ## Architecture
//!
//! - **Native**: `kakao-login` CLI (token in a JSON file, navigation printed)
//! - **Web**: `kakao-login-web` DOM frontend (localStorage, `window.Kakao` SDK)
//!
//! ## Usage
//!
//! For native builds:
//! ```bash
//! cargo build --features native
//! ```
//!
//! For web builds:
//! ```bash
//! wasm-pack build --target web --no-default-features --features dom-web
//! ```

// Core modules (available on all platforms)
pub mod config;
pub mod error;
pub mod router;
pub mod storage;

// Debug logging system (available on all platforms)
pub mod debug;

// Session + provider client capability
pub mod provider;
pub mod session;

// OAuth flow and backend calls
pub mod authorize;
pub mod backend;
pub mod callback;
pub mod probe;

// Headless app core and its render boundary
pub mod app;
pub mod ui;
pub mod ui_snapshot;

// Platform abstraction layer
pub mod platform;

// WASM-specific JavaScript bridge (Kakao SDK)
pub mod webshim;

// Re-export commonly used types
pub use app::App;
pub use backend::{Backend, HttpBackend};
pub use callback::{CallbackHandler, CallbackState};
pub use config::Config;
pub use error::AuthError;
pub use session::{Session, SessionManager};
