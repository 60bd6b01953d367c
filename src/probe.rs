//! Diagnostic API probe: one GET, raw text out.

use crate::backend::Backend;
use crate::debug::{self, cat};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Body text, whatever the HTTP status was.
    Response(String),
    /// The request itself failed.
    Error(String),
}

pub async fn run_probe(backend: &dyn Backend, token: Option<&str>) -> ProbeOutcome {
    debug::log(cat::NET, format!("probe start (auth={})", token.is_some()));
    match backend.probe(token).await {
        Ok(text) => ProbeOutcome::Response(text),
        Err(err) => {
            log::error!("[probe] request failed: {err}");
            let msg = err.to_string();
            if msg.is_empty() {
                ProbeOutcome::Error("Unknown Error".into())
            } else {
                ProbeOutcome::Error(msg)
            }
        }
    }
}
