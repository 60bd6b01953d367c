//! Session, login initiation and API probe through the app core.

mod common;

use common::{harness, MockBackend, MockProvider, ORIGIN};
use serde_json::json;

use kakao_login::config::TOKEN_STORAGE_KEY;
use kakao_login::storage::MemoryStore;
use kakao_login::ui_snapshot::UiSnapshot;
use kakao_login::AuthError;

#[test]
fn startup_restores_persisted_token() {
    let store = MemoryStore::with_entry(TOKEN_STORAGE_KEY, "persisted-token-0123456789");
    let h = harness(&format!("{ORIGIN}/"), store, MockProvider::ready());

    assert!(h.app.session().is_logged_in());
    let snap: UiSnapshot = h.app.snapshot();
    assert!(snap.session.logged_in);
    assert_eq!(snap.session.token_preview.as_deref(), Some("persisted-token-0123..."));
}

#[test]
fn logout_clears_storage_and_notifies_provider() {
    let provider = MockProvider::ready();
    let logouts = provider.logouts.clone();
    let store = MemoryStore::with_entry(TOKEN_STORAGE_KEY, "t");
    let mut h = harness(&format!("{ORIGIN}/"), store, provider);

    h.app.logout_clicked();

    assert!(!h.app.session().is_logged_in());
    assert_eq!(h.store.peek(TOKEN_STORAGE_KEY), None);
    assert_eq!(logouts.get(), 1);
}

#[test]
fn provider_logout_failure_is_not_fatal() {
    let store = MemoryStore::with_entry(TOKEN_STORAGE_KEY, "t");
    let mut h = harness(&format!("{ORIGIN}/"), store, MockProvider::failing_logout());

    h.app.logout_clicked();

    assert!(!h.app.session().is_logged_in());
    assert_eq!(h.store.peek(TOKEN_STORAGE_KEY), None);
}

#[test]
fn login_navigates_to_authorize_url() {
    let mut h = harness(&format!("{ORIGIN}/"), MemoryStore::new(), MockProvider::ready());

    h.app.login_clicked();

    let visits = h.nav.visits();
    assert_eq!(visits.len(), 1);
    assert!(visits[0].starts_with("https://kauth.kakao.com/oauth/authorize?client_id="));
    assert!(visits[0].contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fapi%2Fauth%2Fkakao-redirect"));
    assert!(visits[0].ends_with("&response_type=code"));
    assert_eq!(h.app.notice(), None);
}

#[test]
fn login_refused_while_sdk_not_ready() {
    let mut h = harness(&format!("{ORIGIN}/"), MemoryStore::new(), MockProvider::not_ready());

    h.app.login_clicked();

    assert!(h.nav.visits().is_empty());
    assert_eq!(h.app.notice(), Some(AuthError::SdkNotReady.to_string().as_str()));

    h.app.dismiss_notice();
    assert_eq!(h.app.notice(), None);
}

#[tokio::test]
async fn probe_sends_token_only_when_logged_in() {
    let mut h = harness(&format!("{ORIGIN}/"), MemoryStore::new(), MockProvider::ready());
    let backend = MockBackend::replying(Ok(json!({}))).with_probe(Ok("[\"rust\"]".into()));

    h.app.run_probe(&backend).await;
    h.app.session_mut().login("bearer-1");
    h.app.run_probe(&backend).await;

    assert_eq!(
        *backend.probe_tokens.borrow(),
        vec![None, Some("bearer-1".to_string())]
    );
    assert_eq!(h.app.response(), Some("[\"rust\"]"));
    assert_eq!(h.app.error(), None);
}

#[tokio::test]
async fn probe_failure_replaces_previous_response() {
    let mut h = harness(&format!("{ORIGIN}/"), MemoryStore::new(), MockProvider::ready());
    let ok = MockBackend::replying(Ok(json!({}))).with_probe(Ok("first".into()));
    let failing = MockBackend::replying(Ok(json!({})))
        .with_probe(Err(AuthError::Transport("Failed to fetch".into())));

    h.app.run_probe(&ok).await;
    assert_eq!(h.app.response(), Some("first"));

    h.app.run_probe(&failing).await;
    assert_eq!(h.app.response(), None);
    assert_eq!(h.app.error(), Some("Failed to fetch"));
}

#[tokio::test]
async fn probe_with_empty_error_text_reports_unknown() {
    let mut h = harness(&format!("{ORIGIN}/"), MemoryStore::new(), MockProvider::ready());
    let backend =
        MockBackend::replying(Ok(json!({}))).with_probe(Err(AuthError::Transport(String::new())));

    h.app.run_probe(&backend).await;

    assert_eq!(h.app.error(), Some("Unknown Error"));
}
