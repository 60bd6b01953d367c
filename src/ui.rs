//! Plain-text rendering of a [`UiSnapshot`] for the terminal front end.

use std::fmt::Write;

use crate::router::Route;
use crate::ui_snapshot::UiSnapshot;

pub fn render_text(snap: &UiSnapshot) -> String {
    let mut out = String::new();

    if let Some(notice) = &snap.notice {
        let _ = writeln!(out, "[notice] {notice}");
    }

    match snap.route {
        Route::Callback => {
            let _ = writeln!(out, "Kakao login callback: {}", snap.callback.phase);
            if let Some(err) = &snap.probe.error {
                let _ = writeln!(out, "Login error:");
                let _ = writeln!(out, "  {err}");
            }
        }
        Route::Home => {
            let _ = writeln!(out, "Kakao login");
            match &snap.session.token_preview {
                Some(preview) if snap.session.logged_in => {
                    let _ = writeln!(out, "  logged in");
                    let _ = writeln!(out, "  token: {preview}");
                }
                _ => {
                    let _ = writeln!(out, "  not logged in");
                }
            }
            if let Some(resp) = &snap.probe.response {
                let _ = writeln!(out, "Response:");
                let _ = writeln!(out, "{resp}");
            }
            if let Some(err) = &snap.probe.error {
                let _ = writeln!(out, "Error:");
                let _ = writeln!(out, "{err}");
            }
        }
    }
    out
}
