//! Page routing and redirect query parsing
//!
//! The app has exactly two pages: the main page and the OAuth callback page the
//! identity provider redirects back to. The callback page carries either
//! `code=<authorization code>` or `error=<reason>` in its query string.
//!
//! ```rust,ignore
//! use kakao_login::router::{parse, parse_query, AuthorizationResult, Route};
//!
//! assert_eq!(parse("/api/auth/kakao-redirect?code=abc", "/api/auth/kakao-redirect"), Route::Callback);
//! assert_eq!(parse_query("?code=abc"), AuthorizationResult::Code("abc".into()));
//! ```

use serde::Serialize;

/// Strip query and fragment from URL path
#[inline]
fn strip_query_frag(s: &str) -> &str {
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'?' || b == b'#' {
            return &s[..i];
        }
    }
    s
}

/// Drop trailing slashes, keeping a lone "/".
#[inline]
fn trim_trailing_slash(s: &str) -> &str {
    let t = s.trim_end_matches('/');
    if t.is_empty() {
        "/"
    } else {
        t
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Main page (login/logout + API test)
    Home,
    /// OAuth redirect landing page
    Callback,
}

/// Resolve the page for `path` (query and fragment are ignored).
pub fn parse(path: &str, callback_path: &str) -> Route {
    let p = trim_trailing_slash(strip_query_frag(path.trim()));
    if p == trim_trailing_slash(callback_path) {
        Route::Callback
    } else {
        Route::Home
    }
}

/// What the provider put in the redirect query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthorizationResult {
    Code(String),
    Error(String),
    Absent,
}

/// Parse the redirect query (`?code=...` or `?error=...`).
///
/// `error` wins over `code`; empty values count as absent.
pub fn parse_query(qs: &str) -> AuthorizationResult {
    let mut code: Option<String> = None;
    let mut error: Option<String> = None;
    for kv in qs.trim_start_matches('?').split('&') {
        let mut it = kv.splitn(2, '=');
        let k = it.next().unwrap_or_default();
        let v = it.next().unwrap_or_default();
        let v = decode_component(v);
        if v.is_empty() {
            continue;
        }
        match k.trim() {
            "code" if code.is_none() => code = Some(v),
            "error" if error.is_none() => error = Some(v),
            _ => {}
        }
    }
    match (error, code) {
        (Some(e), _) => AuthorizationResult::Error(e),
        (None, Some(c)) => AuthorizationResult::Code(c),
        (None, None) => AuthorizationResult::Absent,
    }
}

fn decode_component(v: &str) -> String {
    let spaced = v.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CB: &str = "/api/auth/kakao-redirect";

    #[test]
    fn test_parse_routes() {
        assert_eq!(parse(CB, CB), Route::Callback);
        assert_eq!(parse("/api/auth/kakao-redirect/", CB), Route::Callback);
        assert_eq!(parse("/api/auth/kakao-redirect?code=1#x", CB), Route::Callback);
        assert_eq!(parse("/", CB), Route::Home);
        assert_eq!(parse("", CB), Route::Home);
        assert_eq!(parse("/api/auth/kakao-redirect/extra", CB), Route::Home);
    }

    #[test]
    fn test_parse_query_code() {
        assert_eq!(
            parse_query("?code=abc123&state=s1"),
            AuthorizationResult::Code("abc123".into())
        );
        assert_eq!(
            parse_query("code=a%2Fb"),
            AuthorizationResult::Code("a/b".into())
        );
    }

    #[test]
    fn test_parse_query_error_wins() {
        assert_eq!(
            parse_query("?code=abc&error=access_denied"),
            AuthorizationResult::Error("access_denied".into())
        );
        assert_eq!(
            parse_query("error=consent+required"),
            AuthorizationResult::Error("consent required".into())
        );
    }

    #[test]
    fn test_parse_query_absent() {
        assert_eq!(parse_query(""), AuthorizationResult::Absent);
        assert_eq!(parse_query("?"), AuthorizationResult::Absent);
        assert_eq!(parse_query("?code=&foo=bar"), AuthorizationResult::Absent);
    }
}
