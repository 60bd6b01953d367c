//! Backend HTTP calls: authorization-code exchange and the diagnostic probe.
//!
//! The same reqwest code runs natively and in the browser (fetch). Requests
//! always carry credentials: cookies natively, `credentials: "include"` on wasm.
//! Nothing here retries.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::config::Config;
use crate::debug::{self, cat};
use crate::error::AuthError;

#[async_trait(?Send)]
pub trait Backend {
    /// `POST <exchange endpoint>?code=<code>`; returns the parsed JSON body on 2xx.
    async fn exchange_code(&self, code: &str) -> Result<Value, AuthError>;

    /// `GET <probe endpoint>`, bearer-authenticated when a token is given.
    /// Returns the raw body text whatever the status.
    async fn probe(&self, token: Option<&str>) -> Result<String, AuthError>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    exchange_endpoint: String,
    probe_endpoint: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, AuthError> {
        let builder = reqwest::Client::builder();
        #[cfg(all(not(target_arch = "wasm32"), feature = "native"))]
        let builder = builder.cookie_store(true);
        let client = builder.build()?;
        Ok(Self {
            client,
            exchange_endpoint: config.exchange_endpoint(),
            probe_endpoint: config.probe_endpoint(),
        })
    }

    /// Exchange URL with the code percent-encoded into the query.
    pub fn exchange_url(&self, code: &str) -> Result<url::Url, AuthError> {
        url::Url::parse_with_params(&self.exchange_endpoint, &[("code", code)])
            .map_err(|e| AuthError::Transport(format!("invalid exchange URL: {e}")))
    }

    pub fn probe_url(&self) -> &str {
        &self.probe_endpoint
    }
}

#[cfg(target_arch = "wasm32")]
#[inline]
fn with_credentials(rb: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    rb.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
#[inline]
fn with_credentials(rb: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    rb
}

/// Attach `Authorization: Bearer <token>` when a non-empty token is present.
pub fn attach_auth(rb: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
    match token {
        Some(t) if !t.is_empty() => rb.bearer_auth(t),
        _ => rb,
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn exchange_code(&self, code: &str) -> Result<Value, AuthError> {
        let url = self.exchange_url(code)?;
        debug::log(cat::NET, format!("POST {}", self.exchange_endpoint));

        let rb = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json");
        let res = with_credentials(rb).send().await?;
        let status = res.status();
        debug::log(cat::NET, format!("exchange status={}", status.as_u16()));

        if status.is_success() {
            let text = res.text().await?;
            serde_json::from_str(&text).map_err(|e| AuthError::InvalidResponse(e.to_string()))
        } else {
            let body = res.text().await?;
            Err(AuthError::ExchangeRejected {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn probe(&self, token: Option<&str>) -> Result<String, AuthError> {
        debug::log(
            cat::NET,
            format!("GET {} auth={}", self.probe_endpoint, token.is_some()),
        );
        let rb = self
            .client
            .get(&self.probe_endpoint)
            .header(CONTENT_TYPE, "application/json");
        let res = with_credentials(attach_auth(rb, token)).send().await?;
        debug::log(cat::NET, format!("probe status={}", res.status().as_u16()));
        Ok(res.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> HttpBackend {
        let cfg = Config {
            backend_url: "http://backend.test:8080".into(),
            ..Config::default()
        };
        HttpBackend::new(&cfg).unwrap()
    }

    #[test]
    fn exchange_url_encodes_code() {
        let url = backend().exchange_url("a/b c&d").unwrap();
        assert_eq!(url.path(), "/api/v1/auth/oauth/login/kakao");
        let code = url
            .query_pairs()
            .find(|(k, _)| k == "code")
            .map(|(_, v)| v.into_owned());
        assert_eq!(code.as_deref(), Some("a/b c&d"));
    }

    #[test]
    fn bearer_header_only_with_token() {
        let client = reqwest::Client::new();
        let with = attach_auth(client.get("http://x.test/"), Some("tok"))
            .build()
            .unwrap();
        assert_eq!(
            with.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer tok"
        );

        let without = attach_auth(client.get("http://x.test/"), None).build().unwrap();
        assert!(without.headers().get(reqwest::header::AUTHORIZATION).is_none());

        let empty = attach_auth(client.get("http://x.test/"), Some("")).build().unwrap();
        assert!(empty.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn probe_url_points_at_diagnostic_endpoint() {
        assert_eq!(
            backend().probe_url(),
            "http://backend.test:8080/api/v1/search/keywords/top"
        );
    }
}
