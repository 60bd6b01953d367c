use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::env;

/// Default backend serving the token exchange and the diagnostic endpoint.
pub const DEFAULT_BACKEND_URL: &str = "http://175.45.195.169:8080";
/// Public client id of the Kakao application (not a secret).
pub const DEFAULT_CLIENT_ID: &str = "d0ca1dbc57e786d0842e206662aa29ac";
pub const DEFAULT_AUTHORIZE_URL: &str = "https://kauth.kakao.com/oauth/authorize";
pub const DEFAULT_CALLBACK_PATH: &str = "/api/auth/kakao-redirect";
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_PROVIDER: &str = "kakao";
pub const DEFAULT_TOKEN_STORE_PATH: &str = "./kakao_login_token.json";

/// Storage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "userToken";
/// Prefix of the token exchange endpoint; the provider name is appended.
pub const EXCHANGE_PATH: &str = "/api/v1/auth/oauth/login";
/// Diagnostic endpoint hit by the API probe.
pub const PROBE_PATH: &str = "/api/v1/search/keywords/top";

/// kakao-login - Kakao OAuth login and API probe
///
/// Configuration priority: CLI args > Environment variables > Defaults
#[derive(Parser, Debug)]
#[command(name = "kakao-login")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Kakao OAuth login handshake and backend API probe", long_about = None)]
pub struct CliArgs {
    /// Backend base URL (token exchange + diagnostic endpoint)
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Kakao application client id
    #[arg(long, env = "KAKAO_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Origin the redirect URI is built from (e.g. http://localhost:3000)
    #[arg(long, env = "APP_ORIGIN")]
    pub origin: Option<String>,

    /// Route the provider redirects back to
    #[arg(long, env = "CALLBACK_PATH")]
    pub callback_path: Option<String>,

    /// JSON file holding the persisted token
    #[arg(long, env = "TOKEN_STORE_PATH")]
    pub token_store_path: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show whether a session is stored
    Status,
    /// Print the Kakao authorize URL to open in a browser
    Login,
    /// Process the URL the provider redirected back to
    Callback {
        /// Full redirect URL, e.g. http://localhost:3000/api/auth/kakao-redirect?code=...
        url: String,
    },
    /// Clear the stored session
    Logout,
    /// Call the diagnostic endpoint (with the bearer token when logged in)
    Probe,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
    pub provider: String,
    pub client_id: String,
    pub authorize_url: String,
    pub origin: String,
    pub callback_path: String,
    pub token_store_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            provider: DEFAULT_PROVIDER.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            authorize_url: DEFAULT_AUTHORIZE_URL.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            callback_path: DEFAULT_CALLBACK_PATH.to_string(),
            token_store_path: DEFAULT_TOKEN_STORE_PATH.to_string(),
        }
    }
}

impl Config {
    /// `<backend>/api/v1/auth/oauth/login/<provider>`
    pub fn exchange_endpoint(&self) -> String {
        format!(
            "{}{}/{}",
            self.backend_url.trim_end_matches('/'),
            EXCHANGE_PATH,
            self.provider
        )
    }

    /// `<backend>/api/v1/search/keywords/top`
    pub fn probe_endpoint(&self) -> String {
        format!("{}{}", self.backend_url.trim_end_matches('/'), PROBE_PATH)
    }

    /// `<origin><callback path>`
    pub fn redirect_uri(&self) -> String {
        format!("{}{}", self.origin.trim_end_matches('/'), self.callback_path)
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Print current configuration (useful for debugging)
    pub fn print_summary(&self) {
        eprintln!("kakao-login configuration:");
        eprintln!("  Backend: {}", self.backend_url);
        eprintln!("  Provider: {}", self.provider);
        eprintln!("  Redirect URI: {}", self.redirect_uri());
        eprintln!("  Token store: {}", self.token_store_path);
    }
}

/// Load configuration and the requested command from CLI args and environment.
/// Priority: CLI args > Environment variables > Defaults
pub fn load() -> Result<(Config, Command)> {
    let args = CliArgs::parse();
    let command = args.command.clone();
    Ok((from_args(args)?, command))
}

/// Resolve parsed args into a validated [`Config`].
pub fn from_args(args: CliArgs) -> Result<Config> {
    let defaults = Config::default();

    let backend_url = args
        .backend_url
        .or_else(|| env::var("BACKEND_URL").ok())
        .unwrap_or(defaults.backend_url);
    validate_url(&backend_url, "BACKEND_URL")?;

    let origin = args
        .origin
        .or_else(|| env::var("APP_ORIGIN").ok())
        .unwrap_or(defaults.origin);
    validate_url(&origin, "APP_ORIGIN")?;

    let client_id = args
        .client_id
        .or_else(|| env::var("KAKAO_CLIENT_ID").ok())
        .unwrap_or(defaults.client_id);
    if client_id.trim().is_empty() {
        return Err(anyhow!("KAKAO_CLIENT_ID cannot be empty"));
    }

    let callback_path = args
        .callback_path
        .or_else(|| env::var("CALLBACK_PATH").ok())
        .unwrap_or(defaults.callback_path);
    if !callback_path.starts_with('/') {
        return Err(anyhow!("CALLBACK_PATH must start with '/', got {callback_path}"));
    }

    let token_store_path = args
        .token_store_path
        .or_else(|| env::var("TOKEN_STORE_PATH").ok())
        .unwrap_or(defaults.token_store_path);

    Ok(Config {
        backend_url,
        provider: defaults.provider,
        client_id,
        authorize_url: defaults.authorize_url,
        origin,
        callback_path,
        token_store_path,
    })
}

/// Validate URL format (basic check)
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(anyhow!("{name} must start with http:// or https://"));
    }
    url::Url::parse(url).map_err(|e| anyhow!("{name} is not a valid URL: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["kakao-login"];
        argv.extend_from_slice(extra);
        argv.push("status");
        CliArgs::parse_from(argv)
    }

    #[test]
    fn endpoints_are_built_from_backend_url() {
        let cfg = Config {
            backend_url: "http://api.test/".into(),
            ..Config::default()
        };
        assert_eq!(
            cfg.exchange_endpoint(),
            "http://api.test/api/v1/auth/oauth/login/kakao"
        );
        assert_eq!(cfg.probe_endpoint(), "http://api.test/api/v1/search/keywords/top");
    }

    #[test]
    fn redirect_uri_joins_origin_and_callback_path() {
        let cfg = Config::default().with_origin("https://app.test/");
        assert_eq!(cfg.redirect_uri(), "https://app.test/api/auth/kakao-redirect");
    }

    #[test]
    fn cli_args_override_defaults() {
        let cfg = from_args(args(&[
            "--backend-url",
            "https://backend.test",
            "--client-id",
            "abc",
            "--callback-path",
            "/cb",
        ]))
        .unwrap();
        assert_eq!(cfg.backend_url, "https://backend.test");
        assert_eq!(cfg.client_id, "abc");
        assert_eq!(cfg.callback_path, "/cb");
    }

    #[test]
    fn rejects_non_http_backend() {
        let err = from_args(args(&["--backend-url", "ftp://backend.test"])).unwrap_err();
        assert!(err.to_string().contains("BACKEND_URL"));
    }

    #[test]
    fn rejects_relative_callback_path() {
        let err = from_args(args(&["--callback-path", "cb"])).unwrap_err();
        assert!(err.to_string().contains("CALLBACK_PATH"));
    }

    #[test]
    fn parses_callback_subcommand() {
        let parsed = CliArgs::parse_from(["kakao-login", "callback", "http://x/cb?code=1"]);
        assert_eq!(
            parsed.command,
            Command::Callback {
                url: "http://x/cb?code=1".into()
            }
        );
    }
}
