//! Login initiation: send the browser to the Kakao authorize endpoint.

use crate::config::Config;
use crate::error::AuthError;
use crate::platform::Navigator;
use crate::provider::IdentityProvider;

/// `<authorize>?client_id=..&redirect_uri=<origin+callback, encoded>&response_type=code`
pub fn build_authorize_url(config: &Config, origin: &str) -> String {
    let redirect_uri = format!("{}{}", origin.trim_end_matches('/'), config.callback_path);
    format!(
        "{}?client_id={}&redirect_uri={}&response_type=code",
        config.authorize_url,
        urlencoding::encode(&config.client_id),
        urlencoding::encode(&redirect_uri)
    )
}

/// Navigate to the authorize URL. Refused while the provider client is not ready.
pub fn begin_login(
    config: &Config,
    provider: &dyn IdentityProvider,
    navigator: &mut dyn Navigator,
) -> Result<String, AuthError> {
    if !provider.is_ready() {
        log::warn!("[auth] login requested before the provider SDK was ready");
        return Err(AuthError::SdkNotReady);
    }
    let origin = navigator.origin();
    let url = build_authorize_url(config, &origin);
    log::info!("[auth] authorize URL: {url}");
    log::info!(
        "[auth] redirect URI: {}{}",
        origin.trim_end_matches('/'),
        config.callback_path
    );
    navigator.navigate(&url);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryNavigator;
    use crate::provider::LocalProvider;

    #[test]
    fn authorize_url_encodes_redirect_uri() {
        let cfg = Config::default();
        let url = build_authorize_url(&cfg, "http://localhost:3000");
        assert_eq!(
            url,
            "https://kauth.kakao.com/oauth/authorize?client_id=d0ca1dbc57e786d0842e206662aa29ac\
             &redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fapi%2Fauth%2Fkakao-redirect\
             &response_type=code"
        );
    }

    #[test]
    fn refused_when_provider_not_ready() {
        let cfg = Config::default();
        let nav = MemoryNavigator::new("http://localhost:3000/").unwrap();
        let mut handle = nav.clone();
        let provider = LocalProvider::new();

        let err = begin_login(&cfg, &provider, &mut handle).unwrap_err();
        assert_eq!(err, AuthError::SdkNotReady);
        assert!(nav.visits().is_empty());
    }

    #[test]
    fn navigates_when_ready() {
        let cfg = Config::default();
        let nav = MemoryNavigator::new("https://app.test/some/page").unwrap();
        let mut handle = nav.clone();
        let mut provider = LocalProvider::new();
        provider.initialize(&cfg.client_id);

        let url = begin_login(&cfg, &provider, &mut handle).unwrap();
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.test%2Fapi%2Fauth%2Fkakao-redirect"));
        assert_eq!(nav.visits(), vec![url]);
    }
}
