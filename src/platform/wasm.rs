//! Browser platform implementation (window.location, history, localStorage, Kakao SDK)

use anyhow::{anyhow, Result};
use wasm_bindgen::JsValue;

use super::Navigator;
use crate::debug::{self, cat};
use crate::provider::IdentityProvider;
use crate::storage::TokenStore;
use crate::webshim;

/// `window.location` + `window.history`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn pathname(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn search(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }

    fn origin(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }

    fn replace_url(&mut self, path: &str) {
        let Some(win) = web_sys::window() else {
            return;
        };
        let title = win.document().map(|d| d.title()).unwrap_or_default();
        match win.history() {
            Ok(hist) => {
                if let Err(e) = hist.replace_state_with_url(&JsValue::NULL, &title, Some(path)) {
                    log::warn!("[nav] replaceState failed: {e:?}");
                }
            }
            Err(e) => log::warn!("[nav] history unavailable: {e:?}"),
        }
    }

    fn navigate(&mut self, url: &str) {
        debug::log(cat::ROUTER, format!("navigate {url}"));
        if let Some(win) = web_sys::window() {
            if let Err(e) = win.location().set_href(url) {
                log::warn!("[nav] navigation failed: {e:?}");
            }
        }
    }

    fn alert(&mut self, message: &str) {
        if let Some(win) = web_sys::window() {
            if let Err(e) = win.alert_with_message(message) {
                log::warn!("[nav] alert failed: {e:?}");
            }
        }
    }
}

/// `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| anyhow!("no window"))?
            .local_storage()
            .map_err(|e| anyhow!("localStorage unavailable: {e:?}"))?
            .ok_or_else(|| anyhow!("localStorage unavailable"))
    }
}

impl TokenStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| anyhow!("localStorage.getItem failed: {e:?}"))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| anyhow!("localStorage.setItem failed: {e:?}"))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| anyhow!("localStorage.removeItem failed: {e:?}"))
    }
}

/// Kakao JS SDK reached through `window.Kakao`.
#[derive(Debug, Default, Clone, Copy)]
pub struct KakaoSdk;

impl IdentityProvider for KakaoSdk {
    fn initialize(&mut self, client_id: &str) {
        if webshim::kakao_sdk_present() {
            webshim::kakao_init(client_id);
        } else {
            webshim::load_kakao_sdk(client_id);
        }
    }

    fn is_ready(&self) -> bool {
        webshim::kakao_is_initialized()
    }

    fn logout(&mut self) -> Result<()> {
        webshim::kakao_logout().map_err(|e| anyhow!(e))
    }
}
