//! WASM-specific JavaScript bridge to the Kakao JS SDK (`window.Kakao`).
//!
//! Only functional on WebAssembly targets; native builds get no-op stubs.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use js_sys::{Function, Reflect};

#[cfg(target_arch = "wasm32")]
use web_sys::window;

use crate::debug::{self, cat};

pub const KAKAO_SDK_URL: &str = "https://developers.kakao.com/sdk/js/kakao.js";

// ----------------------- KAKAO SDK BRIDGE (wasm32) --------------------------

#[cfg(target_arch = "wasm32")]
fn kakao_object() -> Option<JsValue> {
    let win = window()?;
    let obj = Reflect::get(&JsValue::from(win), &JsValue::from_str("Kakao")).ok()?;
    if obj.is_undefined() || obj.is_null() {
        None
    } else {
        Some(obj)
    }
}

#[cfg(target_arch = "wasm32")]
fn method(obj: &JsValue, name: &str) -> Option<Function> {
    let f = Reflect::get(obj, &JsValue::from_str(name)).ok()?;
    f.is_function().then(|| Function::from(f))
}

/// True once the SDK script has defined `window.Kakao`.
#[cfg(target_arch = "wasm32")]
pub fn kakao_sdk_present() -> bool {
    kakao_object().is_some()
}

/// `Kakao.isInitialized()`
#[cfg(target_arch = "wasm32")]
pub fn kakao_is_initialized() -> bool {
    let Some(obj) = kakao_object() else {
        return false;
    };
    method(&obj, "isInitialized")
        .and_then(|f| f.call0(&obj).ok())
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// `Kakao.init(clientId)` unless already initialized.
#[cfg(target_arch = "wasm32")]
pub fn kakao_init(client_id: &str) -> bool {
    let Some(obj) = kakao_object() else {
        return false;
    };
    if kakao_is_initialized() {
        return true;
    }
    match method(&obj, "init").map(|f| f.call1(&obj, &JsValue::from_str(client_id))) {
        Some(Ok(_)) => {
            log::info!("[kakao] SDK initialized");
            true
        }
        Some(Err(e)) => {
            log::warn!("[kakao] SDK init failed: {e:?}");
            false
        }
        None => false,
    }
}

/// `Kakao.Auth.logout(cb)`; errors if the SDK or its Auth module is missing.
#[cfg(target_arch = "wasm32")]
pub fn kakao_logout() -> Result<(), String> {
    let obj = kakao_object().ok_or("Kakao SDK not loaded")?;
    let auth = Reflect::get(&obj, &JsValue::from_str("Auth"))
        .ok()
        .filter(|a| !a.is_undefined() && !a.is_null())
        .ok_or("Kakao.Auth not available")?;
    let logout = method(&auth, "logout").ok_or("Kakao.Auth.logout not available")?;
    let done = Closure::once_into_js(|| debug::log(cat::AUTH, "kakao logout complete"));
    logout
        .call1(&auth, &done)
        .map(|_| ())
        .map_err(|e| format!("Kakao.Auth.logout threw: {e:?}"))
}

/// Append the SDK `<script>` and run `Kakao.init(client_id)` once it loads.
#[cfg(target_arch = "wasm32")]
pub fn load_kakao_sdk(client_id: &str) {
    use wasm_bindgen::JsCast;

    let Some(doc) = window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(el) = doc.create_element("script") else {
        return;
    };
    let Ok(script) = el.dyn_into::<web_sys::HtmlScriptElement>() else {
        return;
    };
    script.set_src(KAKAO_SDK_URL);
    let id = client_id.to_string();
    let onload = Closure::once_into_js(move || {
        kakao_init(&id);
    });
    script.set_onload(Some(onload.unchecked_ref()));
    if let Some(head) = doc.head() {
        if head.append_child(&script).is_ok() {
            debug::log(cat::AUTH, "kakao SDK script appended");
        }
    }
}

// No-op implementations for non-WASM builds (native CLI)
#[cfg(not(target_arch = "wasm32"))]
pub fn kakao_sdk_present() -> bool {
    false
}

#[cfg(not(target_arch = "wasm32"))]
pub fn kakao_is_initialized() -> bool {
    false
}

#[cfg(not(target_arch = "wasm32"))]
pub fn kakao_init(_client_id: &str) -> bool {
    false
}

#[cfg(not(target_arch = "wasm32"))]
pub fn kakao_logout() -> Result<(), String> {
    Err("Kakao SDK is only available in the browser".into())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_kakao_sdk(_client_id: &str) {
    debug::log(cat::AUTH, format!("skip loading {KAKAO_SDK_URL} on native"));
}
