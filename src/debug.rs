//! Filterable debug logging for the login flow
//!
//! Categories: AUTH, SESSION, CALLBACK, NET, ROUTER, UI
//! Enable via: ?kldebug=all or localStorage.setItem('kakao_login.debug','auth,net')
//! Native: KAKAO_LOGIN_DEBUG=callback,session

use std::sync::atomic::{AtomicU32, Ordering};

pub mod cat {
    pub const AUTH: u32 = 1 << 0;
    pub const SESSION: u32 = 1 << 1;
    pub const CALLBACK: u32 = 1 << 2;
    pub const NET: u32 = 1 << 3;
    pub const ROUTER: u32 = 1 << 4;
    pub const UI: u32 = 1 << 5;
    pub const ALL: u32 = 0xffff_ffff;
}

static MASK: AtomicU32 = AtomicU32::new(0);

#[inline]
pub fn mask() -> u32 {
    MASK.load(Ordering::Relaxed)
}

#[inline]
pub fn set(mask: u32) {
    MASK.store(mask, Ordering::Relaxed)
}

#[inline]
pub fn enable(bits: u32) {
    MASK.fetch_or(bits, Ordering::Relaxed);
}

#[inline]
pub fn is(cat: u32) -> bool {
    (mask() & cat) != 0
}

#[inline]
pub fn cat_name(cat: u32) -> &'static str {
    match cat {
        c if c == cat::AUTH => "auth",
        c if c == cat::SESSION => "session",
        c if c == cat::CALLBACK => "callback",
        c if c == cat::NET => "net",
        c if c == cat::ROUTER => "router",
        c if c == cat::UI => "ui",
        _ => "misc",
    }
}

/// Parse a comma-separated category list into a mask.
pub fn parse_list(list: &str) -> u32 {
    let mut m: u32 = 0;
    for tok in list.split(',').map(|s| s.trim().to_ascii_lowercase()) {
        match tok.as_str() {
            "" | "none" => m = 0,
            "all" => m = cat::ALL,
            "auth" => m |= cat::AUTH,
            "session" => m |= cat::SESSION,
            "callback" => m |= cat::CALLBACK,
            "net" => m |= cat::NET,
            "router" => m |= cat::ROUTER,
            "ui" => m |= cat::UI,
            _ => {}
        }
    }
    m
}

#[inline]
pub fn set_from_list(list: &str) {
    set(parse_list(list));
}

#[cfg(target_arch = "wasm32")]
pub fn init_once() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        use web_sys::window;
        if let Some(win) = window() {
            // URL query: ?kldebug=auth,net
            if let Ok(search) = win.location().search() {
                let qs = search.trim_start_matches('?');
                for part in qs.split('&') {
                    let mut it = part.splitn(2, '=');
                    let key = it.next().unwrap_or_default();
                    let val = it.next().unwrap_or_default();
                    if key.eq_ignore_ascii_case("kldebug") {
                        if let Ok(decoded) = urlencoding::decode(val) {
                            set_from_list(&decoded);
                        }
                    }
                }
            }
            if let Ok(Some(storage)) = win.local_storage() {
                if let Ok(Some(v)) = storage.get_item("kakao_login.debug") {
                    enable(parse_list(&v));
                }
            }
        }
        log(cat::UI, "debug init (wasm) complete");
    });
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_once() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        if let Ok(v) = std::env::var("KAKAO_LOGIN_DEBUG") {
            set_from_list(&v);
        }
    });
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub fn log(cat: u32, msg: impl AsRef<str>) {
    if !is(cat) {
        return;
    }
    let s = format!("[kakao-login][{}] {}", cat_name(cat), msg.as_ref());
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(&s));
}

#[cfg(not(target_arch = "wasm32"))]
#[inline]
pub fn log(cat: u32, msg: impl AsRef<str>) {
    if !is(cat) {
        return;
    }
    eprintln!("[kakao-login][{}] {}", cat_name(cat), msg.as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_combines_categories() {
        assert_eq!(parse_list("auth, NET"), cat::AUTH | cat::NET);
        assert_eq!(parse_list("all"), cat::ALL);
        assert_eq!(parse_list("auth,none,ui"), cat::UI);
        assert_eq!(parse_list("bogus"), 0);
    }

    #[test]
    fn cat_name_maps_known_bits() {
        assert_eq!(cat_name(cat::CALLBACK), "callback");
        assert_eq!(cat_name(cat::AUTH | cat::NET), "misc");
    }
}
