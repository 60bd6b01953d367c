//! Platform abstraction (navigation, token persistence, provider SDK).

mod memory;
pub use memory::MemoryNavigator;

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        mod wasm;
        pub use wasm::{BrowserNavigator, KakaoSdk, LocalStorageStore};
    } else {
        mod native;
        pub use native::FileStore;
    }
}

/// The page location as the app sees it.
pub trait Navigator {
    /// Path component of the current URL (e.g. `/api/auth/kakao-redirect`).
    fn pathname(&self) -> String;

    /// Query component including the leading `?`, or empty.
    fn search(&self) -> String;

    /// Scheme + host + port of the current URL.
    fn origin(&self) -> String;

    /// Replace the current history entry with `path` (drops the query).
    fn replace_url(&mut self, path: &str);

    /// Leave the page for `url`.
    fn navigate(&mut self, url: &str);

    /// Show `message` and wait for the user to acknowledge it.
    fn alert(&mut self, message: &str);
}
