#![cfg_attr(target_arch = "wasm32", no_main)]

// DOM-based Web frontend for kakao-login.
//
// JS side:
//   import init, { WasmApp } from "./kakao-login-web.js";
//   await init();
//   const app = new WasmApp(() => render(JSON.parse(app.snapshot_json())));
//   app.start();
//   render(JSON.parse(app.handle_action_json(JSON.stringify({ type: "Login" }))));

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;

    use kakao_login::debug::{self, cat};
    use kakao_login::platform::{BrowserNavigator, KakaoSdk, LocalStorageStore, Navigator};
    use kakao_login::probe;
    use kakao_login::ui_snapshot::UiAction;
    use kakao_login::{App, Backend, Config, HttpBackend};

    #[wasm_bindgen(start)]
    pub fn wasm_start() {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::default());
        debug::init_once();
    }

    /// Wasm-exposed app wrapper.
    ///
    /// Network work runs on `spawn_local`; the app borrow is released before
    /// every await and `on_change` is called once the result is applied.
    #[wasm_bindgen]
    pub struct WasmApp {
        app: Rc<RefCell<App>>,
        backend: Rc<HttpBackend>,
        on_change: Option<js_sys::Function>,
    }

    #[wasm_bindgen]
    impl WasmApp {
        #[wasm_bindgen(constructor)]
        pub fn new(on_change: Option<js_sys::Function>) -> Result<WasmApp, JsValue> {
            let navigator = BrowserNavigator;
            let config = Config::default().with_origin(navigator.origin());
            let backend =
                HttpBackend::new(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;

            let mut app = App::new(
                config,
                Box::new(LocalStorageStore),
                Box::new(KakaoSdk),
                Box::new(navigator),
            );
            app.session_mut().subscribe(|s| {
                debug::log(cat::SESSION, format!("session changed, logged_in={}", s.is_logged_in()));
            });

            Ok(WasmApp {
                app: Rc::new(RefCell::new(app)),
                backend: Rc::new(backend),
                on_change,
            })
        }

        /// Handle the OAuth redirect when the page is the callback route.
        #[wasm_bindgen]
        pub fn start(&self) {
            let code = self.app.borrow_mut().start_callback();
            let Some(code) = code else {
                // Failures decided without a network call still need a render.
                let terminal = self.app.borrow().callback_state().is_terminal();
                if terminal {
                    notify(self.on_change.as_ref());
                }
                return;
            };
            let app = Rc::clone(&self.app);
            let backend = Rc::clone(&self.backend);
            let on_change = self.on_change.clone();
            spawn_local(async move {
                let result = backend.exchange_code(&code).await;
                app.borrow_mut().finish_callback(result);
                notify(on_change.as_ref());
            });
        }

        #[wasm_bindgen]
        pub fn snapshot_json(&self) -> String {
            let snap = self.app.borrow().snapshot();
            serde_json::to_string(&snap).unwrap_or_else(|e| {
                log::error!("Failed to serialize UiSnapshot: {e}");
                "{}".to_string()
            })
        }

        /// Apply an action (JSON-encoded UiAction) and return an updated snapshot.
        #[wasm_bindgen]
        pub fn handle_action_json(&self, action_json: String) -> String {
            match serde_json::from_str::<UiAction>(&action_json) {
                Ok(action) => self.apply_action(action),
                Err(e) => {
                    log::warn!("Failed to deserialize UiAction ({e}): {action_json:?}");
                }
            }
            self.snapshot_json()
        }
    }

    impl WasmApp {
        fn apply_action(&self, action: UiAction) {
            match action {
                UiAction::Login => self.app.borrow_mut().login_clicked(),
                UiAction::Logout => self.app.borrow_mut().logout_clicked(),
                UiAction::DismissNotice => self.app.borrow_mut().dismiss_notice(),
                UiAction::Probe => {
                    let token = self.app.borrow_mut().begin_probe();
                    let app = Rc::clone(&self.app);
                    let backend = Rc::clone(&self.backend);
                    let on_change = self.on_change.clone();
                    spawn_local(async move {
                        let outcome = probe::run_probe(backend.as_ref(), token.as_deref()).await;
                        app.borrow_mut().finish_probe(outcome);
                        notify(on_change.as_ref());
                    });
                }
            }
        }
    }

    fn notify(on_change: Option<&js_sys::Function>) {
        if let Some(f) = on_change {
            if let Err(e) = f.call0(&JsValue::NULL) {
                log::warn!("[WasmApp] on_change callback threw: {e:?}");
            }
        }
    }
}

// Native builds: just provide a stub main so `cargo build --all-features` doesn't explode.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("kakao-login-web is only supported on wasm32 (browser) target.");
}
