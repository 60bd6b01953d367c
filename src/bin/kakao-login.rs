// Native binary for kakao-login - terminal front end

use anyhow::{bail, Context, Result};

use kakao_login::{
    app::App,
    callback::CallbackState,
    config::{self, Command},
    debug::{self, cat},
    platform::{FileStore, MemoryNavigator},
    provider::LocalProvider,
    router::Route,
    ui, HttpBackend,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    debug::init_once();

    let (cfg, command) = config::load().context("Failed to load configuration")?;
    if debug::is(cat::UI) {
        cfg.print_summary();
    }

    // The "page" is the pasted redirect URL for `callback`, the app origin otherwise.
    let page = match &command {
        Command::Callback { url } => url.clone(),
        _ => format!("{}/", cfg.origin.trim_end_matches('/')),
    };
    let navigator = MemoryNavigator::new(&page)?;
    let nav_handle = navigator.clone();

    let store = FileStore::new(&cfg.token_store_path);
    debug::log(cat::SESSION, format!("token store {}", store.path().display()));

    let mut app = App::new(
        cfg.clone(),
        Box::new(store),
        Box::new(LocalProvider::new()),
        Box::new(navigator),
    );
    let backend = HttpBackend::new(&cfg).context("Failed to build HTTP client")?;

    let failed = match command {
        Command::Status => false,
        Command::Login => {
            app.login_clicked();
            if let Some(url) = nav_handle.visits().last() {
                println!("Open this URL in a browser to log in:");
                println!("{url}");
                println!();
            }
            app.notice().is_some()
        }
        Command::Callback { .. } => {
            if app.route() != Route::Callback {
                bail!(
                    "URL path {} is not the callback path {}",
                    nav_handle.current_url(),
                    cfg.callback_path
                );
            }
            app.process_callback(&backend).await;
            log::debug!("stripped redirect URL: {}", nav_handle.current_url());
            matches!(app.callback_state(), CallbackState::Failed(_))
        }
        Command::Logout => {
            app.logout_clicked();
            false
        }
        Command::Probe => {
            app.run_probe(&backend).await;
            app.error().is_some()
        }
    };

    print!("{}", ui::render_text(&app.snapshot()));

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
