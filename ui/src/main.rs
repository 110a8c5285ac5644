#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use log::{info, warn};
use tabula_business::{BusinessConfig, MemoryStorage, PageUrl, TOKEN_KEY};
use tabula_ui::state::State;

#[global_allocator]
static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> eframe::Result {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default()).init();

    // Commands are spawned on whatever runtime is current while the UI thread runs.
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;
    let _guard = runtime.enter();

    let config = BusinessConfig::from_env().unwrap_or_else(|err| {
        warn!("{err}, using defaults");
        BusinessConfig::default()
    });
    // The first argument stands in for the address bar, e.g. `tabula "http://localhost/dashboard?limit=5"`.
    let page_url = std::env::args()
        .nth(1)
        .map(|raw| PageUrl::parse_or_default(&raw))
        .unwrap_or_default();
    info!("Starting at {}", page_url.as_str());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Tabula")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tabula",
        native_options,
        Box::new(move |cc| {
            let tokens = match cc
                .storage
                .and_then(|storage| storage.get_string(TOKEN_KEY))
                .filter(|token| !token.is_empty())
            {
                Some(token) => MemoryStorage::with_token(token),
                None => MemoryStorage::new(),
            };

            let state = State::new(config, tokens.shared(), page_url);
            Ok(Box::new(tabula_ui::TabulaApp::new(state)))
        }),
    )
}
