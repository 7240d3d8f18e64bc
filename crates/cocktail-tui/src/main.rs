mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod layout;
mod theme;
mod widgets;

use cocktail_core::assets::BundledAssets;
use cocktail_core::catalog::Catalog;
use cocktail_core::config::Config;
use cocktail_core::platform;
use cocktail_core::selection::SelectionController;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = platform::log_path();

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Config is read before logging starts so its filter can apply; its
    // error is reported once the subscriber is up.
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // Allow RUST_LOG override; otherwise use the configured filter.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log.filter.clone());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so it can be tailed immediately.
    eprintln!("cocktails log: {}", log_path.display());

    tracing::info!("cocktails starting…");
    if let Some(e) = config_error {
        tracing::warn!("{}; using defaults", e);
    }

    // ── Load catalog ─────────────────────────────────────────────────────────
    let (catalog, load_error) = match Catalog::load(&BundledAssets) {
        Ok(catalog) => (catalog, None),
        Err(e) => {
            tracing::error!("failed to load cocktails: {}", e);
            (Catalog::default(), Some(e.reason()))
        }
    };

    let selection = SelectionController::new(catalog, config.display.format_options());
    let state = app_state::AppState::new(selection, load_error);

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(state, config.display.show_keys_bar);
    app.run().await?;

    Ok(())
}
