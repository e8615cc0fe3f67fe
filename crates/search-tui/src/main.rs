mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod theme;
mod widgets;

#[cfg(test)]
mod test_support;

use std::io;

use ratatui::crossterm::{
    event::DisableMouseCapture,
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};

use search_proto::client::SearchClient;
use search_proto::config::Config;
use search_proto::platform;
use search_proto::prefs::FilePreferenceStore;

use crate::app::App;

/// Debug for our own code; HTTP client internals are noisy below warn.
const DEFAULT_LOG_FILTER: &str = "debug,hyper_util=warn,reqwest=warn,hyper=warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = platform::log_path();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let log_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("nco-search log: {}", log_path.display());
    tracing::info!("nco-search starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config unreadable, using defaults: {:#}", e);
        Config::default()
    });
    tracing::info!(
        "search endpoint {} (timeout {}s)",
        config.api.base_url,
        config.api.timeout_secs
    );

    let client = SearchClient::new(&config.api)?;
    let prefs = FilePreferenceStore::new(platform::preferences_path());
    tracing::debug!("theme preference at {}", prefs.path().display());

    install_panic_hook();
    App::new(client, Box::new(prefs), config.ui.show_keys_bar)
        .run()
        .await
}

/// Put the terminal back before the default hook prints the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}
