use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::prelude::*;

use emd_chatbot::config::Config;
use emd_chatbot::engine::ChatEngine;
use emd_chatbot::fallback::FallbackSelector;
use emd_chatbot::rasa::RasaClient;
use emd_chatbot::server::{self, AppState};
use emd_chatbot::store::Store;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // Log to stdout and to a non-blocking file under <data_dir>/logs.
    let log_dir = config.data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).ok();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("emd-chatbot.log"))
        .expect("Failed to open log file");
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .init();

    info!("Starting ЭМД chatbot service");
    info!("NLU server: {}", config.rasa_url);
    info!("Engine mode: {:?}", config.engine_mode);

    let store = match Store::open(&config.database_path) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("Failed to open database {}: {e}", config.database_path.display());
            std::process::exit(1);
        }
    };
    store.import_reference_data(&config.data_dir);

    let rasa = RasaClient::new(&config.rasa_url, config.rasa_timeout);
    let fallback = FallbackSelector::new(config.fallback_mode);
    let engine =
        ChatEngine::new(config.engine_mode, rasa, fallback).with_store(store.clone());

    let state = Arc::new(AppState { engine, store });
    let app = server::app(state);

    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind {}: {e}", config.bind_addr);
            std::process::exit(1);
        }
    };
    info!("Listening on {}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await
    {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
