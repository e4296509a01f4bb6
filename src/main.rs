// SPDX-License-Identifier: MIT

//! BikeGuard API Server
//!
//! Personal-safety tracking backend: ride logging, maintenance issues,
//! SOS alerts and summary exports over a JSON document store.

use bikeguard::{config::Config, db::Store, notify::Notifier, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting BikeGuard API");

    // Open the JSON document store
    let store = Store::open(config.db_file())
        .await
        .expect("Failed to open data store");

    // Owner notifications (disabled unless SMTP is configured)
    let notifier = Notifier::from_config(&config);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        notifier,
    });

    // Build router
    let app = bikeguard::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bikeguard=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
