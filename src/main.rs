// src/main.rs
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::fmt::init as tracing_init;

use productos_backend::config::Settings;
use productos_backend::report::{ReportEngine, TextReportEngine};
use productos_backend::repository::{PgProductRepository, ProductRepository};
use productos_backend::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_init();

    // Load environment variables
    dotenv().ok();

    // Read settings; missing credentials are fatal
    let settings = Settings::from_env();

    // Create database pool
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&settings.database.url())
        .await
        .expect("Failed to create database pool");

    // Apply embedded migrations
    sqlx::migrate!()
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    // Create application state
    let repo: Arc<dyn ProductRepository> = Arc::new(PgProductRepository::new(db_pool));
    let reports: Arc<dyn ReportEngine> = Arc::new(TextReportEngine::new(repo.clone()));
    let app_state = AppState::new(repo, reports);

    // First listing load. A failure only warns: the client sees an empty
    // catalog and the next request retries.
    if let Err(e) = app_state.session.lock().await.refresh().await {
        tracing::warn!(error = %e, "Initial catalog load failed");
    }

    let app = productos_backend::app(app_state);

    // Start server (axum 0.8 style) with HOST/PORT env and graceful port selection
    let host: IpAddr = settings
        .server
        .host
        .parse()
        .unwrap_or_else(|_| "127.0.0.1".parse().unwrap());
    let base_port = settings.server.port;

    // Try base_port..base_port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = base_port.saturating_add(offset);
            let addr = SocketAddr::from((host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => {
                    bound = Some((l, addr));
                    break;
                }
                Err(e) => {
                    if offset == 0 {
                        tracing::warn!(%addr, error = %e, "Port in use, trying next");
                    }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on {}", addr);
                l
            }
            None => {
                tracing::error!("Failed to bind to any port starting at {} on {}", base_port, host);
                return;
            }
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "Server error");
    }
}
