mod config;
mod error;
mod routes;
mod services;
mod state;
mod store;

use tracing_subscriber::EnvFilter;

use crate::config::{StoreConfig, ViewerConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ViewerConfig::from_env().expect("invalid viewer config");
    let state = state::AppState::from_config(&config).expect("record store init failed");

    match &config.store {
        StoreConfig::Firestore(fs) => {
            tracing::info!(project = %fs.project_id, collection = %fs.collection, "using firestore record store");
        }
        StoreConfig::Dir(root) => tracing::info!(root = %root.display(), "using directory record store"),
    }

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "experiment viewer listening");
    axum::serve(listener, app).await.expect("server failed");
}
