// HTTP routes: pages, polled fragments and the JSON API

mod http;
mod pages;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::state_store::StateStore;
use crate::sysinfo_repo::SysinfoRepo;

/// Largest history window accepted from a request.
pub const MAX_WINDOW_DAYS: u32 = 366;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) store: Arc<StateStore>,
    pub(crate) sysinfo_repo: Arc<SysinfoRepo>,
    pub(crate) config: AppConfig,
}

pub fn app(store: Arc<StateStore>, sysinfo_repo: Arc<SysinfoRepo>, config: AppConfig) -> Router {
    let state = AppState {
        store,
        sysinfo_repo,
        config,
    };
    Router::new()
        .route("/", get(pages::home)) // GET /
        .route("/host", get(pages::host)) // GET /host
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/machines", get(http::machines_handler))
        .route("/api/machines/{id}/latest", get(http::latest_handler))
        .route("/api/machines/{id}/history", get(http::history_handler))
        .route("/api/host", get(http::host_handler))
        .route("/fragments/cards", get(pages::cards_fragment))
        .route("/fragments/host", get(pages::host_fragment))
        .route("/fragments/{id}/status", get(pages::status_fragment))
        .route("/fragments/{id}/chart", get(pages::chart_fragment))
        .route("/{id}", get(pages::detail)) // GET /<machine id>
        .fallback(pages::not_found)
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Runs a state store read on the blocking pool; store I/O is synchronous.
pub(crate) async fn with_store<T, F>(store: &Arc<StateStore>, f: F) -> anyhow::Result<T>
where
    F: FnOnce(&StateStore) -> T + Send + 'static,
    T: Send + 'static,
{
    let store = store.clone();
    tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| anyhow::anyhow!("state store task join: {}", e))
}
