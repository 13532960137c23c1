// JSON handlers: version, machines, host metrics

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::{AppState, MAX_WINDOW_DAYS, with_store};
use crate::state_store::StoreError;

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize)]
pub(super) struct WindowQuery {
    pub(super) days: Option<u32>,
}

impl WindowQuery {
    /// Requested window, defaulting to one day.
    pub(super) fn window_days(&self) -> Result<u32, String> {
        let days = self.days.unwrap_or(1);
        if days == 0 || days > MAX_WINDOW_DAYS {
            return Err(format!(
                "days must be between 1 and {}, got {}",
                MAX_WINDOW_DAYS, days
            ));
        }
        Ok(days)
    }
}

fn error_json(status: StatusCode, kind: &str, message: impl std::fmt::Display) -> Response {
    (
        status,
        Json(serde_json::json!({ "kind": kind, "error": message.to_string() })),
    )
        .into_response()
}

fn store_error_response(e: &StoreError) -> Response {
    let status = match e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Read(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    error_json(status, e.kind(), e)
}

fn internal_error(e: anyhow::Error) -> Response {
    tracing::warn!(error = %e, "request failed");
    error_json(StatusCode::INTERNAL_SERVER_ERROR, "internal", e)
}

/// GET /version: Service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/machines: Machine ids under the data root.
pub(super) async fn machines_handler(State(state): State<AppState>) -> Response {
    match with_store(&state.store, |store| store.list_entities()).await {
        Ok(ids) => Json(ids).into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /api/machines/{id}/latest
pub(super) async fn latest_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match with_store(&state.store, move |store| store.latest_state(&id)).await {
        Ok(Ok(latest)) => Json(latest).into_response(),
        Ok(Err(e)) => store_error_response(&e),
        Err(e) => internal_error(e),
    }
}

/// GET /api/machines/{id}/history?days=N
pub(super) async fn history_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<WindowQuery>,
) -> Response {
    let days = match query.window_days() {
        Ok(days) => days,
        Err(msg) => return error_json(StatusCode::BAD_REQUEST, "bad_request", msg),
    };
    match with_store(&state.store, move |store| store.history(&id, days)).await {
        Ok(history) => Json(history).into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /api/host: One poll of host CPU, memory and disks.
pub(super) async fn host_handler(State(state): State<AppState>) -> Response {
    match state.sysinfo_repo.get_host_metrics().await {
        Ok(metrics) => Json(metrics).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "host metrics unavailable");
            error_json(StatusCode::SERVICE_UNAVAILABLE, "unavailable", e)
        }
    }
}
