// HTML handlers: pages and the fragments they poll

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};

use super::http::WindowQuery;
use super::{AppState, with_store};
use crate::render::{self, fragments, pages};

fn fragment_error(e: anyhow::Error) -> Response {
    tracing::warn!(error = %e, "fragment render failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(render::alert(&e.to_string(), "danger")),
    )
        .into_response()
}

/// GET /
pub(super) async fn home(State(state): State<AppState>) -> Html<String> {
    Html(pages::home(state.config.refresh.homepage_interval_ms))
}

/// GET /host
pub(super) async fn host(State(state): State<AppState>) -> Html<String> {
    Html(pages::host(state.config.refresh.host_interval_ms))
}

/// GET /{id}: Detail page for a known machine, else 404.
pub(super) async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    uri: Uri,
) -> Response {
    let lookup = id.clone();
    match with_store(&state.store, move |store| store.contains(&lookup)).await {
        Ok(true) => Html(pages::detail(&id, state.config.refresh.detail_interval_ms)).into_response(),
        Ok(false) => not_found(uri).await,
        Err(e) => fragment_error(e),
    }
}

pub(super) async fn not_found(uri: Uri) -> Response {
    (StatusCode::NOT_FOUND, Html(pages::not_found(uri.path()))).into_response()
}

/// GET /fragments/cards: One card per machine.
pub(super) async fn cards_fragment(State(state): State<AppState>) -> Response {
    let cards = with_store(&state.store, |store| {
        store
            .list_entities()
            .into_iter()
            .map(|id| {
                let latest = store.latest_state(&id);
                (id, latest)
            })
            .collect::<Vec<_>>()
    })
    .await;
    match cards {
        Ok(cards) => {
            tracing::debug!(machines = cards.len(), "overview cards rendered");
            Html(fragments::machine_cards(&cards)).into_response()
        }
        Err(e) => fragment_error(e),
    }
}

/// GET /fragments/{id}/status
pub(super) async fn status_fragment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match with_store(&state.store, move |store| store.latest_state(&id)).await {
        Ok(latest) => Html(fragments::detail_status(&latest)).into_response(),
        Err(e) => fragment_error(e),
    }
}

/// GET /fragments/{id}/chart?days=N
pub(super) async fn chart_fragment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<WindowQuery>,
) -> Response {
    let days = match query.window_days() {
        Ok(days) => days,
        Err(msg) => {
            return (StatusCode::BAD_REQUEST, Html(render::alert(&msg, "warning"))).into_response();
        }
    };
    let machine_id = id.clone();
    match with_store(&state.store, move |store| store.history(&machine_id, days)).await {
        Ok(history) => Html(fragments::production_chart(&id, days, &history)).into_response(),
        Err(e) => fragment_error(e),
    }
}

/// GET /fragments/host
pub(super) async fn host_fragment(State(state): State<AppState>) -> Response {
    match state.sysinfo_repo.get_host_metrics().await {
        Ok(metrics) => Html(fragments::host_panel(&metrics)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "host metrics unavailable");
            Html(render::alert(&format!("Host metrics unavailable: {}", e), "danger"))
                .into_response()
        }
    }
}
