//! The serving phase.
//!
//! Ingestion runs to completion before the listener binds; after that every
//! piece of shared state (actor, snapshot, full month index) is immutable
//! and handed to request handlers through an `Arc`, so concurrent readers
//! need no locking. Anything derived per request (search results, a
//! request-scoped month index) stays private to that request.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;

use crate::models::{Actor, ArchiveSnapshot};
use crate::month_index::MonthIndex;
use crate::{render, view};

/// Process-lifetime shared state, built once by the ingestion phase.
#[derive(Debug, Clone)]
pub struct AppState {
    pub actor: Actor,
    pub snapshot: ArchiveSnapshot,
    pub index: MonthIndex,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/", get(home)).with_state(state)
}

async fn home(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let resolved = view::resolve(&params, &state.snapshot, &state.index);
    tracing::debug!(state = ?resolved.state, records = resolved.records.len(), "resolved view");
    Html(render::page(&state.actor, &resolved))
}

/// Bind and serve until the process is killed. No hot-reload: the archive is
/// re-checked only on the next run.
pub async fn serve(state: Arc<AppState>, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, records = state.snapshot.len(), "serving archive");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
