//! Dashboard endpoints - load state, reload and the HTMX body
//!
//! Endpoints:
//! - api_health: Liveness check
//! - api_state: Load state summary (JSON)
//! - api_reload: Re-run the fetch and report the outcome (JSON)
//! - htmx_rewards_body: Sections below the filter bar (HTML fragment)
//! - htmx_reload: Start a reload and show the loading state (HTML fragment)

use crate::routes::params::GlobalParams;
use crate::routes::render::{body_href, loading_state, BODY_ID};
use crate::AppState;
use axum::extract::{Form, Query, State};
use axum::response::Html;
use axum::Json;
use rewardweb_core::{RewardsStore, StateSummary};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub success: bool,
    pub message: String,
}

/// Health check endpoint
pub async fn api_health() -> &'static str {
    "OK"
}

/// JSON API: Load state
pub async fn api_state(state: State<AppState>) -> Json<StateSummary> {
    Json(state.store.read().await.summary())
}

/// JSON API: Reload rewards data and wait for the outcome
pub async fn api_reload(state: State<AppState>) -> Json<ReloadResponse> {
    let response = match RewardsStore::refresh(&state.store).await {
        Ok(true) => ReloadResponse {
            success: true,
            message: "Rewards data reloaded".to_string(),
        },
        Ok(false) => ReloadResponse {
            success: false,
            message: "Superseded by a newer reload".to_string(),
        },
        Err(e) => ReloadResponse {
            success: false,
            message: e.to_string(),
        },
    };
    Json(response)
}

/// HTMX: Body fragment for the filter bar values in the query string
pub async fn htmx_rewards_body(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Html<String> {
    let global = GlobalParams::from_query(&params);
    let store = state.store.read().await;
    Html(super::render_body(&store, &global, &state.config.pagination))
}

/// HTMX: Start a reload in the background; the loading state polls for the result
pub async fn htmx_reload(
    state: State<AppState>,
    form: Form<HashMap<String, String>>,
) -> Html<String> {
    let global = GlobalParams::from_query(&form);

    let store = state.store.clone();
    let (ticket, source) = RewardsStore::begin_refresh(&store).await;
    tokio::spawn(async move {
        if let Err(e) = RewardsStore::finish_refresh(&store, ticket, source).await {
            log::debug!("Background reload ended with: {}", e);
        }
    });

    Html(loading_state(&body_href(&global), BODY_ID))
}
