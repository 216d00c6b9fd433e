//! Total rewards endpoints

use crate::routes::params::{resolve_view, GlobalParams, TableParams};
use crate::routes::render::store_error;
use crate::{ApiError, AppState};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;
use rewardweb_core::{TableState, TableView, TotalReward};
use std::collections::HashMap;

/// JSON API: Current page of per-customer totals
pub async fn api_total_rewards(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<TableView<TotalReward>>, ApiError> {
    let filter = GlobalParams::from_query(&params).filter()?;
    let table = TableParams::from_query(&params);

    let store = state.store.read().await;
    let filtered = store.filtered(&filter)?;

    let mut view_state = table.state(TableState::totals(state.config.pagination.page_size));
    Ok(Json(resolve_view(&mut view_state, &filtered.totals, table.page)))
}

/// HTMX: Total rewards table
pub async fn htmx_totals_table(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Html<String> {
    let global = GlobalParams::from_query(&params);
    let table = TableParams::from_query(&params);

    let store = state.store.read().await;
    let html = match global.filter().and_then(|filter| store.filtered(&filter)) {
        Ok(filtered) => super::render_totals_table(&global, &filtered.totals, &table, &state.config.pagination),
        Err(e) => store_error(&e, &global),
    };
    Html(html)
}
