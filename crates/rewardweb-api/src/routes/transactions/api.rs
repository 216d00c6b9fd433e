//! Transactions endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Current page of priced transactions (JSON)
//! - htmx_transactions_table: Transactions table (HTML fragment)

use crate::routes::params::{resolve_view, GlobalParams, TableParams};
use crate::routes::render::store_error;
use crate::{ApiError, AppState};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;
use rewardweb_core::{PricedTransaction, TableState, TableView};
use std::collections::HashMap;

/// JSON API: Transactions after the global filter and the table's own state
pub async fn api_transactions(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<Json<TableView<PricedTransaction>>, ApiError> {
    let filter = GlobalParams::from_query(&params).filter()?;
    let table = TableParams::from_query(&params);

    let store = state.store.read().await;
    let filtered = store.filtered(&filter)?;

    let mut view_state = table.transaction_state(TableState::transactions(state.config.pagination.page_size));
    Ok(Json(resolve_view(&mut view_state, &filtered.transactions, table.page)))
}

/// HTMX: Transactions table - sort bar, rows and pager
pub async fn htmx_transactions_table(
    state: State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Html<String> {
    let global = GlobalParams::from_query(&params);
    let table = TableParams::from_query(&params);

    let store = state.store.read().await;
    let html = match global.filter().and_then(|filter| store.filtered(&filter)) {
        Ok(filtered) => super::render_transactions_table(
            &global,
            &filtered.transactions,
            &table,
            &state.config.pagination,
        ),
        Err(e) => store_error(&e, &global),
    };
    Html(html)
}
