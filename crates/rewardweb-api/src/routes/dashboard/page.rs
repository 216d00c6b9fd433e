//! Dashboard page rendering

use crate::routes::monthly::render_monthly_section;
use crate::routes::params::{GlobalParams, TableParams};
use crate::routes::render::{store_error, BODY_ID, BODY_PATH, RELOAD_PATH};
use crate::routes::totals::render_totals_section;
use crate::routes::transactions::render_transactions_section;
use crate::{page_response, AppState};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Html;
use rewardweb_config::PaginationConfig;
use rewardweb_core::RewardsStore;
use rewardweb_utils::escape_html;
use std::collections::HashMap;

/// Everything below the filter bar for the current store state
pub fn render_body(store: &RewardsStore, global: &GlobalParams, pagination: &PaginationConfig) -> String {
    let filter = match global.filter() {
        Ok(filter) => filter,
        Err(e) => return store_error(&e, global),
    };
    let filtered = match store.filtered(&filter) {
        Ok(filtered) => filtered,
        Err(e) => return store_error(&e, global),
    };

    let defaults = TableParams::default();
    let scope = if filter.name.is_empty() {
        filter.range.description()
    } else {
        format!("{} · matching \"{}\"", filter.range.description(), filter.name)
    };

    format!(
        r#"<p class='text-sm text-gray-500 mb-6'>Showing: {}</p>
        {}
        {}
        {}"#,
        escape_html(&scope),
        render_monthly_section(global, &filtered.monthly, &defaults, pagination),
        render_totals_section(global, &filtered.totals, &defaults, pagination),
        render_transactions_section(global, &filtered.transactions, &defaults, pagination)
    )
}

fn filter_bar(global: &GlobalParams) -> String {
    format!(
        r#"<form id='global-filter' class='flex flex-wrap items-end gap-4 mb-6 p-4 bg-white rounded-xl border shadow-sm'
            hx-get='{body}' hx-target='#{body_id}' hx-trigger='change, submit, keyup changed delay:400ms from:#global-name'>
            <div class='flex flex-col'>
                <label for='global-name' class='text-sm text-gray-600'>Customer:</label>
                <input type='search' id='global-name' name='name' value='{name}' placeholder='Filter by customer name...'
                    class='px-3 py-1.5 text-sm border rounded-lg w-64'>
            </div>
            <div class='flex flex-col'>
                <label for='global-from' class='text-sm text-gray-600'>From:</label>
                <input type='month' id='global-from' name='from' value='{from}' class='px-3 py-1.5 text-sm border rounded-lg'>
            </div>
            <div class='flex flex-col'>
                <label for='global-to' class='text-sm text-gray-600'>To:</label>
                <input type='month' id='global-to' name='to' value='{to}' class='px-3 py-1.5 text-sm border rounded-lg'>
            </div>
        </form>"#,
        body = BODY_PATH,
        body_id = BODY_ID,
        name = escape_html(&global.name),
        from = escape_html(&global.from),
        to = escape_html(&global.to)
    )
}

/// Dashboard page
pub async fn page_index(
    state: State<AppState>,
    headers: HeaderMap,
    params: Query<HashMap<String, String>>,
) -> Html<String> {
    let global = GlobalParams::from_query(&params);
    let store = state.store.read().await;

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-6'>
            <h1 class='text-2xl font-bold'>Customer Rewards Program</h1>
            <button hx-post='{reload}' hx-target='#{body_id}' hx-include='#global-filter'
                class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Refresh Data</button>
        </div>
        {filter_bar}
        <div id='{body_id}'>{body}</div>"#,
        reload = RELOAD_PATH,
        body_id = BODY_ID,
        filter_bar = filter_bar(&global),
        body = render_body(&store, &global, &state.config.pagination)
    );

    Html(page_response(&headers, "Customer Rewards Program", &inner_content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewardweb_config::Config;
    use rewardweb_source::{FetchResponse, SampleSource, Transaction};
    use std::sync::Arc;

    fn ready_store(rows: Vec<Transaction>) -> RewardsStore {
        let source = SampleSource::new(1, 1, chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let mut store = RewardsStore::new(Config::default(), Arc::new(source));
        let ticket = store.begin_load();
        store.complete(ticket, FetchResponse::ok(rows)).unwrap();
        store
    }

    fn rows() -> Vec<Transaction> {
        vec![
            Transaction::new("t1", 101, "Ann Lee", "2024-01-10", "Phone", 120.0),
            Transaction::new("t2", 101, "Ann Lee", "2024-02-03", "Tablet", 75.0),
            Transaction::new("t3", 102, "Bob Ray", "2024-01-20", "Laptop", 200.0),
        ]
    }

    #[test]
    fn test_body_sections_in_order() {
        let html = render_body(&ready_store(rows()), &GlobalParams::default(), &PaginationConfig::default());
        let monthly = html.find("Monthly Rewards").unwrap();
        let totals = html.find("Total Rewards").unwrap();
        let transactions = html.find(">Transactions</h2>").unwrap();
        assert!(monthly < totals && totals < transactions);
        assert!(html.contains("Showing: All Time"));
    }

    #[test]
    fn test_body_with_window() {
        let global = GlobalParams {
            from: "2024-02".to_string(),
            ..Default::default()
        };
        let html = render_body(&ready_store(rows()), &global, &PaginationConfig::default());
        assert!(html.contains("Showing: From 2024-02"));
        assert!(html.contains(">t2<"));
        assert!(!html.contains(">t1<"));
        // links keep the window
        assert!(html.contains("/rewards/monthly/table?from=2024-02&amp;sort="));
    }

    #[test]
    fn test_body_while_loading() {
        let source = SampleSource::new(1, 1, chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let mut store = RewardsStore::new(Config::default(), Arc::new(source));
        store.begin_load();
        let html = render_body(&store, &GlobalParams::default(), &PaginationConfig::default());
        assert!(html.contains("Loading transactions data..."));
        assert!(!html.contains("Monthly Rewards"));
    }

    #[test]
    fn test_body_after_failure() {
        let source = SampleSource::new(1, 1, chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let mut store = RewardsStore::new(Config::default(), Arc::new(source));
        let ticket = store.begin_load();
        let _ = store.complete(ticket, FetchResponse::failure("offline"));
        let html = render_body(&store, &GlobalParams::default(), &PaginationConfig::default());
        assert!(html.contains("Error Loading Data"));
        assert!(html.contains("Failed to fetch data"));
        assert!(html.contains("Try Again"));
    }

    #[test]
    fn test_body_rejects_bad_bound() {
        let global = GlobalParams {
            to: "soon".to_string(),
            ..Default::default()
        };
        let html = render_body(&ready_store(rows()), &global, &PaginationConfig::default());
        assert!(!html.contains("Monthly Rewards"));
        assert!(html.contains("soon"));
    }
}
