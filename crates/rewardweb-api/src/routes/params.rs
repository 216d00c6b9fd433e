//! Query-string state for the dashboard and its tables
//!
//! The server keeps no per-client state: the global filter bar and every
//! table's filter/sort/page travel in the query string and are re-emitted in
//! each link the tables render.

use std::collections::HashMap;

use rewardweb_core::{
    transaction_preset, CoreResult, GlobalFilter, SortDirection, SortField, SortState,
    TableState, TableView, Named, Sortable, TransactionField,
};

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> &'a str {
    params.get(key).map(|s| s.trim()).unwrap_or("")
}

/// Filter bar values, kept raw so they can be echoed back into links
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalParams {
    pub name: String,
    pub from: String,
    pub to: String,
}

impl GlobalParams {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Self {
            name: param(params, "name").to_string(),
            from: param(params, "from").to_string(),
            to: param(params, "to").to_string(),
        }
    }

    pub fn filter(&self) -> CoreResult<GlobalFilter> {
        GlobalFilter::parse(Some(&self.name), Some(&self.from), Some(&self.to))
    }

    /// `name=..&from=..&to=..`, empty values omitted
    pub fn query_string(&self) -> String {
        [("name", &self.name), ("from", &self.from), ("to", &self.to)]
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `path` with the filter bar values appended
    pub fn href(&self, path: &str) -> String {
        let query = self.query_string();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        }
    }
}

/// Per-table values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableParams {
    pub filter: String,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub page: Option<usize>,
    pub preset: Option<String>,
}

impl TableParams {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let optional = |key: &str| Some(param(params, key)).filter(|s| !s.is_empty()).map(str::to_string);
        Self {
            filter: param(params, "filter").to_string(),
            sort: optional("sort"),
            dir: optional("dir"),
            page: params.get("page").and_then(|s| s.trim().parse().ok()),
            preset: optional("preset"),
        }
    }

    /// Table state from `defaults`, with the requested filter and sort.
    ///
    /// Unknown sort fields fall back to the default ordering. The requested
    /// page is applied later, once the page count is known.
    pub fn state<F: SortField>(&self, defaults: TableState<F>) -> TableState<F> {
        let mut state = defaults;
        if let Some(field) = self.sort.as_deref().and_then(|s| s.parse::<F>().ok()) {
            let direction = self
                .dir
                .as_deref()
                .and_then(|d| d.parse().ok())
                .unwrap_or(SortDirection::Asc);
            state.set_sort(SortState::new(field, direction));
        }
        state.set_name_filter(self.filter.clone());
        state
    }

    /// Transactions also accept a sort-bar preset, which wins over `sort`/`dir`
    pub fn transaction_state(&self, defaults: TableState<TransactionField>) -> TableState<TransactionField> {
        let mut state = self.state(defaults);
        if let Some(sort) = self.preset.as_deref().and_then(transaction_preset) {
            state.set_sort(sort);
        }
        state
    }
}

/// Apply `state` to `rows`, honouring a requested page only when it is in range
pub fn resolve_view<T, F>(state: &mut TableState<F>, rows: &[T], requested_page: Option<usize>) -> TableView<T>
where
    F: SortField,
    T: Named + Sortable<Field = F> + Clone,
{
    let first = state.apply(rows);
    match requested_page {
        Some(page) if page != first.current_page && state.go_to_page(page, first.total_pages) => {
            state.apply(rows)
        }
        _ => first,
    }
}

/// Link to `path` carrying the global filter and one table's state
pub fn table_href<F: SortField>(
    path: &str,
    global: &GlobalParams,
    filter: &str,
    sort: SortState<F>,
    page: usize,
) -> String {
    let mut query = global.query_string();
    if !query.is_empty() {
        query.push('&');
    }
    if !filter.is_empty() {
        query.push_str(&format!("filter={}&", urlencoding::encode(filter)));
    }
    query.push_str(&format!("sort={}&dir={}&page={}", sort.field, sort.direction, page));
    format!("{}?{}", path, query)
}
