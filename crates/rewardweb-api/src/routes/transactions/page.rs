//! Transactions section rendering

use crate::routes::params::{resolve_view, table_href, GlobalParams, TableParams};
use crate::routes::render::{pager, section, sort_columns, sort_inputs, table};
use rewardweb_config::PaginationConfig;
use rewardweb_core::{
    transaction_preset, PricedTransaction, SortState, TableState, TransactionField, TRANSACTION_PRESETS,
};
use rewardweb_utils::{escape_html, format_currency, format_number};

pub const TABLE_ID: &str = "transactions-table";
pub const TABLE_PATH: &str = "/rewards/transactions/table";

fn preset_label(preset: &str) -> &'static str {
    match preset {
        "date-desc" => "Purchase Date (Newest First)",
        "date-asc" => "Purchase Date (Oldest First)",
        "amount-desc" => "Price (High to Low)",
        "amount-asc" => "Price (Low to High)",
        "points-desc" => "Reward Points (High to Low)",
        "points-asc" => "Reward Points (Low to High)",
        _ => "",
    }
}

/// "Sort by" select; re-renders the table with the chosen preset
fn sort_bar(global: &GlobalParams, current: SortState<TransactionField>) -> String {
    let href = global.href(TABLE_PATH);

    let mut options = String::new();
    // a header sort with no matching preset leaves the select on a blank entry
    if !TRANSACTION_PRESETS.iter().any(|p| transaction_preset(p) == Some(current)) {
        options.push_str("<option value='' selected>Custom</option>");
    }
    for preset in TRANSACTION_PRESETS {
        let selected = if transaction_preset(preset) == Some(current) { " selected" } else { "" };
        options.push_str(&format!(
            "<option value='{}'{}>{}</option>",
            preset,
            selected,
            preset_label(preset)
        ));
    }

    format!(
        r#"<div class='flex items-center gap-2 mb-3 text-sm'>
            <label for='transactions-sort' class='text-gray-600'>Sort by:</label>
            <select id='transactions-sort' name='preset' class='px-2 py-1 border rounded-lg bg-white'
                hx-get='{}' hx-trigger='change' hx-target='#{}' hx-include='#{}-filter'>{}</select>
        </div>"#,
        escape_html(&href),
        TABLE_ID,
        TABLE_ID,
        options
    )
}

/// Sort bar, table and pager for the transactions in `rows`
pub fn render_transactions_table(
    global: &GlobalParams,
    rows: &[PricedTransaction],
    params: &TableParams,
    pagination: &PaginationConfig,
) -> String {
    let mut state = params.transaction_state(TableState::transactions(pagination.page_size));
    let view = resolve_view(&mut state, rows, params.page);
    let sort = state.sort();
    let filter = state.name_filter();

    let columns = sort_columns(sort, |s| table_href(TABLE_PATH, global, filter, s, view.current_page));
    let cells: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|tx| {
            vec![
                escape_html(tx.id()),
                escape_html(&tx.transaction.customer_name),
                tx.day.format("%Y-%m-%d").to_string(),
                escape_html(&tx.transaction.product),
                format_currency(tx.amount()),
                format_number(tx.points),
            ]
        })
        .collect();

    format!(
        "{}{}{}{}",
        sort_inputs(sort),
        sort_bar(global, sort),
        table(TABLE_ID, &columns, &cells, "No transactions available"),
        pager(TABLE_ID, view.current_page, view.total_pages, pagination.page_window, |page| {
            table_href(TABLE_PATH, global, filter, sort, page)
        })
    )
}

/// "Transactions" section with its name filter
pub fn render_transactions_section(
    global: &GlobalParams,
    rows: &[PricedTransaction],
    params: &TableParams,
    pagination: &PaginationConfig,
) -> String {
    section(
        "Transactions",
        TABLE_ID,
        TABLE_PATH,
        global,
        &params.filter,
        &render_transactions_table(global, rows, params, pagination),
    )
}
