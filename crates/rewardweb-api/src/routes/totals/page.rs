//! Total rewards section rendering

use crate::routes::params::{resolve_view, table_href, GlobalParams, TableParams};
use crate::routes::render::{pager, section, sort_columns, sort_inputs, table};
use rewardweb_config::PaginationConfig;
use rewardweb_core::{TableState, TotalReward};
use rewardweb_utils::{escape_html, format_number};

pub const TABLE_ID: &str = "totals-table";
pub const TABLE_PATH: &str = "/rewards/total/table";

pub fn render_totals_table(
    global: &GlobalParams,
    rows: &[TotalReward],
    params: &TableParams,
    pagination: &PaginationConfig,
) -> String {
    let mut state = params.state(TableState::totals(pagination.page_size));
    let view = resolve_view(&mut state, rows, params.page);
    let sort = state.sort();
    let filter = state.name_filter();

    let columns = sort_columns(sort, |s| table_href(TABLE_PATH, global, filter, s, view.current_page));
    let cells: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            vec![
                escape_html(&row.customer_id.to_string()),
                escape_html(&row.customer_name),
                format_number(row.reward_points),
            ]
        })
        .collect();

    format!(
        "{}{}{}",
        sort_inputs(sort),
        table(TABLE_ID, &columns, &cells, "No total rewards data available"),
        pager(TABLE_ID, view.current_page, view.total_pages, pagination.page_window, |page| {
            table_href(TABLE_PATH, global, filter, sort, page)
        })
    )
}

/// "Total Rewards" section with its name filter
pub fn render_totals_section(
    global: &GlobalParams,
    rows: &[TotalReward],
    params: &TableParams,
    pagination: &PaginationConfig,
) -> String {
    section(
        "Total Rewards",
        TABLE_ID,
        TABLE_PATH,
        global,
        &params.filter,
        &render_totals_table(global, rows, params, pagination),
    )
}
