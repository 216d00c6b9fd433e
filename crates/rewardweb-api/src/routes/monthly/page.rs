//! Monthly rewards section rendering

use crate::routes::params::{resolve_view, table_href, GlobalParams, TableParams};
use crate::routes::render::{pager, section, sort_columns, sort_inputs, table};
use rewardweb_config::PaginationConfig;
use rewardweb_core::{MonthlyReward, Periodic, TableState};
use rewardweb_utils::{escape_html, format_number};

pub const TABLE_ID: &str = "monthly-table";
pub const TABLE_PATH: &str = "/rewards/monthly/table";

pub fn render_monthly_table(
    global: &GlobalParams,
    rows: &[MonthlyReward],
    params: &TableParams,
    pagination: &PaginationConfig,
) -> String {
    let mut state = params.state(TableState::monthly(pagination.page_size));
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
                row.period().display_first_day(),
                format_number(row.reward_points),
            ]
        })
        .collect();

    format!(
        "{}{}{}",
        sort_inputs(sort),
        table(TABLE_ID, &columns, &cells, "No monthly rewards data available"),
        pager(TABLE_ID, view.current_page, view.total_pages, pagination.page_window, |page| {
            table_href(TABLE_PATH, global, filter, sort, page)
        })
    )
}

/// "Monthly Rewards" section with its name filter
pub fn render_monthly_section(
    global: &GlobalParams,
    rows: &[MonthlyReward],
    params: &TableParams,
    pagination: &PaginationConfig,
) -> String {
    section(
        "Monthly Rewards",
        TABLE_ID,
        TABLE_PATH,
        global,
        &params.filter,
        &render_monthly_table(global, rows, params, pagination),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewardweb_source::CustomerId;
    use std::collections::HashMap;

    fn row(id: i64, name: &str, month: u32) -> MonthlyReward {
        MonthlyReward {
            customer_id: CustomerId::Number(id),
            customer_name: name.to_string(),
            month,
            year: 2024,
            reward_points: 10 * month as u64,
        }
    }

    fn six_rows() -> Vec<MonthlyReward> {
        (1..=6).map(|m| row(100 + m as i64, &format!("Customer {}", m), m)).collect()
    }

    fn params(pairs: &[(&str, &str)]) -> TableParams {
        let query: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        TableParams::from_query(&query)
    }

    #[test]
    fn test_six_rows_two_pages() {
        let html = render_monthly_table(&GlobalParams::default(), &six_rows(), &params(&[]), &PaginationConfig::default());
        assert!(html.contains("Page 1 of 2"));
        assert_eq!(html.matches("<tr class='border-t").count(), 5);
        assert!(!html.contains("Customer 6</td>"));

        let html = render_monthly_table(
            &GlobalParams::default(),
            &six_rows(),
            &params(&[("page", "2")]),
            &PaginationConfig::default(),
        );
        assert!(html.contains("Page 2 of 2"));
        assert_eq!(html.matches("<tr class='border-t").count(), 1);
        assert!(html.contains("Customer 6</td>"));
    }

    #[test]
    fn test_out_of_range_page_stays_on_first() {
        let html = render_monthly_table(
            &GlobalParams::default(),
            &six_rows(),
            &params(&[("page", "9")]),
            &PaginationConfig::default(),
        );
        assert!(html.contains("Page 1 of 2"));
    }

    #[test]
    fn test_period_display() {
        let html = render_monthly_table(&GlobalParams::default(), &[row(1, "Ann", 3)], &params(&[]), &PaginationConfig::default());
        assert!(html.contains("<td class='px-4 py-2'>01-03-2024</td>"));
        assert!(!html.contains("Page 1 of 1"));
    }

    #[test]
    fn test_empty_monthly() {
        let html = render_monthly_section(&GlobalParams::default(), &[], &params(&[]), &PaginationConfig::default());
        assert!(html.contains("Monthly Rewards"));
        assert!(html.contains("No monthly rewards data available"));
    }
}
