//! HTML building blocks shared by the three tables

use rewardweb_core::{page_window, CoreError, SortDirection, SortField, SortState};
use rewardweb_utils::escape_html;

use super::params::GlobalParams;

/// Element holding everything below the filter bar
pub const BODY_ID: &str = "rewards-body";
/// Fragment route for [`BODY_ID`]
pub const BODY_PATH: &str = "/rewards";
/// HTML reload route used by the retry and refresh buttons
pub const RELOAD_PATH: &str = "/rewards/reload";

/// Column header with the link that re-sorts on it
pub struct Column {
    pub label: &'static str,
    pub href: String,
    /// Direction arrow when this column is the active sort
    pub active: Option<SortDirection>,
}

/// Headers for every field of `F`, linking to the toggled sort
pub fn sort_columns<F: SortField>(sort: SortState<F>, href: impl Fn(SortState<F>) -> String) -> Vec<Column> {
    F::all()
        .iter()
        .map(|field| Column {
            label: field.label(),
            href: href(sort.toggle(*field)),
            active: (sort.field == *field).then_some(sort.direction),
        })
        .collect()
}

/// Table with a header row and one row per entry of `rows`.
///
/// Cells must already be escaped. An empty `rows` renders `empty_message`
/// instead of the table.
pub fn table(target: &str, columns: &[Column], rows: &[Vec<String>], empty_message: &str) -> String {
    if rows.is_empty() {
        return empty_state(empty_message);
    }

    let mut html = String::from("<div class='overflow-x-auto bg-white rounded-xl shadow-sm'><table class='min-w-full text-sm'><thead class='bg-gray-50'><tr>");
    for column in columns {
        let arrow = match column.active {
            Some(SortDirection::Asc) => " ▲",
            Some(SortDirection::Desc) => " ▼",
            None => "",
        };
        html.push_str(&format!(
            r#"<th class='px-4 py-2 text-left font-semibold text-gray-600'><a href='#' hx-get='{}' hx-target='#{}' class='hover:text-indigo-600'>{}{}</a></th>"#,
            escape_html(&column.href),
            target,
            column.label,
            arrow
        ));
    }
    html.push_str("</tr></thead><tbody>");

    for row in rows {
        html.push_str("<tr class='border-t hover:bg-gray-50'>");
        for cell in row {
            html.push_str(&format!("<td class='px-4 py-2'>{}</td>", cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div>");
    html
}

pub fn empty_state(message: &str) -> String {
    format!(
        "<div class='text-center py-12 text-gray-500'><p>{}</p></div>",
        escape_html(message)
    )
}

/// Prev, a window of page numbers, Next.
///
/// Renders nothing for a single page. Only in-range pages get a link; the
/// Prev/Next buttons are disabled at the ends.
pub fn pager(
    target: &str,
    current_page: usize,
    total_pages: usize,
    window: usize,
    href: impl Fn(usize) -> String,
) -> String {
    if total_pages <= 1 {
        return String::new();
    }

    let button = |page: Option<usize>, label: &str, is_current: bool| -> String {
        match page.filter(|p| *p >= 1 && *p <= total_pages) {
            Some(p) => format!(
                r#"<button hx-get='{}' hx-target='#{}' class='px-3 py-1 border rounded {}'>{}</button>"#,
                escape_html(&href(p)),
                target,
                if is_current { "bg-indigo-600 text-white" } else { "hover:bg-gray-100" },
                label
            ),
            None => format!(
                "<button disabled class='px-3 py-1 border rounded text-gray-300'>{}</button>",
                label
            ),
        }
    };

    let mut html = format!(
        "<div class='mt-4 flex items-center justify-between flex-wrap gap-4'><span class='text-sm text-gray-500'>Page {} of {}</span><div class='flex items-center gap-2'>",
        current_page, total_pages
    );
    html.push_str(&button(current_page.checked_sub(1), "Prev", false));
    for page in page_window(current_page, total_pages, window) {
        html.push_str(&button(Some(page), &page.to_string(), page == current_page));
    }
    html.push_str(&button(Some(current_page + 1), "Next", false));
    html.push_str("</div></div>");
    html
}

/// Shown while the fetch is outstanding; polls until the data arrives
pub fn loading_state(poll_href: &str, target: &str) -> String {
    format!(
        r#"<div class='text-center py-16' hx-get='{}' hx-trigger='load delay:1s' hx-target='#{}'>
            <div class='inline-block h-8 w-8 animate-spin rounded-full border-4 border-indigo-200 border-t-indigo-600'></div>
            <p class='mt-4 text-gray-600'>Loading transactions data...</p>
        </div>"#,
        escape_html(poll_href),
        target
    )
}

/// Error message with a retry button
pub fn error_state(message: &str, retry_href: &str, target: &str) -> String {
    format!(
        r#"<div class='bg-red-50 border border-red-200 rounded-xl p-6 text-center'>
            <h2 class='text-lg font-semibold text-red-700'>Error Loading Data</h2>
            <p class='mt-2 text-red-600'>{}</p>
            <button hx-post='{}' hx-target='#{}' hx-include='#global-filter' class='mt-4 px-4 py-2 bg-red-600 text-white rounded-lg hover:bg-red-700'>Try Again</button>
        </div>"#,
        escape_html(message),
        escape_html(retry_href),
        target
    )
}

/// Inline notice for bad filter input
pub fn filter_error(message: &str) -> String {
    format!(
        "<div class='bg-yellow-50 border border-yellow-200 rounded-lg p-3 text-sm text-yellow-700'>{}</div>",
        escape_html(message)
    )
}

/// What to show instead of a table when the store has nothing to offer
pub fn store_error(error: &CoreError, global: &GlobalParams) -> String {
    match error {
        CoreError::NotLoaded | CoreError::Loading => loading_state(&body_href(global), BODY_ID),
        CoreError::InvalidFilter { .. } => filter_error(&error.to_string()),
        CoreError::FetchFailure { .. } | CoreError::MalformedRecord { .. } => {
            error_state(&error.to_string(), RELOAD_PATH, BODY_ID)
        }
    }
}

/// `/rewards` with the current filter bar values
pub fn body_href(global: &GlobalParams) -> String {
    global.href(BODY_PATH)
}

/// Hidden inputs carrying the sort of the rendered table
pub fn sort_inputs<F: SortField>(sort: SortState<F>) -> String {
    format!(
        "<input type='hidden' name='sort' value='{}'><input type='hidden' name='dir' value='{}'>",
        sort.field, sort.direction
    )
}

/// Titled section with its own name filter above a swappable table.
///
/// Typing in the filter reloads only `#{table_id}`, keeping the current sort
/// and going back to page 1.
pub fn section(
    title: &str,
    table_id: &str,
    table_path: &str,
    global: &GlobalParams,
    filter: &str,
    table_html: &str,
) -> String {
    let href = global.href(table_path);
    format!(
        r#"<section class='mb-8'>
            <div class='flex items-center justify-between mb-3 gap-4'>
                <h2 class='text-xl font-semibold'>{title}</h2>
                <input type='search' id='{id}-filter' name='filter' value='{filter}' placeholder='Filter by customer name...'
                    class='px-3 py-1.5 text-sm border rounded-lg w-64'
                    hx-get='{href}' hx-trigger='input changed delay:300ms, search' hx-target='#{id}'
                    hx-include='#{id} [name="sort"], #{id} [name="dir"]'>
            </div>
            <div id='{id}'>{table}</div>
        </section>"#,
        title = title,
        id = table_id,
        filter = escape_html(filter),
        href = escape_html(&href),
        table = table_html
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewardweb_core::TotalField;

    #[test]
    fn test_pager_hidden_for_single_page() {
        assert_eq!(pager("t", 1, 1, 5, |p| format!("/x?page={}", p)), "");
        assert_eq!(pager("t", 1, 0, 5, |p| format!("/x?page={}", p)), "");
    }

    #[test]
    fn test_pager_first_page() {
        let html = pager("t", 1, 2, 5, |p| format!("/x?page={}", p));
        assert!(html.contains("Page 1 of 2"));
        assert!(html.contains("<button disabled class='px-3 py-1 border rounded text-gray-300'>Prev</button>"));
        assert!(html.contains("hx-get='/x?page=2'"));
        assert!(!html.contains("page=0"));
        assert!(!html.contains("page=3"));
    }

    #[test]
    fn test_pager_window_centered() {
        let html = pager("t", 6, 10, 5, |p| format!("/x?page={}", p));
        for page in 4..=8 {
            assert!(html.contains(&format!(">{}</button>", page)), "page {}", page);
        }
        assert!(!html.contains(">3</button>"));
        assert!(!html.contains(">9</button>"));
    }

    #[test]
    fn test_pager_last_page_disables_next() {
        let html = pager("t", 3, 3, 5, |p| format!("/x?page={}", p));
        assert!(html.contains("<button disabled class='px-3 py-1 border rounded text-gray-300'>Next</button>"));
    }

    #[test]
    fn test_table_empty_state() {
        let columns = sort_columns(SortState::asc(TotalField::CustomerName), |s| format!("/t?sort={}", s.field));
        let html = table("t", &columns, &[], "No total rewards data available");
        assert!(html.contains("No total rewards data available"));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_table_headers_and_rows() {
        let columns = sort_columns(SortState::asc(TotalField::CustomerName), |s| {
            format!("/t?sort={}&dir={}", s.field, s.direction)
        });
        let rows = vec![vec!["1".to_string(), "Ann".to_string(), "90".to_string()]];
        let html = table("t", &columns, &rows, "empty");

        assert!(html.contains("Customer Name ▲"));
        // active column flips, others start ascending
        assert!(html.contains("/t?sort=customerName&amp;dir=desc"));
        assert!(html.contains("/t?sort=rewardPoints&amp;dir=asc"));
        assert!(html.contains("<td class='px-4 py-2'>Ann</td>"));
    }

    #[test]
    fn test_error_state_escapes_message() {
        let html = error_state("<oops>", "/rewards/reload", "body");
        assert!(html.contains("Error Loading Data"));
        assert!(html.contains("&lt;oops&gt;"));
        assert!(html.contains("Try Again"));
    }

    #[test]
    fn test_store_error_variants() {
        let global = GlobalParams {
            name: "ann".to_string(),
            ..Default::default()
        };
        let loading = store_error(&CoreError::Loading, &global);
        assert!(loading.contains("Loading transactions data..."));
        assert!(loading.contains("hx-get='/rewards?name=ann'"));

        let failed = store_error(
            &CoreError::FetchFailure {
                message: "Failed to fetch data".to_string(),
            },
            &global,
        );
        assert!(failed.contains("Failed to fetch data"));
        assert!(failed.contains("hx-post='/rewards/reload'"));
    }

    #[test]
    fn test_section_keeps_filter_value() {
        let html = section("Total Rewards", "totals-table", "/rewards/total/table", &GlobalParams::default(), "o'neil", "<p>rows</p>");
        assert!(html.contains("<h2 class='text-xl font-semibold'>Total Rewards</h2>"));
        assert!(html.contains("value='o&#39;neil'"));
        assert!(html.contains("hx-get='/rewards/total/table'"));
        assert!(html.contains("<div id='totals-table'><p>rows</p></div>"));
        assert!(html.contains(r#"hx-include='#totals-table [name="sort"], #totals-table [name="dir"]'"#));
    }

    #[test]
    fn test_sort_columns_cover_every_field() {
        use rewardweb_core::{MonthlyField, TransactionField};

        let columns = sort_columns(SortState::asc(TransactionField::Date), |s| s.field.to_string());
        assert_eq!(columns.len(), TransactionField::all().len());
        assert_eq!(columns[2].active, Some(SortDirection::Asc));
        assert_eq!(columns.iter().filter(|c| c.active.is_some()).count(), 1);

        let columns = sort_columns(SortState::asc(MonthlyField::Period), |s| s.field.to_string());
        let labels: Vec<_> = columns.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["Customer ID", "Customer Name", "Period", "Reward Points"]);
    }
}
