//! Total rewards routes - points per customer

pub mod api;
pub mod page;

pub use api::{api_total_rewards, htmx_totals_table};
pub use page::{render_totals_section, render_totals_table};
