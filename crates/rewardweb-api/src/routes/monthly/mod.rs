//! Monthly rewards routes - points per customer per calendar month

pub mod api;
pub mod page;

pub use api::{api_monthly_rewards, htmx_monthly_table};
pub use page::{render_monthly_section, render_monthly_table};
