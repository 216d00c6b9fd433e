//! Transaction routes - priced purchases with sort presets and pagination
//!
//! Structure:
//! - api.rs: JSON API and HTMX table fragment
//! - page.rs: Section and table rendering

pub mod api;
pub mod page;

pub use api::{api_transactions, htmx_transactions_table};
pub use page::{render_transactions_section, render_transactions_table};
