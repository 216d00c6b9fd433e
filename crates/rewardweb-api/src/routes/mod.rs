//! Route modules for the API server
//!
//! - dashboard: Full page, filter bar, load state and reload
//! - monthly: Monthly rewards table
//! - totals: Total rewards table
//! - transactions: Priced transactions table
//!
//! Each table module follows the same structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints and HTMX fragments
//! - page.rs: HTML rendering
//!
//! `params` and `render` hold the query-string state and HTML pieces they share.

pub mod dashboard;
pub mod monthly;
pub mod params;
pub mod render;
pub mod totals;
pub mod transactions;
