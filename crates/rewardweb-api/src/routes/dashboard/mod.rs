//! Dashboard routes - filter bar, the three reward tables, load state and reload
//!
//! Structure:
//! - api.rs: JSON state/reload endpoints and HTMX body/reload fragments
//! - page.rs: Full page and body rendering

pub mod api;
pub mod page;

pub use api::{api_health, api_reload, api_state, htmx_reload, htmx_rewards_body};
pub use page::{page_index, render_body};
