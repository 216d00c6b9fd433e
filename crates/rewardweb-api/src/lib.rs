//! HTTP API server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::dashboard: Dashboard page, filter bar, load state and reload
//! - routes::monthly: Monthly rewards table
//! - routes::totals: Total rewards table
//! - routes::transactions: Priced transactions table

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use rewardweb_config::Config;
use rewardweb_core::SharedStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::{api_health, api_reload, api_state, htmx_reload, htmx_rewards_body, page_index};
    use routes::monthly::{api_monthly_rewards, htmx_monthly_table};
    use routes::totals::{api_total_rewards, htmx_totals_table};
    use routes::transactions::{api_transactions, htmx_transactions_table};

    Router::new()
        // API endpoints
        .route("/api/health", get(api_health))
        .route("/api/state", get(api_state))
        .route("/api/reload", post(api_reload))
        .route("/api/transactions", get(api_transactions))
        .route("/api/rewards/monthly", get(api_monthly_rewards))
        .route("/api/rewards/total", get(api_total_rewards))
        // HTMX page routes
        .route("/", get(page_index))
        // HTMX partial routes
        .route("/rewards", get(htmx_rewards_body))
        .route("/rewards/reload", post(htmx_reload))
        .route("/rewards/transactions/table", get(htmx_transactions_table))
        .route("/rewards/monthly/table", get(htmx_monthly_table))
        .route("/rewards/total/table", get(htmx_totals_table))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Full document for normal requests, the bare content for HTMX swaps
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    let main = format!(
        "<main class='max-w-6xl mx-auto p-6'>{}</main>",
        inner_content
    );
    if is_htmx_request(headers) {
        main
    } else {
        base_html(title, &main)
    }
}

/// Start the HTTP server
///
/// Binds to `server.host:server.port` and serves until the listener fails.
/// The initial data load is started by the caller.
pub async fn start_server(config: Config, store: SharedStore) -> Result<(), ApiError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { store, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await.map_err(|source| ApiError::Bind {
        addr: addr.clone(),
        source,
    })?;
    log::info!("Starting rewards server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Rewards dashboard)");
    log::info!("  - /api/transactions, /api/rewards/monthly, /api/rewards/total");
    log::info!("  - /api/state, /api/reload, /api/health");

    axum::serve(listener, router).await.map_err(ApiError::Serve)?;
    log::info!("Server stopped gracefully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use rewardweb_core::RewardsStore;
    use rewardweb_source::JsonFileSource;
    use std::io::Write;
    use std::sync::Arc;
    use tower::ServiceExt;

    const DOCUMENT: &str = r#"{
        "transactions": [
            { "id": "t1", "customerId": 101, "customerName": "Ann Lee", "date": "2024-01-10", "product": "Phone", "amount": 120 },
            { "id": "t2", "customerId": 101, "customerName": "Ann Lee", "date": "2024-02-03", "product": "Tablet", "amount": 75 },
            { "id": "t3", "customerId": 102, "customerName": "Bob Ray", "date": "2024-01-20", "product": "Laptop", "amount": 200 },
            { "id": "t4", "customerId": 103, "customerName": "Cy Dunn", "date": "2024-03-01", "product": "Watch", "amount": 60 },
            { "id": "t5", "customerId": 104, "customerName": "Di Moss", "date": "2024-03-02", "product": "Cable", "amount": 20 },
            { "id": "t6", "customerId": 105, "customerName": "Ed Park", "date": "2024-03-05", "product": "Mouse", "amount": 51 }
        ]
    }"#;

    fn state_for(path: &str) -> AppState {
        let config = Config::default();
        let store = RewardsStore::new(config.clone(), Arc::new(JsonFileSource::new(path))).shared();
        AppState { store, config }
    }

    async fn loaded_state() -> (AppState, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();
        let state = state_for(file.path().to_str().unwrap());
        assert!(RewardsStore::refresh(&state.store).await.unwrap());
        (state, file)
    }

    async fn get(state: &AppState, uri: &str) -> (StatusCode, String) {
        send(state, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, String) {
        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let state = state_for("unused.json");
        let (status, body) = get(&state, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_api_before_load_is_unavailable() {
        let state = state_for("unused.json");
        let (status, body) = get(&state, "/api/transactions").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains("NOT_LOADED"));
    }

    #[tokio::test]
    async fn test_api_totals() {
        let (state, _file) = loaded_state().await;
        let (status, body) = get(&state, "/api/rewards/total?sort=rewardPoints&dir=desc").await;
        assert_eq!(status, StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["total_items"], 5);
        assert_eq!(json["rows"][0]["customerId"], 102);
        assert_eq!(json["rows"][0]["rewardPoints"], 250);
        assert_eq!(json["rows"][1]["rewardPoints"], 115);
    }

    #[tokio::test]
    async fn test_api_monthly_with_window() {
        let (state, _file) = loaded_state().await;
        let (_, body) = get(&state, "/api/rewards/monthly?from=2024-03").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["total_items"], 3);
        assert_eq!(json["total_pages"], 1);
    }

    #[tokio::test]
    async fn test_api_transactions_pages() {
        let (state, _file) = loaded_state().await;
        let (_, body) = get(&state, "/api/transactions?page=2").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["current_page"], 2);
        assert_eq!(json["total_pages"], 2);
        // oldest purchase lands alone on page 2
        assert_eq!(json["rows"][0]["id"], "t1");
        assert_eq!(json["rows"][0]["points"], 90);
    }

    #[tokio::test]
    async fn test_api_rejects_bad_filter() {
        let (state, _file) = loaded_state().await;
        let (status, body) = get(&state, "/api/transactions?from=yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("INVALID_FILTER"));
    }

    #[tokio::test]
    async fn test_dashboard_full_page_and_fragment() {
        let (state, _file) = loaded_state().await;
        let (status, body) = get(&state, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("Customer Rewards Program"));
        assert!(body.contains("Refresh Data"));

        let request = Request::builder()
            .uri("/")
            .header("hx-request", "true")
            .body(Body::empty())
            .unwrap();
        let (_, body) = send(&state, request).await;
        assert!(!body.contains("<!DOCTYPE html>"));
        assert!(body.contains("Monthly Rewards"));
    }

    #[tokio::test]
    async fn test_monthly_table_fragment_second_page() {
        let (state, _file) = loaded_state().await;
        let (_, body) = get(&state, "/rewards/monthly/table?page=2").await;
        assert!(body.contains("Page 2 of 2"));
        assert!(body.contains("Ed Park"));
        assert!(!body.contains("Ann Lee"));
    }

    #[tokio::test]
    async fn test_reload_failure_reports_error() {
        let state = state_for("/definitely/missing/transactions.json");
        let request = Request::builder()
            .method("POST")
            .uri("/api/reload")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#""success":false"#));
        assert!(body.contains("Failed to fetch data"));

        let (_, body) = get(&state, "/api/state").await;
        assert!(body.contains(r#""status":"error""#));

        let (_, body) = get(&state, "/rewards").await;
        assert!(body.contains("Error Loading Data"));
        assert!(body.contains("Try Again"));
    }

    #[tokio::test]
    async fn test_htmx_reload_shows_loading() {
        let (state, _file) = loaded_state().await;
        let request = Request::builder()
            .method("POST")
            .uri("/rewards/reload")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("name=ann&from=&to="))
            .unwrap();
        let (status, body) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Loading transactions data..."));
        assert!(body.contains("hx-get='/rewards?name=ann'"));
    }

    #[tokio::test]
    async fn test_htmx_reload_starts_load_before_responding() {
        let state = state_for("/definitely/missing/transactions.json");
        assert!(RewardsStore::refresh(&state.store).await.is_err());

        let request = Request::builder()
            .method("POST")
            .uri("/rewards/reload")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(""))
            .unwrap();
        let (status, _) = send(&state, request).await;
        assert_eq!(status, StatusCode::OK);

        // the failed generation 1 is already superseded
        assert_eq!(state.store.read().await.summary().generation, 2);
    }
}
