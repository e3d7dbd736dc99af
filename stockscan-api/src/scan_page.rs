//! Scan landing page.
//!
//! A printed code points at `/scan?product=<name>`. The first visit is
//! redirected to the same URL with a fresh `attempt` token; the decrement runs
//! once per token, so reloading a finished page shows the recorded result
//! instead of consuming another unit. Only failed attempts can be retried.

use axum::{
    extract::{Query, RawQuery, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use stockscan_core::{perform_decrement, ScanState};
use stockscan_shared::TransactionResult;
use tracing::{error, info};
use uuid::Uuid;

use crate::attempts::Claim;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScanQuery {
    pub product: Option<String>,
    pub attempt: Option<Uuid>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/scan", get(scan))
}

async fn scan(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    Query(query): Query<ScanQuery>,
) -> Response {
    let here = format!("/scan?{}", raw.unwrap_or_default());
    let initial = ScanState::start(query.product.as_deref());
    if !initial.is_loading() {
        return Html(render(&initial, &here)).into_response();
    }

    let Some(attempt) = query.attempt else {
        return Redirect::to(&format!("{}&attempt={}", here, Uuid::new_v4())).into_response();
    };

    let page = match state.attempts.claim(attempt).await {
        Claim::Completed(result) => {
            info!("Attempt {} already completed, replaying result", attempt);
            initial.resolve(Ok(result))
        }
        Claim::InFlight => initial,
        Claim::Fresh => {
            let product = query.product.unwrap_or_default();
            let store = state.store.clone();
            let ledger = state.attempts.clone();

            // Detached so a closed tab cannot cancel a started decrement
            let task = tokio::spawn(async move {
                let outcome = perform_decrement(store.as_ref(), &product, Utc::now()).await;
                match &outcome {
                    Ok(result) => ledger.complete(attempt, result.clone()).await,
                    Err(_) => ledger.release(attempt).await,
                }
                outcome
            });

            match task.await {
                Ok(outcome) => initial.resolve(outcome),
                Err(e) => {
                    error!("Scan task for attempt {} aborted: {}", attempt, e);
                    state.attempts.release(attempt).await;
                    ScanState::Error("Scan was interrupted".to_string())
                }
            }
        }
    };

    Html(render(&page, &here)).into_response()
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn row(label: &str, value: &str) -> String {
    format!(
        "<div class=\"row\"><span class=\"label\">{}</span><span class=\"value\">{}</span></div>",
        label, value
    )
}

fn details(result: &TransactionResult, with_value: bool) -> String {
    let mut rows = vec![
        row("Product:", &escape_html(&result.product_name)),
        row("Previous:", &format!("{} units", result.previous_quantity)),
        row("Current:", &format!("{} units", result.new_quantity)),
        row("Consumed This Month:", &result.monthly_consumed.to_string()),
        row("Total Consumed:", &result.total_consumed.to_string()),
    ];
    if with_value {
        rows.push(row("Unit Price:", &format!("{:.2}", result.unit_price)));
        rows.push(row("Remaining Value:", &format!("{:.2}", result.remaining_value)));
    }
    rows.concat()
}

/// Full HTML document for `state`. `here` is the page's own URL, used by the
/// retry link on the error view.
pub fn render(state: &ScanState, here: &str) -> String {
    let (head_extra, body) = match state {
        ScanState::Loading => (
            "<meta http-equiv=\"refresh\" content=\"1\">",
            "<section class=\"card loading\"><h2>Processing...</h2><p>Updating stock level</p></section>"
                .to_string(),
        ),
        ScanState::Success(result) => (
            "",
            format!(
                "<section class=\"card success\"><h2>Stock Updated!</h2>{}\
                 <p class=\"hint\">You can close this page now</p></section>",
                details(result, true)
            ),
        ),
        ScanState::LowStock(result) => (
            "",
            format!(
                "<section class=\"card low-stock\"><h2>Low Stock Alert!</h2>{}\
                 <p class=\"restock\">Time to restock!</p>\
                 <p class=\"hint\">You can close this page now</p></section>",
                details(result, true)
            ),
        ),
        ScanState::Error(message) => (
            "",
            format!(
                "<section class=\"card error\"><h2>Error</h2><p class=\"message\">{}</p>\
                 <p>Common issues:</p><ul>\
                 <li>Product name doesn't match database</li>\
                 <li>No internet connection</li>\
                 <li>Inventory store token expired</li>\
                 <li>Missing database properties (Total Consumed, etc.)</li>\
                 </ul><a class=\"retry\" href=\"{}\">Try Again</a></section>",
                escape_html(message),
                escape_html(here)
            ),
        ),
    };

    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">{}\
         <title>Stock Scanner</title></head><body>{}</body></html>",
        head_extra, body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::LOCATION, Request, StatusCode},
    };
    use std::sync::Arc;
    use stockscan_core::MemoryStore;
    use stockscan_shared::ProductRecord;
    use tower::ServiceExt;

    fn state_with(store: Arc<MemoryStore>) -> AppState {
        AppState::new(store)
    }

    async fn get_page(state: AppState, uri: &str) -> (StatusCode, String, Option<String>) {
        let resp = routes()
            .with_state(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let location = resp
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap(), location)
    }

    fn gloves() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::with_records([ProductRecord::new("g", "Gloves")
            .with_quantity(6)
            .with_unit_price(1.25)]))
    }

    #[tokio::test]
    async fn test_missing_product_renders_error_without_redirect() {
        let store = gloves();

        let (status, html, location) = get_page(state_with(store.clone()), "/scan").await;

        assert_eq!(status, StatusCode::OK);
        assert!(location.is_none());
        assert!(html.contains("No product specified in URL"));
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_first_visit_redirects_with_attempt() {
        let store = gloves();

        let (status, _, location) = get_page(state_with(store.clone()), "/scan?product=Gloves").await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        let location = location.unwrap();
        assert!(location.starts_with("/scan?product=Gloves&attempt="));
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_reload_of_completed_attempt_does_not_decrement_again() {
        let store = gloves();
        let state = state_with(store.clone());
        let uri = format!("/scan?product=Gloves&attempt={}", Uuid::new_v4());

        let (_, first, _) = get_page(state.clone(), &uri).await;
        let (_, second, _) = get_page(state, &uri).await;

        assert!(first.contains("Stock Updated!"));
        assert!(first.contains("5 units"));
        assert!(first.contains("6.25"));
        assert_eq!(first, second);
        assert_eq!(store.update_count(), 1);
        assert_eq!(store.get("g").unwrap().quantity, 5);
    }

    #[tokio::test]
    async fn test_low_stock_view() {
        let store = Arc::new(MemoryStore::with_records([ProductRecord::new("t", "Tape").with_quantity(1)]));
        let uri = format!("/scan?product=Tape&attempt={}", Uuid::new_v4());

        let (_, html, _) = get_page(state_with(store), &uri).await;

        assert!(html.contains("Low Stock Alert!"));
        assert!(html.contains("Time to restock!"));
        assert!(!html.contains("Try Again"));
    }

    #[tokio::test]
    async fn test_failed_attempt_can_be_retried() {
        let store = gloves();
        store.fail_lookups("service unavailable");
        let state = state_with(store.clone());
        let uri = format!("/scan?product=Gloves&attempt={}", Uuid::new_v4());

        let (_, html, _) = get_page(state.clone(), &uri).await;
        assert!(html.contains("Inventory store query failed: service unavailable"));
        assert!(html.contains("Try Again"));
        assert!(html.contains(&escape_html(&uri)));

        let (_, again, _) = get_page(state, &uri).await;
        assert!(again.contains("Error"));
        assert_eq!(store.lookup_count(), 2);
    }

    #[tokio::test]
    async fn test_reload_while_running_shows_loading_without_store_calls() {
        let store = gloves();
        let state = state_with(store.clone());
        let attempt = Uuid::new_v4();
        assert_eq!(state.attempts.claim(attempt).await, Claim::Fresh);

        let uri = format!("/scan?product=Gloves&attempt={}", attempt);
        let (status, html, location) = get_page(state.clone(), &uri).await;

        assert_eq!(status, StatusCode::OK);
        assert!(location.is_none());
        assert!(html.contains("Processing..."));
        assert!(html.contains("http-equiv=\"refresh\""));
        assert!(!html.contains("Try Again"));
        assert_eq!(store.lookup_count(), 0);
        assert_eq!(store.update_count(), 0);
        assert_eq!(state.attempts.claim(attempt).await, Claim::InFlight);
    }

    #[test]
    fn test_product_names_are_escaped() {
        let page = render(&ScanState::Error("Product '<b>' not found".to_string()), "/scan?a=1&b=2");
        assert!(page.contains("&lt;b&gt;"));
        assert!(page.contains("/scan?a=1&amp;b=2"));
    }

    #[test]
    fn test_loading_view_refreshes() {
        let page = render(&ScanState::Loading, "/scan");
        assert!(page.contains("Processing..."));
        assert!(page.contains("http-equiv=\"refresh\""));
    }
}
