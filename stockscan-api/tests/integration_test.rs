use axum::{
    body::Body,
    http::{header::LOCATION, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use stockscan_api::{app, AppState};
use stockscan_core::MemoryStore;
use stockscan_shared::ProductRecord;
use tower::ServiceExt;

fn router(store: Arc<MemoryStore>) -> Router {
    app(AppState::new(store))
}

async fn send(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let resp = send(router(Arc::new(MemoryStore::new())), "/health").await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "ok");
}

#[tokio::test]
async fn test_repeated_api_scans_walk_stock_down_to_zero() {
    let store = Arc::new(MemoryStore::with_records([ProductRecord::new("p1", "Cable Ties")
        .with_quantity(2)
        .with_unit_price(0.5)
        .with_consumption(0, 0)]));
    let app = router(store.clone());

    let mut seen = Vec::new();
    for _ in 0..3 {
        let resp = send(app.clone(), "/api/update-stock?product=Cable%20Ties").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(resp).await).unwrap();
        seen.push((body["newQty"].as_i64().unwrap(), body["totalConsumed"].as_i64().unwrap()));
        assert_eq!(body["status"], "low-stock");
    }

    // Clamped at zero while the counters keep going
    assert_eq!(seen, vec![(1, 1), (0, 2), (0, 3)]);
    let record = store.get("p1").unwrap();
    assert_eq!(record.quantity, 0);
    assert_eq!(record.monthly_consumed, 3);
}

#[tokio::test]
async fn test_scan_page_flow_through_redirect() {
    let store = Arc::new(MemoryStore::with_records([ProductRecord::new("p2", "Gauze").with_quantity(20)]));
    let app = router(store.clone());

    let redirect = send(app.clone(), "/scan?product=Gauze").await;
    assert_eq!(redirect.status(), StatusCode::SEE_OTHER);
    let location = redirect.headers().get(LOCATION).unwrap().to_str().unwrap().to_string();

    let page = send(app.clone(), &location).await;
    assert_eq!(page.status(), StatusCode::OK);
    let html = body_text(page).await;
    assert!(html.contains("Stock Updated!"));
    assert!(html.contains("19 units"));

    // Reloading the same URL replays the result
    let reload = body_text(send(app, &location).await).await;
    assert_eq!(reload, html);
    assert_eq!(store.update_count(), 1);
}

#[tokio::test]
async fn test_invalid_attempt_token_is_rejected() {
    let store = Arc::new(MemoryStore::new());

    let resp = send(router(store.clone()), "/scan?product=Gauze&attempt=not-a-uuid").await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.lookup_count(), 0);
}
