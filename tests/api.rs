//! End-to-end router tests: the preview gate, the payment gate, method
//! rejection, and the degraded-index path, with upstream collaborators
//! either stubbed with wiremock or pointed at closed ports.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::config::AppConfig;
use fairprice::server::{create_router, AppState};

/// State with both upstreams pointed at a closed local port so any fetch
/// fails fast.
fn offline_state() -> AppState {
    let mut config = AppConfig::default();
    config.stripe_secret_key = "sk_test_dummy".into();
    config.bls_base_url = "http://127.0.0.1:9".into();
    config.stripe_base_url = "http://127.0.0.1:9".into();
    AppState::from_config(config)
}

fn post_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/price-check")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> (String, Value) {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let parsed: Value = serde_json::from_str(&text).unwrap();
    (text, parsed)
}

#[tokio::test]
async fn health_check_is_ok() {
    let app = create_router(offline_state());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn get_on_price_check_is_method_not_allowed() {
    let app = create_router(offline_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/price-check")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn preview_without_price_needs_price() {
    let app = create_router(offline_state());

    let response = app
        .oneshot(post_request(&json!({
            "mode": "preview",
            "category": "Plumbing",
            "postal_code": "02139"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let (_, parsed) = body_json(response).await;
    assert_eq!(parsed["label"], "needs price");
    assert_eq!(parsed["score"].as_f64().unwrap(), 0.5);
    assert!(parsed.get("full_report").is_none());
}

// With index lookups unavailable the multipliers degrade to neutral:
// benchmark 1400, ratio 2.0, "over", score 1.0, and the preview body
// discloses no dollar amounts.
#[tokio::test]
async fn preview_over_with_index_unavailable() {
    let app = create_router(offline_state());

    let response = app
        .oneshot(post_request(&json!({
            "mode": "preview",
            "category": "Auto (repair/body)",
            "scale": "medium",
            "postal_code": "90210",
            "price": 2800
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let (text, parsed) = body_json(response).await;
    assert_eq!(parsed["label"], "over");
    assert_eq!(parsed["score"].as_f64().unwrap(), 1.0);
    assert!(parsed.get("full_report").is_none());
    assert!(parsed.get("access").is_none());
    assert!(!text.contains('$'));
    assert!(!text.contains("1400"));
    assert!(!text.contains("2800"));
}

#[tokio::test]
async fn price_as_string_is_coerced() {
    let app = create_router(offline_state());

    let response = app
        .oneshot(post_request(&json!({
            "category": "Auto (repair/body)",
            "postal_code": "90210",
            "price": "2800"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let (_, parsed) = body_json(response).await;
    assert_eq!(parsed["label"], "over");
}

#[tokio::test]
async fn full_without_session_is_payment_required() {
    let app = create_router(offline_state());

    let response = app
        .oneshot(post_request(&json!({
            "mode": "full",
            "category": "Auto (repair/body)",
            "postal_code": "90210",
            "price": 2800
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let (text, parsed) = body_json(response).await;
    assert!(parsed.get("full_report").is_none());
    // No report contents may leak alongside the denial.
    assert!(!text.contains("1400"));
    assert!(!text.contains("benchmark"));
}

#[tokio::test]
async fn full_with_unknown_session_is_payment_required() {
    let stripe = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/checkout/sessions/cs_test_nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string("No such checkout session"))
        .mount(&stripe)
        .await;

    let mut config = AppConfig::default();
    config.stripe_secret_key = "sk_test_dummy".into();
    config.bls_base_url = "http://127.0.0.1:9".into();
    config.stripe_base_url = stripe.uri();
    let app = create_router(AppState::from_config(config));

    let response = app
        .oneshot(post_request(&json!({
            "mode": "full",
            "session_id": "cs_test_nope",
            "category": "Auto (repair/body)",
            "postal_code": "90210",
            "price": 2800
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn full_without_price_is_bad_request() {
    let app = create_router(offline_state());

    let response = app
        .oneshot(post_request(&json!({
            "mode": "full",
            "session_id": "cs_test_123",
            "category": "Plumbing"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn full_with_paid_session_returns_report() {
    let stripe = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/checkout/sessions/cs_test_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cs_test_123",
            "mode": "payment",
            "payment_status": "paid",
            "status": "complete",
            "subscription": null
        })))
        .mount(&stripe)
        .await;

    let bls = MockServer::start().await;
    let bls_body = |series_id: &str, value: &str| {
        json!({
            "status": "REQUEST_SUCCEEDED",
            "Results": {
                "series": [{
                    "seriesID": series_id,
                    "data": [{ "year": "2026", "period": "M07", "periodName": "July", "value": value }]
                }]
            }
        })
    };
    Mock::given(method("POST"))
        .and(path("/publicAPI/v2/timeseries/data/"))
        .and(body_string_contains("CUUR0000SA0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bls_body("CUUR0000SA0", "100.0")))
        .mount(&bls)
        .await;
    Mock::given(method("POST"))
        .and(path("/publicAPI/v2/timeseries/data/"))
        .and(body_string_contains("CUUR0400SA0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bls_body("CUUR0400SA0", "110.0")))
        .mount(&bls)
        .await;

    let mut config = AppConfig::default();
    config.stripe_secret_key = "sk_test_dummy".into();
    config.bls_base_url = bls.uri();
    config.stripe_base_url = stripe.uri();
    let app = create_router(AppState::from_config(config));

    let response = app
        .oneshot(post_request(&json!({
            "mode": "full",
            "session_id": "cs_test_123",
            "category": "Auto (repair/body)",
            "scale": "medium",
            "postal_code": "90210",
            "price": 2800
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let (_, parsed) = body_json(response).await;

    assert_eq!(parsed["label"], "over");
    assert_eq!(parsed["access"], "once");

    let report = &parsed["full_report"];
    // West CPI 110 vs national 100 lifts the 1400 baseline to 1540.
    let benchmark = report["benchmark"].as_f64().unwrap();
    assert!((benchmark - 1540.0).abs() < 1e-6);

    let low = report["fair_range"]["low"].as_f64().unwrap();
    let high = report["fair_range"]["high"].as_f64().unwrap();
    assert!((low - 1540.0 * 0.85).abs() < 1e-6);
    assert!((high - 1540.0 * 1.20).abs() < 1e-6);

    assert!(report["market_comparison"].as_str().unwrap().contains('$'));
    assert!(!report["negotiation_tips"].as_array().unwrap().is_empty());
    assert!(report["data_note"].as_str().unwrap().contains("CPI"));
}
