//! HTTP API tests
//!
//! Drive the full router, middleware included, with in-memory state and a
//! clock fixed at 2025-12-01.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use domain_application::InMemoryApplicationPort;
use interface_api::{config::ApiConfig, create_router, AppState};
use test_utils::{QuoteFixtures, RequestFixtures};

fn router() -> Router {
    let state = AppState::new(
        ApiConfig::default(),
        QuoteFixtures::registry(),
        Arc::new(InMemoryApplicationPort::new()),
    );
    create_router(state)
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = router.clone().oneshot(request).await.expect("router dispatch");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.expect("body");
    let payload = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json")
    };
    (status, payload)
}

async fn send_raw(router: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    let response = router.clone().oneshot(request).await.expect("router dispatch");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.expect("body");
    (status, serde_json::from_slice(&bytes).expect("json"))
}

fn good_profile() -> Value {
    serde_json::from_str(RequestFixtures::good_profile_json()).expect("fixture json")
}

// ============= HEALTH =============
mod health {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let (status, body) = send(&router(), "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "UP");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_readiness_with_memory_store() {
        let (status, body) = send(&router(), "GET", "/api/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "UP");
    }
}

// ============= QUOTES =============
mod quotes {
    use super::*;

    #[tokio::test]
    async fn test_good_profile_quote() {
        let (status, body) = send(&router(), "POST", "/api/quotes", Some(good_profile())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["institution"], "DAVIVIENDA");
        assert_eq!(body["validUntil"], "2025-12-31");
        assert_eq!(body["feesEstimated"], 32_000);
        assert_eq!(body["rateEAmin"].as_f64(), Some(0.16));

        let apr = body["aprEAEstimated"].as_f64().unwrap();
        assert!((apr - 0.1915).abs() < 1e-9);

        let min = body["monthlyPaymentMin"].as_i64().unwrap();
        let max = body["monthlyPaymentMax"].as_i64().unwrap();
        assert!(0 < min && min <= max);
    }

    #[tokio::test]
    async fn test_named_institution_is_case_insensitive() {
        let (status, body) =
            send(&router(), "POST", "/api/quotes/davivienda", Some(good_profile())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["institution"], "DAVIVIENDA");
    }

    #[tokio::test]
    async fn test_unknown_institution_is_not_found() {
        let (status, body) = send(&router(), "POST", "/api/quotes/NEQUI", Some(good_profile())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_invalid_amount_names_field() {
        let mut request = good_profile();
        request["amount"] = json!(0);

        let (status, body) = send(&router(), "POST", "/api/quotes", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["details"], json!(["amount"]));
    }

    #[tokio::test]
    async fn test_oversized_amount_names_field() {
        let mut request = good_profile();
        request["amount"] = json!(i64::MAX);

        let (status, body) = send(&router(), "POST", "/api/quotes", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"], json!(["amount"]));
    }

    #[tokio::test]
    async fn test_negative_expenses_rejected() {
        let mut request = good_profile();
        request["monthlyExpenses"] = json!(-1);

        let (status, body) = send(&router(), "POST", "/api/quotes", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"], json!(["monthlyExpenses"]));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (status, body) = send_raw(&router(), "/api/quotes", "{\"amount\": ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let (status, body) =
            send_raw(&router(), "/api/quotes", r#"{"amount":10000000,"termMonths":36}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_list_institutions() {
        let (status, body) = send(&router(), "GET", "/api/quotes/institutions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"institutions": ["DAVIVIENDA"], "defaultInstitution": "DAVIVIENDA"})
        );
    }
}

// ============= APPLICATIONS =============
mod applications {
    use super::*;

    async fn create(router: &Router, user_id: &str, amount: f64) -> Value {
        let (status, body) = send(
            router,
            "POST",
            "/api/applications",
            Some(json!({"userId": user_id, "amount": amount})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn test_create_application() {
        let router = router();
        let body = create(&router, "user123", 5_000_000.0).await;

        assert!(body["id"].as_str().unwrap().starts_with("APP-"));
        assert_eq!(body["userId"], "user123");
        assert_eq!(body["amount"].as_f64(), Some(5_000_000.0));
        assert_eq!(body["status"], "PENDING");
        assert!(body["notes"].is_null());
    }

    #[tokio::test]
    async fn test_get_by_id_accepts_prefixed_and_bare_ids() {
        let router = router();
        let created = create(&router, "user123", 1_000_000.0).await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, body) = send(&router, "GET", &format!("/api/applications/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id.as_str());

        let bare = id.trim_start_matches("APP-");
        let (status, _) = send(&router, "GET", &format!("/api/applications/{bare}"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_and_unparseable_ids_are_not_found() {
        let router = router();
        let (status, _) = send(
            &router,
            "GET",
            "/api/applications/APP-0191a4e2-0000-7000-8000-000000000000",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&router, "GET", "/api/applications/not-an-id", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let (status, body) = send(
            &router(),
            "POST",
            "/api/applications",
            Some(json!({"amount": 1000})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_amount() {
        let (status, body) = send(
            &router(),
            "POST",
            "/api/applications",
            Some(json!({"userId": "user123", "amount": -5})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_user_listing_and_count() {
        let router = router();
        create(&router, "user1", 1_000_000.0).await;
        create(&router, "user1", 2_000_000.0).await;
        create(&router, "user2", 3_000_000.0).await;

        let (status, body) = send(&router, "GET", "/api/applications/user/user1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = send(&router, "GET", "/api/applications/user/user1/count", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"count": 2}));

        let (_, body) = send(&router, "GET", "/api/applications/user/nobody/count", None).await;
        assert_eq!(body, json!({"count": 0}));

        let (_, body) = send(&router, "GET", "/api/applications", None).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_status_update_and_filter() {
        let router = router();
        let created = create(&router, "user123", 5_000_000.0).await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send(
            &router,
            "PATCH",
            &format!("/api/applications/{id}/status"),
            Some(json!({"status": "approved", "notes": "Meets policy"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "APPROVED");
        assert_eq!(body["notes"], "Meets policy");

        let (status, body) = send(&router, "GET", "/api/applications/status/APPROVED", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (_, body) = send(&router, "GET", "/api/applications/status/under-review", None).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_status_is_bad_request() {
        let router = router();
        let (status, _) = send(&router, "GET", "/api/applications/status/ARCHIVED", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let created = create(&router, "user123", 5_000_000.0).await;
        let id = created["id"].as_str().unwrap();
        let (status, _) = send(
            &router,
            "PATCH",
            &format!("/api/applications/{id}/status"),
            Some(json!({"status": "ARCHIVED"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_status_update_of_missing_application() {
        let (status, _) = send(
            &router(),
            "PATCH",
            "/api/applications/APP-0191a4e2-0000-7000-8000-000000000000/status",
            Some(json!({"status": "APPROVED"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_application() {
        let router = router();
        let created = create(&router, "user123", 5_000_000.0).await;
        let uri = format!("/api/applications/{}", created["id"].as_str().unwrap());

        let (status, body) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());

        let (status, _) = send(&router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&router, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
