//! REST 接口测试

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use bank_account::api::{router, AppState};
use bank_account::application::BankAccountService;
use bank_account::infrastructure::persistence::InMemoryBankAccountRepository;
use cuba_config::PaginationConfig;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

const APP: &str = "bankAccountApp";

fn app() -> Router {
    let service = Arc::new(BankAccountService::new(Arc::new(
        InMemoryBankAccountRepository::new(),
    )));
    router(AppState {
        service,
        app_name: APP.to_string(),
        pagination: PaginationConfig {
            default_page_size: 20,
            max_page_size: 50,
        },
    })
}

fn json_request(method: &str, uri: &str, content_type: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn header_str<'a>(response: &'a Response, name: &str) -> &'a str {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("missing header {}", name))
        .to_str()
        .unwrap()
}

async fn create(app: &Router, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/bank-accounts", "application/json", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn test_create_bank_account() {
    let app = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/bank-accounts",
            "application/json",
            json!({ "created": "2024-01-01", "balance": 100.0, "status": "ACTIVE", "customer": { "id": 7 } }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = header_str(&response, "location").to_string();
    assert_eq!(header_str(&response, "x-bankaccountapp-alert"), "bankAccountApp.bankAccount.created");

    let body = body_json(response).await;
    let id = body["id"].as_str().unwrap();
    assert_eq!(location, format!("/api/bank-accounts/{}", id));
    assert_eq!(body["created"], "2024-01-01");
    assert_eq!(body["balance"], 100.0);
    assert_eq!(body["status"], "ACTIVE");
    assert_eq!(body["customer"], json!({ "id": 7 }));
}

#[tokio::test]
async fn test_create_with_existing_id_is_rejected() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/api/bank-accounts",
            "application/json",
            json!({ "id": Uuid::now_v7(), "balance": 1.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header_str(&response, "x-bankaccountapp-error"), "error.idexists");
    assert_eq!(header_str(&response, "x-bankaccountapp-params"), "bankAccount");
    assert_eq!(header_str(&response, "content-type"), "application/problem+json");

    let body = body_json(response).await;
    assert_eq!(body["errorKey"], "idexists");
    assert_eq!(body["entityName"], "bankAccount");
}

#[tokio::test]
async fn test_update_bank_account() {
    let app = app();
    let created = create(&app, json!({ "balance": 100.0, "status": "ACTIVE" })).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/bank-accounts/{}", id),
            "application/json",
            json!({ "id": id, "balance": 5.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "x-bankaccountapp-alert"), "bankAccountApp.bankAccount.updated");
    assert_eq!(header_str(&response, "x-bankaccountapp-params"), id);
    let body = body_json(response).await;
    assert_eq!(body["balance"], 5.0);
    assert_eq!(body["status"], Value::Null);
}

#[tokio::test]
async fn test_update_id_checks() {
    let app = app();
    let created = create(&app, json!({ "balance": 1.0 })).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/bank-accounts/{}", id);

    let cases = [
        (json!({ "balance": 2.0 }), "idnull"),
        (json!({ "id": Uuid::now_v7(), "balance": 2.0 }), "idinvalid"),
    ];
    for (body, key) in cases {
        let response = app
            .clone()
            .oneshot(json_request("PUT", &uri, "application/json", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(header_str(&response, "x-bankaccountapp-error"), format!("error.{}", key));
    }

    let missing = Uuid::now_v7();
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/bank-accounts/{}", missing),
            "application/json",
            json!({ "id": missing }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header_str(&response, "x-bankaccountapp-error"), "error.idnotfound");
}

#[tokio::test]
async fn test_partial_update_with_merge_patch() {
    let app = app();
    let created = create(
        &app,
        json!({ "created": "2024-01-01", "balance": 100.0, "status": "ACTIVE" }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/bank-accounts/{}", id),
            "application/merge-patch+json",
            json!({ "id": id, "balance": 50.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["balance"], 50.0);
    assert_eq!(body["status"], "ACTIVE");
    assert_eq!(body["created"], "2024-01-01");

    let response = app
        .oneshot(empty_request("GET", &format!("/api/bank-accounts/{}", id)))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["balance"], 50.0);
    assert_eq!(body["status"], "ACTIVE");
}

#[tokio::test]
async fn test_partial_update_unknown_id() {
    let missing = Uuid::now_v7();
    let response = app()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/bank-accounts/{}", missing),
            "application/merge-patch+json",
            json!({ "id": missing, "balance": 1.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header_str(&response, "x-bankaccountapp-error"), "error.idnotfound");
}

#[tokio::test]
async fn test_list_with_pagination_headers() {
    let app = app();
    for balance in [3.0, 1.0, 2.0] {
        create(&app, json!({ "balance": balance })).await;
    }

    let response = app
        .oneshot(empty_request(
            "GET",
            "/api/bank-accounts?page=0&size=2&sort=balance,asc",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "x-total-count"), "3");
    let link = header_str(&response, "link").to_string();
    assert!(link.contains("page=1&size=2&sort=balance%2Casc>; rel=\"next\""));
    assert!(link.contains("rel=\"first\""));
    assert!(!link.contains("rel=\"prev\""));

    let body = body_json(response).await;
    let balances: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["balance"].as_f64().unwrap())
        .collect();
    assert_eq!(balances, vec![1.0, 2.0]);
}

#[tokio::test]
async fn test_list_far_past_last_page_is_empty() {
    let app = app();
    create(&app, json!({ "balance": 1.0 })).await;

    let response = app
        .oneshot(empty_request(
            "GET",
            &format!("/api/bank-accounts?page={}&size=50", u32::MAX - 1),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "x-total-count"), "1");
    let link = header_str(&response, "link").to_string();
    assert!(link.contains("page=0&size=50>; rel=\"last\""));
    assert!(!link.contains("rel=\"next\""));

    let body = body_json(response).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_rejects_unknown_sort_property() {
    let response = app()
        .oneshot(empty_request("GET", "/api/bank-accounts?sort=customer,asc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_is_404() {
    let response = app()
        .oneshot(empty_request(
            "GET",
            &format!("/api/bank-accounts/{}", Uuid::now_v7()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_400() {
    let response = app()
        .oneshot(empty_request("GET", "/api/bank-accounts/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_bank_account() {
    let app = app();
    let created = create(&app, json!({ "balance": 1.0 })).await;
    let id = created["id"].as_str().unwrap();
    let uri = format!("/api/bank-accounts/{}", id);

    let response = app.clone().oneshot(empty_request("DELETE", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(header_str(&response, "x-bankaccountapp-alert"), "bankAccountApp.bankAccount.deleted");

    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(empty_request("GET", "/management/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "UP");
    assert_eq!(body["components"][0]["name"], "store");
}

#[tokio::test]
async fn test_invalid_body_is_problem_json() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bank-accounts",
            "application/json",
            json!({ "status": "CLOSED" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header_str(&response, "content-type"), "application/problem+json");
    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert!(body["detail"].as_str().unwrap().contains("CLOSED"));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/bank-accounts")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"balance\": "))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(header_str(&response, "content-type"), "application/problem+json");
}
