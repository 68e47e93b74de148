use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use company_registry::config::EnvironmentConfig;
use company_registry::models::company::{Company, CompanyPayload};
use company_registry::repositories::{CompanyStore, InMemoryCompanyRepository};
use company_registry::utils::errors::AppResult;
use company_registry::{create_app, AppState};

// Función helper para crear la app de test sobre el store en memoria
fn create_test_app() -> (Router, InMemoryCompanyRepository) {
    let store = InMemoryCompanyRepository::new();
    let state = AppState::new(Arc::new(store.clone()), EnvironmentConfig::default());
    (create_app(state), store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn company(cr: &str, name_en: &str) -> Value {
    json!({
        "crNumber": cr,
        "companyNameEn": name_en,
        "companyNameAr": "أ",
        "phoneNumber": "0500000000",
        "licenseStartDate": "2024-01-01",
        "classification": "Less than 3 million SAR"
    })
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = create_test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_save_on_empty_store_creates() {
    let (app, _) = create_test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/company/save",
        Some(company("1111111111", "A")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["message"], "Company created successfully");
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
    assert_eq!(body["data"]["crNumber"], "1111111111");
    assert_eq!(body["data"]["companyNameAr"], "أ");
    assert_eq!(body["data"]["licenseStartDate"], "2024-01-01");
    assert_eq!(body["data"]["createdAt"], body["data"]["updatedAt"]);
}

#[tokio::test]
async fn test_save_existing_cr_updates() {
    let (app, store) = create_test_app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/company/save",
        Some(company("1111111111", "A")),
    )
    .await;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let mut changed = company("1111111111", "A Renamed");
    changed["classification"] = json!("More than 3 million SAR");
    let (status, body) = send(&app, Method::POST, "/api/company/save", Some(changed)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["message"], "Company updated successfully");
    assert_eq!(body["data"]["id"], created["data"]["id"]);
    assert_eq!(body["data"]["createdAt"], created["data"]["createdAt"]);
    assert_ne!(body["data"]["updatedAt"], created["data"]["updatedAt"]);
    assert_eq!(body["data"]["companyNameEn"], "A Renamed");
    assert_eq!(body["data"]["classification"], "More than 3 million SAR");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_save_validation_errors() {
    let (app, store) = create_test_app();
    let mut bad = company("12345", "A");
    bad["phoneNumber"] = json!("05");
    let (status, body) = send(&app, Method::POST, "/api/company/save", Some(bad)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["message"], "Invalid input data");
    let errors: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect();
    assert!(errors.contains(&"CR Number must be exactly 10 digits"));
    assert!(errors.contains(&"Phone number must be exactly 10 digits"));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_save_malformed_json_is_bad_request() {
    let (app, _) = create_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/company/save")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_found_and_not_found() {
    let (app, _) = create_test_app();
    send(
        &app,
        Method::POST,
        "/api/company/save",
        Some(company("1234567890", "Saudi Medical Insurance Company")),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/company/search",
        Some(json!({ "crNumber": "1234567890" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Company found successfully");
    assert_eq!(body["data"]["companyNameEn"], "Saudi Medical Insurance Company");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/company/search",
        Some(json!({ "crNumber": "0000000000" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["message"], "Company with CR Number 0000000000 not found");
}

#[tokio::test]
async fn test_search_malformed_cr_is_bad_request() {
    let (app, _) = create_test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/company/search",
        Some(json!({ "crNumber": "12-3456789" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0], "CR Number must be exactly 10 digits");
}

#[tokio::test]
async fn test_head_exists() {
    let (app, _) = create_test_app();
    send(
        &app,
        Method::POST,
        "/api/company/save",
        Some(company("1234567890", "A")),
    )
    .await;

    let (status, _) = send(&app, Method::HEAD, "/api/company/1234567890", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::HEAD, "/api/company/0000000000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::HEAD, "/api/company/12345", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_sorted_and_paginated() {
    let (app, _) = create_test_app();
    for (i, name) in ["Delta", "Alpha", "Charlie", "Bravo"].iter().enumerate() {
        send(
            &app,
            Method::POST,
            "/api/company/save",
            Some(company(&format!("100000000{}", i), name)),
        )
        .await;
    }

    let (status, body) = send(&app, Method::GET, "/api/company?pageNumber=1&pageSize=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Companies retrieved successfully");
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["companyNameEn"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alpha", "Bravo", "Charlie", "Delta"]);

    let (_, body) = send(&app, Method::GET, "/api/company?pageNumber=2&pageSize=3", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["companyNameEn"], "Delta");

    let (status, body) = send(&app, Method::GET, "/api/company", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_list_empty_store() {
    let (app, _) = create_test_app();
    let (status, body) = send(&app, Method::GET, "/api/company?pageNumber=1&pageSize=10", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_list_rejects_bad_pagination() {
    let (app, _) = create_test_app();
    for uri in [
        "/api/company?pageNumber=1&pageSize=0",
        "/api/company?pageNumber=1&pageSize=101",
        "/api/company?pageNumber=0&pageSize=10",
        "/api/company?pageNumber=-1&pageSize=10",
        "/api/company?pageNumber=abc",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {}", uri);
        assert_eq!(body["success"], false);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid pagination parameters"));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_same_cr_create_one_record() {
    let (app, store) = create_test_app();

    let requests = (0..6).map(|i| {
        let app = app.clone();
        async move {
            send(
                &app,
                Method::POST,
                "/api/company/save",
                Some(company("7777777777", &format!("Racer {}", i))),
            )
            .await
            .0
        }
    });
    let statuses = futures::future::join_all(requests).await;

    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CREATED).count(),
        1
    );
    assert!(statuses
        .iter()
        .all(|s| [StatusCode::CREATED, StatusCode::OK, StatusCode::CONFLICT].contains(s)));
    assert_eq!(store.len().await, 1);
}

// Store en memoria cuyas lecturas esperan a que ambos requests las completen
struct LockstepStore {
    inner: InMemoryCompanyRepository,
    barrier: tokio::sync::Barrier,
}

#[async_trait::async_trait]
impl CompanyStore for LockstepStore {
    async fn find_by_cr(&self, cr_number: &str) -> AppResult<Option<Company>> {
        let found = self.inner.find_by_cr(cr_number).await;
        self.barrier.wait().await;
        found
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Company>> {
        self.inner.find_by_id(id).await
    }

    async fn exists_by_cr(&self, cr_number: &str) -> AppResult<bool> {
        let exists = self.inner.exists_by_cr(cr_number).await;
        self.barrier.wait().await;
        exists
    }

    async fn insert(&self, payload: &CompanyPayload) -> AppResult<Company> {
        self.inner.insert(payload).await
    }

    async fn update(&self, id: i32, payload: &CompanyPayload) -> AppResult<Option<Company>> {
        self.inner.update(id, payload).await
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<Vec<Company>> {
        self.inner.list(offset, limit).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_racing_saves_return_created_and_conflict() {
    let inner = InMemoryCompanyRepository::new();
    let store = LockstepStore {
        inner: inner.clone(),
        barrier: tokio::sync::Barrier::new(2),
    };
    let app = create_app(AppState::new(Arc::new(store), EnvironmentConfig::default()));

    let requests = (0..2).map(|i| {
        let app = app.clone();
        tokio::spawn(async move {
            send(
                &app,
                Method::POST,
                "/api/company/save",
                Some(company("8888888888", &format!("Racer {}", i))),
            )
            .await
        })
    });
    let responses: Vec<(StatusCode, Value)> = futures::future::join_all(requests)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let mut statuses: Vec<u16> = responses.iter().map(|(s, _)| s.as_u16()).collect();
    statuses.sort_unstable();
    assert_eq!(statuses, vec![201, 409]);

    let (_, conflict) = responses
        .iter()
        .find(|(s, _)| *s == StatusCode::CONFLICT)
        .unwrap();
    assert_eq!(conflict["success"], false);
    assert_eq!(
        conflict["message"],
        "CR number 8888888888 already in use by another record"
    );
    assert_eq!(inner.len().await, 1);
}
