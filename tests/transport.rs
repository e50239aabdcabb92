//! 原生传输层端到端测试：本地 axum 服务 + reqwest 客户端

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use casebook::native::ReqwestHttpClient;
use casebook::{
    ApiErrorKind, AppRoute, ClientConfig, Clients, KeyValueStore, MemoryStore, NavDecision,
};
use serde_json::{Value, json};

const TOKEN: &str = "tok-e2e";

// =========================================================
// 模拟服务端
// =========================================================

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn authorized(headers: &HeaderMap) -> bool {
    bearer(headers).as_deref() == Some(&format!("Bearer {TOKEN}"))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] == "pw" {
        (StatusCode::OK, Json(json!({ "token": TOKEN, "login": body["login"] })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid credentials" })),
        )
    }
}

async fn dashboard(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if authorized(&headers) {
        (StatusCode::OK, Json(json!({ "role": "admin", "login": "root" })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthorized" })))
    }
}

async fn all_cases(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if authorized(&headers) {
        (
            StatusCode::OK,
            Json(json!({ "cases": [{ "_id": "1", "title": "State v. Doe" }] })),
        )
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthorized" })))
    }
}

async fn one_case(Path(id): Path<String>) -> Json<Value> {
    Json(json!({ "selectedCase": { "_id": id, "title": "Echo" } }))
}

async fn search(Query(params): Query<std::collections::HashMap<String, String>>) -> Json<Value> {
    let q = params.get("q").cloned().unwrap_or_default();
    Json(json!({ "success": true, "cases": [{ "_id": "s", "title": q }] }))
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/users/login", post(login))
        .route("/users/dashboard", get(dashboard))
        .route("/cases/all", get(all_cases))
        .route("/cases/case/{id}", get(one_case))
        .route("/cases/search", get(search));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

// =========================================================
// 辅助函数
// =========================================================

fn connect(base_url: &str, store: Arc<MemoryStore>) -> Clients {
    Clients::connect(
        ClientConfig::new(base_url),
        Arc::new(ReqwestHttpClient::new()),
        store,
    )
}

// =========================================================
// 认证头测试
// =========================================================

#[tokio::test]
async fn test_bearer_header_follows_login_and_logout() {
    let addr = spawn_server().await;
    let store = Arc::new(MemoryStore::new());
    let clients = connect(&format!("http://{addr}"), store.clone());

    let err = clients.cases.get_case_list().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Server);
    assert_eq!(err.status, Some(401));
    assert_eq!(err.message, "Unauthorized");

    clients.session.login("root", "pw").await.unwrap();
    assert_eq!(store.get("token").as_deref(), Some(TOKEN));

    let cases = clients.cases.get_case_list().await.unwrap();
    assert_eq!(cases[0].title, "State v. Doe");

    assert_eq!(
        clients.session.check_navigation(AppRoute::Admin).await,
        NavDecision::Allow
    );

    clients.session.logout();
    let err = clients.cases.get_case_list().await.unwrap_err();
    assert_eq!(err.status, Some(401));

    let err = clients.session.users().get_user_data().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::MissingToken);
}

#[tokio::test]
async fn test_rejected_login_surfaces_server_message() {
    let addr = spawn_server().await;
    let store = Arc::new(MemoryStore::new());
    let clients = connect(&format!("http://{addr}/"), store.clone());

    let err = clients.session.login("root", "wrong").await.unwrap_err();

    assert_eq!(err.message, "Invalid credentials");
    assert_eq!(err.data.unwrap()["success"], json!(false));
    assert_eq!(store.get("token"), None);
}

// =========================================================
// 案件接口测试
// =========================================================

#[tokio::test]
async fn test_search_query_reaches_server_decoded() {
    let addr = spawn_server().await;
    let clients = connect(&format!("http://{addr}"), Arc::new(MemoryStore::new()));

    let found = clients.cases.search_cases("fraud & co/2024").await.unwrap();
    assert_eq!(found.cases[0].title, "fraud & co/2024");

    let case = clients.cases.get_case_by_id("abc123").await.unwrap();
    assert_eq!(case.map(|c| c.id).as_deref(), Some("abc123"));
}

// =========================================================
// 网络失败测试
// =========================================================

#[tokio::test]
async fn test_unreachable_server() {
    // discard 端口上没有服务
    let inner = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let clients = Clients::connect(
        ClientConfig::new("http://127.0.0.1:9"),
        Arc::new(ReqwestHttpClient::with_client(inner)),
        Arc::new(MemoryStore::new()),
    );

    let err = clients.cases.get_case_list().await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Unreachable);
    assert_eq!(err.message, "Server is not responding");
    assert!(!err.is_unauthorized());
}
