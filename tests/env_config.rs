//! 运行时环境变量配置
//!
//! 单独的测试二进制：只有这里修改进程环境变量。

use std::sync::Arc;

use axum::routing::post;
use axum::{Json, Router};
use casebook::config::{BASE_URL_VAR, THEME_KEY_VAR, TOKEN_KEY_VAR};
use casebook::native::ReqwestHttpClient;
use casebook::{ClientConfig, Clients, KeyValueStore, MemoryStore, ThemeMode};
use serde_json::{Value, json};

async fn login() -> Json<Value> {
    Json(json!({ "token": "tok-env" }))
}

#[tokio::test]
async fn test_from_env_overrides_base_url_and_keys() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // SAFETY: 本二进制只有这一个测试，写入时没有其它线程读取环境变量
    unsafe {
        std::env::set_var(BASE_URL_VAR, format!("http://{addr}/"));
        std::env::set_var(TOKEN_KEY_VAR, "casebook_token");
        std::env::set_var(THEME_KEY_VAR, " ");
    }

    let config = ClientConfig::from_env();
    assert_eq!(config.base_url, format!("http://{addr}"));
    assert_eq!(config.token_key, "casebook_token");
    assert_eq!(config.theme_key, "theme");

    let app = Router::new().route("/users/login", post(login));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let store = Arc::new(MemoryStore::new());
    let clients = Clients::connect(config, Arc::new(ReqwestHttpClient::new()), store.clone());

    clients.session.login("ann", "pw").await.unwrap();
    assert_eq!(store.get("casebook_token").as_deref(), Some("tok-env"));
    assert_eq!(store.get("token"), None);

    clients.theme.persist(ThemeMode::Dark);
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
}
