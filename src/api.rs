//! API 客户端
//!
//! `ApiClient` 负责拼接 URL、附加 JSON 头与 Bearer token、把非 2xx 响应转成 `ApiError`；
//! `CaseApi` / `UserApi` 在其上为每个接口提供一个方法。

use std::sync::Arc;

use casebook_shared::protocol::{ApiRequest, HttpMethod};
use casebook_shared::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::storage::KeyValueStore;

mod case;
mod user;

pub use case::CaseApi;
pub use user::UserApi;

/// HTTP 客户端包装
///
/// 克隆开销很小：传输层与存储都是共享的。
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http: Arc<dyn HttpClient>,
    store: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            config,
            http,
            store,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    // --- token ---

    /// 当前持久化的 token，空字符串视为不存在
    pub fn token(&self) -> Option<String> {
        self.store
            .get(&self.config.token_key)
            .filter(|t| !t.is_empty())
    }

    pub fn store_token(&self, token: &str) {
        if !self.store.set(&self.config.token_key, token) {
            log::warn!("failed to persist session token");
        }
    }

    pub fn clear_token(&self) {
        if !self.store.remove(&self.config.token_key) {
            log::warn!("failed to remove session token");
        }
    }

    // --- 请求 ---

    /// 发送一个类型化的接口请求并解析响应体
    pub async fn execute<R: ApiRequest>(&self, request: &R) -> ApiResult<R::Response> {
        let response = self
            .send(R::METHOD, &request.path(), request.body())
            .await?;
        response.json::<R::Response>().map_err(ApiError::decode)
    }

    /// 发送一次请求，非 2xx 视为失败
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<HttpResponse> {
        let url = self.config.url(path);
        let mut req = HttpRequest::new(&url, method)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);

        if let Some(token) = self.token() {
            req = req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {token}"));
        }
        if let Some(body) = body {
            req = req.with_body(body);
        }

        log::debug!("{} {}", method.as_str(), url);

        let response = self.http.send(req).await.map_err(ApiError::unreachable)?;

        if !response.is_success() {
            log::debug!("{} {} -> {}", method.as_str(), url, response.status);
            return Err(ApiError::from_response(&response));
        }
        Ok(response)
    }
}
