use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

pub use casebook_shared::protocol::HttpMethod;

#[cfg(test)]
use std::sync::Mutex;

use crate::error::TransportError;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 2xx 视为成功
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// 传输层：每次调用只发出一次请求，不重试、不设超时。
///
/// 浏览器端用 fetch 实现，原生端用 reqwest 实现，测试用 `MockHttpClient`。
#[async_trait(?Send)]
pub trait HttpClient: Send + Sync {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // URL -> (Status, Response Body)，None 表示网络失败
    responses: Mutex<HashMap<String, Option<(u16, String)>>>,
    // 记录发出的请求
    requests: Mutex<Vec<HttpRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn mock_response(&self, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Some((status, body.to_string())));
    }

    pub fn mock_raw_response(&self, url: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Some((status, body.to_string())));
    }

    pub fn mock_network_failure(&self, url: &str) {
        self.responses.lock().unwrap().insert(url.to_string(), None);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[cfg(test)]
#[async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(req.clone());
        // 让出一次执行权，模拟真实请求的在途状态
        tokio::task::yield_now().await;

        let responses = self.responses.lock().unwrap();
        match responses.get(&req.url) {
            Some(Some((status, body))) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(None) => Err(TransportError::Network("connection refused".to_string())),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}
