//! 原生传输层 (reqwest)

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::{HttpClient, HttpMethod, HttpRequest, HttpResponse};

#[derive(Clone, Default)]
pub struct ReqwestHttpClient {
    inner: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

fn reqwest_method(m: HttpMethod) -> reqwest::Method {
    match m {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait(?Send)]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.inner.request(reqwest_method(req.method), req.url.as_str());
        for (k, v) in &req.headers {
            builder = builder.header(k.as_str(), v.as_str());
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::ResponseRead(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
