use casebook_shared::Envelope;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::request::HttpResponse;

pub const SERVER_NOT_RESPONDING: &str = "Server is not responding";
pub const TOKEN_MISSING: &str = "Token is missing";

// =========================================================
// 传输层错误
// =========================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// 请求构建失败
    #[error("failed to build request: {0}")]
    RequestBuild(String),
    /// 网络请求失败
    #[error("network error: {0}")]
    Network(String),
    /// 响应体读取失败
    #[error("failed to read response: {0}")]
    ResponseRead(String),
}

// =========================================================
// API 错误
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 本地没有 token，请求未发出
    MissingToken,
    /// 服务端返回了非 2xx
    Server,
    /// 服务端无响应 (网络失败)
    Unreachable,
    /// 2xx 但响应体不符合预期
    Decode,
}

/// 所有 API 调用的统一错误
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// 服务端返回的状态码 (仅 `Server`)
    pub status: Option<u16>,
    pub message: String,
    /// 服务端返回的响应体 (仅 `Server`)
    pub data: Option<Value>,
}

impl ApiError {
    pub fn missing_token() -> Self {
        Self {
            kind: ApiErrorKind::MissingToken,
            status: None,
            message: TOKEN_MISSING.to_string(),
            data: None,
        }
    }

    pub fn unreachable(source: TransportError) -> Self {
        log::debug!("transport failure: {source}");
        Self {
            kind: ApiErrorKind::Unreachable,
            status: None,
            message: SERVER_NOT_RESPONDING.to_string(),
            data: None,
        }
    }

    pub fn decode(source: serde_json::Error) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            status: None,
            message: format!("unexpected response body: {source}"),
            data: None,
        }
    }

    /// 由非 2xx 响应构造：响应体作为 data，其中的 `message` 字段作为消息
    pub fn from_response(response: &HttpResponse) -> Self {
        let data = if response.body.trim().is_empty() {
            None
        } else {
            Some(
                serde_json::from_str::<Value>(&response.body)
                    .unwrap_or_else(|_| Value::String(response.body.clone())),
            )
        };

        let message = data
            .as_ref()
            .and_then(|d| d.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("request failed with status {}", response.status));

        Self {
            kind: ApiErrorKind::Server,
            status: Some(response.status),
            message,
            data,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::MissingToken || self.status == Some(401)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// =========================================================
// 兼容信封转换
// =========================================================

impl From<ApiError> for Envelope {
    fn from(e: ApiError) -> Self {
        match e.kind {
            ApiErrorKind::Server => Envelope::failure_data(e.data.unwrap_or(Value::Null)),
            _ => Envelope::failure_message(e.message),
        }
    }
}

/// 把结果折叠为 `{success, data|message}` 信封
pub fn into_envelope<T: Serialize>(result: ApiResult<T>) -> Envelope {
    match result {
        Ok(value) => match serde_json::to_value(value) {
            Ok(data) => Envelope::success(data),
            Err(e) => Envelope::failure_message(e.to_string()),
        },
        Err(e) => e.into(),
    }
}
