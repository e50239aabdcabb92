//! Casebook 客户端核心
//!
//! 与平台无关的部分：
//! - `request`: 传输层抽象 (`HttpClient`)
//! - `api`: HTTP 包装与案件 / 用户接口
//! - `storage`: 持久化键值存储抽象
//! - `session` / `guard` / `route`: 会话、角色缓存与导航守卫
//! - `theme`: 主题持久化
//!
//! 浏览器端的 fetch / LocalStorage 实现在 `frontend` 中，原生端使用 `native::ReqwestHttpClient`。

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod request;
pub mod route;
pub mod session;
pub mod storage;
pub mod theme;

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

pub use api::{ApiClient, CaseApi, UserApi};
pub use config::ClientConfig;
pub use error::{ApiError, ApiErrorKind, ApiResult, TransportError, into_envelope};
pub use guard::{NavDecision, NavigationSequence};
pub use request::{HttpClient, HttpRequest, HttpResponse};
pub use route::AppRoute;
pub use session::Session;
pub use storage::{KeyValueStore, MemoryStore};
pub use theme::{ThemeMode, ThemeStore};

// =========================================================
// 组装
// =========================================================

/// 共享同一传输层与存储的一组客户端
#[derive(Clone)]
pub struct Clients {
    pub cases: CaseApi,
    pub session: Session,
    pub theme: ThemeStore,
}

impl Clients {
    pub fn connect(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let theme = ThemeStore::new(store.clone(), &config.theme_key);
        let client = ApiClient::new(config, http, store);

        Self {
            cases: CaseApi::new(client.clone()),
            session: Session::new(client),
            theme,
        }
    }
}
