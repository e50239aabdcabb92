//! Casebook 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `web::router`: 路由服务（History API + 异步守卫）
//! - `auth`: 认证状态快照
//! - `theme`: 主题上下文
//! - `components`: UI 组件层
//!
//! 接口、会话与守卫策略都在核心库 `casebook` 中，这里只提供浏览器端实现。

mod api;
mod auth;
mod components {
    pub mod admin;
    mod case_form;
    pub mod home;
    pub mod login;
    pub mod nav;
    pub mod register;
    pub mod welcome;
}
mod theme;

use std::sync::Arc;

use casebook::{AppRoute, ClientConfig, Clients};
use leptos::prelude::*;

use crate::auth::AuthContext;
use crate::components::admin::AdminPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::nav::NavBar;
use crate::components::register::RegisterPage;
use crate::components::welcome::WelcomePage;
use crate::theme::ThemeProvider;

// 原生 Web API 封装模块
// 对 fetch / LocalStorage / History / console 的轻量级封装
pub(crate) mod web {
    pub mod console;
    pub mod document;
    mod http;
    pub mod router;
    mod storage;

    pub use http::FetchHttpClient;
    pub use storage::LocalStorage;
}

use web::router::{Router, RouterOutlet};
use web::{FetchHttpClient, LocalStorage};

/// 安装浏览器控制台日志
pub fn init_logging() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    web::console::init(level);
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Welcome => view! { <WelcomePage /> }.into_any(),
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Admin => view! { <AdminPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[70vh]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 组装核心客户端：fetch 传输 + LocalStorage
    let config = ClientConfig::from_build_env();
    log::info!("API base: {}", config.base_url);
    let clients = Clients::connect(config, Arc::new(FetchHttpClient), Arc::new(LocalStorage));

    // 2. 认证上下文与案件接口
    let auth_ctx = AuthContext::new(clients.session.clone());
    provide_context(auth_ctx);
    provide_context(clients.cases.clone());

    // 3. 认证状态信号注入路由服务；每次导航落地后同步角色等状态
    let is_authenticated = auth_ctx.is_authenticated_signal();
    let on_navigated = move |_route: AppRoute| auth_ctx.sync();

    view! {
        <ThemeProvider store=clients.theme>
            <Router session=clients.session is_authenticated=is_authenticated on_navigated=on_navigated>
                <div class="min-h-screen bg-base-200 font-sans">
                    <NavBar />
                    <RouterOutlet matcher=route_matcher />
                </div>
            </Router>
        </ThemeProvider>
    }
}
