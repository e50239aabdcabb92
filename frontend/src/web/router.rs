//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 每次导航都走“请求 -> 守卫(异步解析角色) -> 写 History -> 加载”的流程；
//! 守卫等待期间若有更新的导航开始，旧导航的结果直接丢弃。

use casebook::{AppRoute, NavDecision, NavigationSequence, Session};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 导航写 History 的方式，由触发源决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    /// 链接点击 / 编程式导航
    Push,
    /// popstate 与首次加载
    Replace,
}

impl HistoryMode {
    fn write(self, path: &str) {
        match self {
            Self::Push => push_history_state(path),
            Self::Replace => replace_history_state(path),
        }
    }
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；会话 (角色缓存) 由外部注入。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 第一次守卫决策完成之前为 false
    ready: RwSignal<bool>,
    /// 会话：提供认证状态与角色
    session: StoredValue<Session>,
    sequence: StoredValue<NavigationSequence>,
    /// 每次导航落地后回调
    on_navigated: Callback<AppRoute>,
}

impl RouterService {
    fn new(session: Session, on_navigated: Callback<AppRoute>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            ready: RwSignal::new(false),
            session: StoredValue::new(session),
            sequence: StoredValue::new(NavigationSequence::new()),
            on_navigated,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    /// 编程式导航
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), HistoryMode::Push);
    }

    /// **核心方法：导航与守卫**
    ///
    /// 守卫是异步的 (可能需要请求用户角色)，决策在任务中落地。
    fn navigate_to_route(&self, target: AppRoute, mode: HistoryMode) {
        let router = *self;
        let ticket = self.sequence.with_value(|s| s.begin());
        let session = self.session.get_value();

        spawn_local(async move {
            let decision = session.check_navigation(target).await;

            if !router.sequence.with_value(|s| s.is_current(ticket)) {
                log::debug!("[Router] Navigation to {target} superseded, dropping decision.");
                return;
            }

            let route = match decision {
                NavDecision::Allow => target,
                NavDecision::Redirect(redirect) => {
                    log::info!("[Router] Access to {target} denied. Redirecting to {redirect}.");
                    redirect
                }
            };
            router.commit(route, mode);
        });
    }

    /// 写 History 并更新 UI
    fn commit(&self, route: AppRoute, mode: HistoryMode) {
        mode.write(route.to_path());
        self.set_route.set(route);
        self.ready.set(true);
        self.on_navigated.run(route);
    }

    /// 首次加载：当前 URL 同样经过守卫
    fn init_current(&self) {
        let route = AppRoute::from_path(&current_path());
        self.navigate_to_route(route, HistoryMode::Replace);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate 时也执行守卫逻辑
            let target = AppRoute::from_path(&current_path());
            router.navigate_to_route(target, HistoryMode::Replace);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时，受保护的当前页面重新执行守卫
    fn setup_auth_redirect(&self, is_authenticated: Signal<bool>) {
        let router = *self;

        Effect::new(move |previous: Option<bool>| {
            let is_auth = is_authenticated.get();
            let route = router.current_route.get_untracked();
            if previous.is_some_and(|prev| prev != is_auth) && route.requires_auth() {
                log::info!("[Router] Auth state changed, re-checking {route}.");
                router.navigate_to_route(route, HistoryMode::Replace);
            }
            is_auth
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(
    session: Session,
    is_authenticated: Signal<bool>,
    on_navigated: Callback<AppRoute>,
) -> RouterService {
    let router = RouterService::new(session, on_navigated);

    router.init_popstate_listener();
    router.setup_auth_redirect(is_authenticated);
    router.init_current();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 会话 (守卫用)
    session: Session,
    /// 认证状态信号，变化时重新执行守卫
    is_authenticated: Signal<bool>,
    /// 导航落地后的回调
    #[prop(into)]
    on_navigated: Callback<AppRoute>,
    children: Children,
) -> impl IntoView {
    provide_router(session, is_authenticated, on_navigated);

    children()
}

/// 路由出口组件
///
/// 第一次守卫决策完成前显示加载状态，之后渲染当前路由。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        if router.is_ready() {
            matcher(router.current_route().get())
        } else {
            view! {
                <div class="flex items-center justify-center min-h-screen">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any()
        }
    }
}

/// 经过路由守卫的链接
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
