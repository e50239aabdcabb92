//! 认证模块
//!
//! 会话 (token + 角色缓存) 由核心库的 `Session` 持有，这里只把它的
//! 快照暴露成信号，供导航栏和路由服务读取。

use casebook::{ApiResult, Session};
use casebook_shared::{ADMIN_ROLE, LoginResponse, MessageResponse, NewUser};
use leptos::prelude::*;

/// 认证状态快照
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    /// 本地存在 token
    pub is_authenticated: bool,
    /// 已缓存的角色
    pub role: Option<String>,
}

impl AuthState {
    fn capture(session: &Session) -> Self {
        Self {
            is_authenticated: session.is_authenticated(),
            role: session.role(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: StoredValue<Session>,
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new(session: Session) -> Self {
        let (state, set_state) = signal(AuthState::capture(&session));
        Self {
            session: StoredValue::new(session),
            state,
            set_state,
        }
    }

    pub fn session(&self) -> Session {
        self.session.get_value()
    }

    /// 重新读取会话状态，有变化才通知
    pub fn sync(&self) {
        let next = self.session.with_value(AuthState::capture);
        if self.state.with_untracked(|current| *current != next) {
            self.set_state.set(next);
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_authenticated))
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 注册新用户，成功后需要用户再登录
pub async fn register(ctx: &AuthContext, user: NewUser) -> ApiResult<MessageResponse> {
    ctx.session().register(user).await
}

/// 登录；token 由核心库持久化，这里同步状态
///
/// 导航由路由服务的认证状态监听处理。
pub async fn login(ctx: &AuthContext, login: String, password: String) -> ApiResult<LoginResponse> {
    let result = ctx.session().login(&login, &password).await;
    ctx.sync();
    result
}

/// 注销：只删除 token，角色缓存保留
pub fn logout(ctx: &AuthContext) {
    ctx.session.with_value(Session::logout);
    ctx.sync();
}
