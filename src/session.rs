//! 会话
//!
//! 持有用户 API 与角色缓存，显式传给路由服务。
//! 角色在第一次导航检查 (或显式调用 `resolve_role`) 时惰性获取，
//! 获取失败只记日志，角色保持未解析，守卫按“非管理员”处理。

use std::sync::{Arc, PoisonError, RwLock};

use casebook_shared::{ADMIN_ROLE, LoginResponse, MessageResponse, NewUser};

use crate::api::{ApiClient, UserApi};
use crate::error::ApiResult;
use crate::guard::{NavDecision, decide};
use crate::route::AppRoute;

#[derive(Clone)]
pub struct Session {
    users: UserApi,
    role: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new(client: ApiClient) -> Self {
        Self {
            users: UserApi::new(client),
            role: Arc::new(RwLock::new(None)),
        }
    }

    pub fn users(&self) -> &UserApi {
        &self.users
    }

    /// 本地存在 token 即视为已认证
    pub fn is_authenticated(&self) -> bool {
        self.users.client().token().is_some()
    }

    /// 已缓存的角色
    pub fn role(&self) -> Option<String> {
        self.role
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_admin(&self) -> bool {
        self.role().as_deref() == Some(ADMIN_ROLE)
    }

    fn set_role(&self, role: Option<String>) {
        *self.role.write().unwrap_or_else(PoisonError::into_inner) = role;
    }

    /// 请求一次用户资料并缓存其中的角色
    pub async fn resolve_role(&self) -> Option<String> {
        match self.users.get_user_data().await {
            Ok(profile) => {
                if profile.role.is_some() {
                    self.set_role(profile.role);
                }
            }
            Err(e) if e.is_unauthorized() => {
                log::info!("no valid session, role left unresolved: {e}")
            }
            Err(e) => log::warn!("failed to resolve user role: {e}"),
        }
        self.role()
    }

    /// 角色未缓存时才发请求
    pub async fn ensure_role(&self) -> Option<String> {
        match self.role() {
            Some(role) => Some(role),
            None => self.resolve_role().await,
        }
    }

    /// 守卫：等待角色解析完成后给出导航决策
    pub async fn check_navigation(&self, target: AppRoute) -> NavDecision {
        let is_authenticated = self.is_authenticated();
        let role = self.ensure_role().await;
        decide(target, is_authenticated, role.as_deref())
    }

    // --- 认证操作 ---

    pub async fn register(&self, user: NewUser) -> ApiResult<MessageResponse> {
        self.users.register_user(user).await
    }

    pub async fn login(&self, login: &str, password: &str) -> ApiResult<LoginResponse> {
        self.users.login_user(login, password).await
    }

    /// 只删除 token，角色缓存保持不变
    pub fn logout(&self) {
        self.users.logout_user();
    }
}

#[cfg(test)]
mod tests;
