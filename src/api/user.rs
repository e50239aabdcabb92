use casebook_shared::protocol::{DashboardRequest, LoginRequest, RegisterRequest};
use casebook_shared::{Credentials, LoginResponse, MessageResponse, NewUser, UserProfile};

use super::ApiClient;
use crate::error::{ApiError, ApiResult};

/// 注册、登录、登出与当前用户资料
#[derive(Clone)]
pub struct UserApi {
    client: ApiClient,
}

impl UserApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn register_user(&self, user: NewUser) -> ApiResult<MessageResponse> {
        self.client.execute(&RegisterRequest { user }).await
    }

    /// 登录；响应中带有非空 `token` 时将其持久化
    pub async fn login_user(&self, login: &str, password: &str) -> ApiResult<LoginResponse> {
        let req = LoginRequest {
            credentials: Credentials {
                login: login.to_string(),
                password: password.to_string(),
            },
        };
        let res = self.client.execute(&req).await?;

        match res.token.as_deref() {
            Some(token) if !token.is_empty() => {
                self.client.store_token(token);
                log::info!("logged in as {login}");
            }
            _ => log::warn!("login response for {login} carried no token"),
        }
        Ok(res)
    }

    /// 只删除本地 token：不通知服务端，也不清理已缓存的角色
    pub fn logout_user(&self) {
        self.client.clear_token();
        log::info!("logged out");
    }

    /// 获取当前用户资料；没有 token 时直接失败，不发出请求
    pub async fn get_user_data(&self) -> ApiResult<UserProfile> {
        if self.client.token().is_none() {
            return Err(ApiError::missing_token());
        }
        self.client.execute(&DashboardRequest).await
    }
}
