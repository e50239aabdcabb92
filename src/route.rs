//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑，不依赖 DOM：定义应用的所有路由及其访问要求。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 欢迎页 (默认路由)
    #[default]
    Welcome,
    /// 案件列表
    Home,
    /// 注册
    Register,
    /// 登录
    Login,
    /// 管理页 (需要认证 + 管理员角色)
    Admin,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举，忽略结尾的 `/`
    pub fn from_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/" => Self::Welcome,
            "/home" => Self::Home,
            "/register" => Self::Register,
            "/login" => Self::Login,
            "/admin" => Self::Admin,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Welcome => "/",
            Self::Home => "/home",
            Self::Register => "/register",
            Self::Login => "/login",
            Self::Admin => "/admin",
            Self::NotFound => "/404",
        }
    }

    /// 该路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// 该路由是否需要管理员角色
    pub fn requires_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// 未认证时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 权限不足时的重定向目标
    pub fn forbidden_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Welcome);
        assert_eq!(AppRoute::from_path(""), AppRoute::Welcome);
        assert_eq!(AppRoute::from_path("/home"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/home/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/register"), AppRoute::Register);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::Admin);
        assert_eq!(AppRoute::from_path("/cases/1"), AppRoute::NotFound);
    }

    #[test]
    fn path_roundtrip_for_real_routes() {
        for route in [
            AppRoute::Welcome,
            AppRoute::Home,
            AppRoute::Register,
            AppRoute::Login,
            AppRoute::Admin,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn only_admin_is_guarded() {
        assert!(AppRoute::Admin.requires_auth());
        assert!(AppRoute::Admin.requires_admin());
        for route in [AppRoute::Welcome, AppRoute::Home, AppRoute::Register, AppRoute::Login] {
            assert!(!route.requires_auth());
            assert!(!route.requires_admin());
        }
    }
}
