//! 导航守卫
//!
//! 决策顺序：
//! 1. 目标需要认证且未认证 -> `/login`
//! 2. 目标需要管理员且角色不是 `admin` -> `/home`
//! 3. 放行

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use casebook_shared::ADMIN_ROLE;

use crate::route::AppRoute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDecision {
    Allow,
    Redirect(AppRoute),
}

pub fn decide(target: AppRoute, is_authenticated: bool, role: Option<&str>) -> NavDecision {
    if target.requires_auth() && !is_authenticated {
        return NavDecision::Redirect(AppRoute::auth_failure_redirect());
    }
    if target.requires_admin() && role != Some(ADMIN_ROLE) {
        return NavDecision::Redirect(AppRoute::forbidden_redirect());
    }
    NavDecision::Allow
}

/// 导航序号
///
/// 每次导航领取一个序号；异步守卫完成时只有最新的序号才能生效，
/// 被后续导航取代的决策直接丢弃 (其角色请求不会被中止)。
#[derive(Debug, Clone, Default)]
pub struct NavigationSequence(Arc<AtomicU64>);

impl NavigationSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_requires_login_first() {
        assert_eq!(
            decide(AppRoute::Admin, false, None),
            NavDecision::Redirect(AppRoute::Login)
        );
        // 未认证时即使缓存了 admin 角色也先去登录
        assert_eq!(
            decide(AppRoute::Admin, false, Some("admin")),
            NavDecision::Redirect(AppRoute::Login)
        );
    }

    #[test]
    fn admin_requires_admin_role() {
        assert_eq!(
            decide(AppRoute::Admin, true, Some("user")),
            NavDecision::Redirect(AppRoute::Home)
        );
        assert_eq!(
            decide(AppRoute::Admin, true, None),
            NavDecision::Redirect(AppRoute::Home)
        );
        assert_eq!(decide(AppRoute::Admin, true, Some("admin")), NavDecision::Allow);
    }

    #[test]
    fn public_routes_always_allowed() {
        for route in [
            AppRoute::Welcome,
            AppRoute::Home,
            AppRoute::Register,
            AppRoute::Login,
            AppRoute::NotFound,
        ] {
            assert_eq!(decide(route, false, None), NavDecision::Allow);
            assert_eq!(decide(route, true, Some("user")), NavDecision::Allow);
        }
    }

    #[test]
    fn only_latest_navigation_is_current() {
        let seq = NavigationSequence::new();
        let first = seq.begin();
        assert!(seq.is_current(first));

        let second = seq.clone().begin();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }
}
