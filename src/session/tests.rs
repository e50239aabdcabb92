use super::*;
use crate::config::ClientConfig;
use crate::request::MockHttpClient;
use crate::storage::{KeyValueStore, MemoryStore};
use serde_json::json;

const DASHBOARD: &str = "http://localhost:3000/users/dashboard";

// =========================================================
// 辅助函数
// =========================================================

struct TestContext {
    http: Arc<MockHttpClient>,
    store: Arc<MemoryStore>,
    session: Session,
}

impl TestContext {
    fn new() -> Self {
        let http = Arc::new(MockHttpClient::new());
        let store = Arc::new(MemoryStore::new());
        let client = ApiClient::new(ClientConfig::default(), http.clone(), store.clone());
        Self {
            http,
            store,
            session: Session::new(client),
        }
    }

    fn logged_in_as(role: &str) -> Self {
        let ctx = Self::new();
        ctx.store.set("token", "tok");
        ctx.http.mock_response(DASHBOARD, 200, json!({ "role": role }));
        ctx
    }

    fn dashboard_calls(&self) -> usize {
        self.http
            .requests()
            .iter()
            .filter(|r| r.url == DASHBOARD)
            .count()
    }
}

// =========================================================
// 守卫测试
// =========================================================

#[tokio::test]
async fn test_admin_unauthenticated_redirects_to_login() {
    let ctx = TestContext::new();

    let decision = ctx.session.check_navigation(AppRoute::Admin).await;

    assert_eq!(decision, NavDecision::Redirect(AppRoute::Login));
    // 没有 token：角色查询在本地失败，不发请求
    assert_eq!(ctx.http.request_count(), 0);
}

#[tokio::test]
async fn test_admin_with_user_role_redirects_home() {
    let ctx = TestContext::logged_in_as("user");

    let decision = ctx.session.check_navigation(AppRoute::Admin).await;

    assert_eq!(decision, NavDecision::Redirect(AppRoute::Home));
    assert_eq!(ctx.session.role().as_deref(), Some("user"));
}

#[tokio::test]
async fn test_admin_with_admin_role_proceeds() {
    let ctx = TestContext::logged_in_as("admin");

    let decision = ctx.session.check_navigation(AppRoute::Admin).await;

    assert_eq!(decision, NavDecision::Allow);
    assert!(ctx.session.is_admin());
}

#[tokio::test]
async fn test_home_without_token_proceeds() {
    let ctx = TestContext::new();

    assert_eq!(
        ctx.session.check_navigation(AppRoute::Home).await,
        NavDecision::Allow
    );
    assert!(!ctx.session.is_authenticated());
}

#[tokio::test]
async fn test_role_fetch_failure_is_not_fatal() {
    let ctx = TestContext::new();
    ctx.store.set("token", "expired");
    ctx.http
        .mock_response(DASHBOARD, 401, json!({ "message": "jwt expired" }));

    let decision = ctx.session.check_navigation(AppRoute::Admin).await;

    assert_eq!(decision, NavDecision::Redirect(AppRoute::Home));
    assert_eq!(ctx.session.role(), None);
    assert_eq!(
        ctx.session.check_navigation(AppRoute::Welcome).await,
        NavDecision::Allow
    );
}

#[tokio::test]
async fn test_network_failure_during_role_fetch_degrades() {
    let ctx = TestContext::new();
    ctx.store.set("token", "tok");
    ctx.http.mock_network_failure(DASHBOARD);

    assert_eq!(
        ctx.session.check_navigation(AppRoute::Admin).await,
        NavDecision::Redirect(AppRoute::Home)
    );
}

// =========================================================
// 角色缓存测试
// =========================================================

#[tokio::test]
async fn test_role_is_fetched_once_while_resolved() {
    let ctx = TestContext::logged_in_as("admin");

    for route in [AppRoute::Welcome, AppRoute::Home, AppRoute::Admin] {
        ctx.session.check_navigation(route).await;
    }

    assert_eq!(ctx.dashboard_calls(), 1);
}

#[tokio::test]
async fn test_unresolved_role_is_retried_on_next_navigation() {
    let ctx = TestContext::new();
    ctx.store.set("token", "tok");
    ctx.http.mock_network_failure(DASHBOARD);

    ctx.session.check_navigation(AppRoute::Home).await;
    assert_eq!(ctx.session.role(), None);

    ctx.http.mock_response(DASHBOARD, 200, json!({ "role": "admin" }));
    assert_eq!(
        ctx.session.check_navigation(AppRoute::Admin).await,
        NavDecision::Allow
    );
    assert_eq!(ctx.dashboard_calls(), 2);
}

#[tokio::test]
async fn test_profile_without_role_leaves_cache_empty() {
    let ctx = TestContext::new();
    ctx.store.set("token", "tok");
    ctx.http.mock_response(DASHBOARD, 200, json!({ "login": "ann" }));

    assert_eq!(ctx.session.resolve_role().await, None);
}

#[tokio::test]
async fn test_concurrent_checks_share_the_cache_afterwards() {
    let ctx = TestContext::logged_in_as("user");

    // 两次检查同时在途，各自发出一次角色请求
    let (a, b) = futures::future::join(
        ctx.session.check_navigation(AppRoute::Admin),
        ctx.session.check_navigation(AppRoute::Home),
    )
    .await;

    assert_eq!(a, NavDecision::Redirect(AppRoute::Home));
    assert_eq!(b, NavDecision::Allow);
    assert_eq!(ctx.dashboard_calls(), 2);

    ctx.session.check_navigation(AppRoute::Admin).await;
    assert_eq!(ctx.dashboard_calls(), 2);
}

// =========================================================
// 登录 / 登出测试
// =========================================================

#[tokio::test]
async fn test_login_then_admin_navigation() {
    let ctx = TestContext::new();
    ctx.http.mock_response(
        "http://localhost:3000/users/login",
        200,
        json!({ "token": "fresh" }),
    );
    ctx.http.mock_response(DASHBOARD, 200, json!({ "role": "admin" }));

    // 匿名访问后角色仍未解析
    ctx.session.check_navigation(AppRoute::Welcome).await;
    assert_eq!(ctx.session.role(), None);

    ctx.session.login("root", "pw").await.unwrap();
    assert!(ctx.session.is_authenticated());

    assert_eq!(
        ctx.session.check_navigation(AppRoute::Admin).await,
        NavDecision::Allow
    );
}

#[tokio::test]
async fn test_logout_keeps_cached_role() {
    let ctx = TestContext::logged_in_as("admin");
    ctx.session.check_navigation(AppRoute::Admin).await;

    ctx.session.logout();

    assert!(!ctx.session.is_authenticated());
    assert_eq!(ctx.session.role().as_deref(), Some("admin"));
    // 仍然先检查认证
    assert_eq!(
        ctx.session.check_navigation(AppRoute::Admin).await,
        NavDecision::Redirect(AppRoute::Login)
    );
}
