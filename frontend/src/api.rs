//! 接口客户端的上下文访问

use casebook::{ApiError, CaseApi};
use leptos::prelude::*;

/// 从 Context 获取案件接口
pub fn use_cases() -> CaseApi {
    use_context::<CaseApi>().expect("CaseApi should be provided")
}

/// 通知栏使用的错误文案
pub fn describe_error(action: &str, err: &ApiError) -> String {
    if err.is_unauthorized() {
        format!("{action}失败: 请先登录")
    } else {
        format!("{action}失败: {}", err.message)
    }
}
