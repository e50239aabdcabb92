//! 文档级 DOM 操作

use casebook::ThemeMode;

const THEME_ATTRIBUTE: &str = "data-theme";
const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// 系统是否偏好暗色
pub fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media(DARK_SCHEME_QUERY).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// 把主题写到 `<html data-theme="...">`
pub fn apply_theme(mode: ThemeMode) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());

    match root {
        Some(root) => {
            if root.set_attribute(THEME_ATTRIBUTE, mode.as_str()).is_err() {
                log::warn!("failed to set {THEME_ATTRIBUTE}");
            }
        }
        None => log::warn!("document root not available, theme not applied"),
    }
}
