//! 主题持久化
//!
//! 只负责“读初值 / 写新值”，响应式状态与 DOM 属性由前端的 ThemeProvider 处理。

use std::sync::Arc;

use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark { Self::Dark } else { Self::Light }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    /// 存储值与 `data-theme` 属性值
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

#[derive(Clone)]
pub struct ThemeStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl ThemeStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    /// 已保存的值优先 (`"dark"` 为深色，其它值为浅色)，否则跟随系统偏好
    pub fn initial_is_dark(&self, prefers_dark: bool) -> bool {
        match self.store.get(&self.key).filter(|v| !v.is_empty()) {
            Some(saved) => saved == ThemeMode::Dark.as_str(),
            None => prefers_dark,
        }
    }

    pub fn persist(&self, mode: ThemeMode) {
        if !self.store.set(&self.key, mode.as_str()) {
            log::warn!("failed to persist theme {}", mode.as_str());
        }
    }
}
