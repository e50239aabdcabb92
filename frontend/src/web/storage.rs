//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现核心库的 `KeyValueStore`。

use casebook::KeyValueStore;

/// 本地存储操作封装
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值，键不存在或出错时返回 `None`
    pub fn read(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值
    ///
    /// # 返回
    /// - `true` 如果操作成功
    /// - `false` 如果操作失败 (例如隐私模式下配额为 0)
    pub fn write(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除存储的键值对
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::read(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::write(key, value)
    }

    fn remove(&self, key: &str) -> bool {
        Self::delete(key)
    }
}
