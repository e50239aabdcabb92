// =========================================================
// 客户端配置 (Client Configuration)
// =========================================================

/// 这些是默认值，对应变量未设置时使用
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TOKEN_KEY: &str = "token";
pub const DEFAULT_THEME_KEY: &str = "theme";

pub const BASE_URL_VAR: &str = "CASEBOOK_API_BASE";
pub const TOKEN_KEY_VAR: &str = "CASEBOOK_TOKEN_KEY";
pub const THEME_KEY_VAR: &str = "CASEBOOK_THEME_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API 源地址，不带结尾的 `/`
    pub base_url: String,
    /// 持久化 token 的存储键
    pub token_key: String,
    /// 持久化主题的存储键
    pub theme_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            ..Self::default()
        }
    }

    /// 运行时从环境变量读取 (原生目标)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 编译期从环境变量读取 (wasm 前端)
    pub fn from_build_env() -> Self {
        Self::from_lookup(|name| {
            let value = match name {
                BASE_URL_VAR => option_env!("CASEBOOK_API_BASE"),
                TOKEN_KEY_VAR => option_env!("CASEBOOK_TOKEN_KEY"),
                THEME_KEY_VAR => option_env!("CASEBOOK_THEME_KEY"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// 每一项读不到 (或为空) 就用默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            base_url: normalize_base_url(&read(BASE_URL_VAR, DEFAULT_BASE_URL)),
            token_key: read(TOKEN_KEY_VAR, DEFAULT_TOKEN_KEY),
            theme_key: read(THEME_KEY_VAR, DEFAULT_THEME_KEY),
        }
    }

    /// 拼接完整 URL
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
