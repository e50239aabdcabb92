use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// 拥有管理权限的角色名
pub const ADMIN_ROLE: &str = "admin";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 案件记录
///
/// 服务端不保证字段形状，解码只做尽力而为：
/// - `_id` 缺失时退回到 `id` (其余 `id` 字段留在 `extra` 中)
/// - `title` 等文本字段为 `null` 或非字符串时视为缺失
/// - 不是 RFC 3339 的时间戳原样保留在 `extra` 中
///
/// 服务端未声明的字段保存在 `extra` 中，原样回写。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Case {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for Case {
    fn from(mut fields: Map<String, Value>) -> Self {
        let id = take_string(&mut fields, "_id")
            .or_else(|| fields.get("id").and_then(scalar_to_string))
            .unwrap_or_default();

        Self {
            id,
            title: take_string(&mut fields, "title").unwrap_or_default(),
            description: take_string(&mut fields, "description"),
            status: take_string(&mut fields, "status"),
            created_at: take_timestamp(&mut fields, "createdAt"),
            updated_at: take_timestamp(&mut fields, "updatedAt"),
            extra: fields,
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 取出文本字段；`null` 直接丢弃，其它类型放回 `extra`
fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    let value = fields.remove(key)?;
    match scalar_to_string(&value) {
        Some(text) => Some(text),
        None => {
            if !value.is_null() {
                fields.insert(key.to_string(), value);
            }
            None
        }
    }
}

/// 取出 RFC 3339 时间戳；解析失败时原值放回 `extra`
fn take_timestamp(fields: &mut Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    let value = fields.remove(key)?;
    let parsed = value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc));
    if parsed.is_none() && !value.is_null() {
        fields.insert(key.to_string(), value);
    }
    parsed
}

/// `null` 与缺失一样取默认值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 创建 / 更新案件时提交的数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CaseDraft {
    /// 由表单输入构造草稿，标题为空时返回 `None`
    ///
    /// 新建时空字段不提交；更新时空字段提交空串，用于清除服务端已有的值。
    pub fn from_form(title: &str, description: &str, status: &str, is_update: bool) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let field = |value: &str| {
            let value = value.trim();
            (is_update || !value.is_empty()).then(|| value.to_string())
        };

        Some(Self {
            title: title.to_string(),
            description: field(description),
            status: field(status),
            extra: Map::new(),
        })
    }
}

impl From<&Case> for CaseDraft {
    fn from(case: &Case) -> Self {
        Self {
            title: case.title.clone(),
            description: case.description.clone(),
            status: case.status.clone(),
            extra: Map::new(),
        }
    }
}

/// 注册用户时提交的数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub login: String,
    pub email: String,
    pub password: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 登录凭据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// 当前用户资料 (`/users/dashboard`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

// =========================================================
// 响应体 (Response Bodies)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cases: Vec<Case>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseResponse {
    /// 服务端找不到案件时可能返回 `null`
    #[serde(rename = "selectedCase", default)]
    pub selected_case: Option<Case>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedCase {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(rename = "savedCase", default)]
    pub saved_case: Option<Case>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedCase {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "updateCase", default)]
    pub update_case: Option<Case>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedCase {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "deletedCase", default)]
    pub deleted_case: Option<Case>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCasesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cases: Vec<Case>,
}

/// 登录响应，`token` 存在时由客户端持久化
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// 只带消息的通用响应 (如注册)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =========================================================
// 兼容信封 (Envelope)
// =========================================================

/// `{success, data?, message?, errors?}` 形式的统一结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Map<String, Value>>,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    /// 服务端有响应时的失败：携带响应体
    pub fn failure_data(data: Value) -> Self {
        Self {
            success: false,
            data: Some(data),
            message: None,
            errors: None,
        }
    }

    /// 服务端无响应时的失败：只有消息和空的 errors
    pub fn failure_message(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            errors: Some(Map::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn case_accepts_mongo_id_and_keeps_unknown_fields() {
        let case: Case = serde_json::from_value(json!({
            "_id": "65f0c1",
            "title": "Theft",
            "status": "open",
            "createdAt": "2024-03-01T10:00:00.000Z",
            "judge": "Smith"
        }))
        .unwrap();

        assert_eq!(case.id, "65f0c1");
        assert_eq!(case.title, "Theft");
        assert_eq!(case.status.as_deref(), Some("open"));
        assert!(case.created_at.is_some());
        assert_eq!(case.extra.get("judge"), Some(&json!("Smith")));

        let round = serde_json::to_value(&case).unwrap();
        assert_eq!(round["_id"], "65f0c1");
        assert_eq!(round["judge"], "Smith");
    }

    #[test]
    fn case_accepts_plain_id() {
        let case: Case = serde_json::from_value(json!({ "id": "7" })).unwrap();
        assert_eq!(case.id, "7");
        assert_eq!(case.title, "");
    }

    #[test]
    fn draft_from_form_on_create_omits_blank_fields() {
        let draft = CaseDraft::from_form(" Theft ", "", "  ", false).unwrap();
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({ "title": "Theft" })
        );

        assert_eq!(CaseDraft::from_form("   ", "desc", "open", false), None);
    }

    #[test]
    fn draft_from_form_on_update_clears_blank_fields() {
        let draft = CaseDraft::from_form("Theft", "", "closed", true).unwrap();
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({ "title": "Theft", "description": "", "status": "closed" })
        );
    }

    #[test]
    fn case_with_both_ids_and_loose_fields() {
        let case: Case = serde_json::from_value(json!({
            "_id": "a1",
            "id": "a1",
            "title": null,
            "createdAt": "yesterday"
        }))
        .unwrap();

        assert_eq!(case.id, "a1");
        assert_eq!(case.title, "");
        assert_eq!(case.created_at, None);
        assert_eq!(case.extra.get("createdAt"), Some(&json!("yesterday")));

        let round = serde_json::to_value(&case).unwrap();
        assert_eq!(round["_id"], "a1");
        assert_eq!(round["createdAt"], "yesterday");
    }

    #[test]
    fn profile_admin_check() {
        let admin: UserProfile = serde_json::from_value(json!({ "role": "admin" })).unwrap();
        let user: UserProfile = serde_json::from_value(json!({ "role": "user" })).unwrap();
        let none: UserProfile = serde_json::from_value(json!({})).unwrap();

        assert!(admin.is_admin());
        assert!(!user.is_admin());
        assert!(!none.is_admin());
    }

    #[test]
    fn envelope_failure_shapes() {
        let offline = serde_json::to_value(Envelope::failure_message("Server is not responding"))
            .unwrap();
        assert_eq!(
            offline,
            json!({ "success": false, "message": "Server is not responding", "errors": {} })
        );

        let rejected =
            serde_json::to_value(Envelope::failure_data(json!({ "message": "nope" }))).unwrap();
        assert_eq!(rejected, json!({ "success": false, "data": { "message": "nope" } }));
    }
}
