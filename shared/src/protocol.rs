use crate::{
    CaseDraft, CaseListResponse, CaseResponse, CreatedCase, Credentials, DeletedCase,
    LoginResponse, MessageResponse, NewUser, SearchCasesResponse, UpdatedCase, UserProfile,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// The path is computed per request because several endpoints carry the record id.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path relative to the API origin.
    fn path(&self) -> String;

    /// JSON body, if the endpoint takes one.
    fn body(&self) -> Option<Value> {
        None
    }
}

fn to_body<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}

// =========================================================
// Case Endpoints
// =========================================================

/// List all cases
#[derive(Debug, Clone, Copy, Default)]
pub struct ListCasesRequest;

impl ApiRequest for ListCasesRequest {
    type Response = CaseListResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/cases/all".to_string()
    }
}

/// Fetch one case. The id goes into the path as-is.
#[derive(Debug, Clone)]
pub struct GetCaseRequest {
    pub id: String,
}

impl ApiRequest for GetCaseRequest {
    type Response = CaseResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/cases/case/{}", self.id)
    }
}

#[derive(Debug, Clone)]
pub struct CreateCaseRequest {
    pub draft: CaseDraft,
}

impl ApiRequest for CreateCaseRequest {
    type Response = CreatedCase;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/cases/create".to_string()
    }

    fn body(&self) -> Option<Value> {
        to_body(&self.draft)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCaseRequest {
    pub id: String,
    pub draft: CaseDraft,
}

impl ApiRequest for UpdateCaseRequest {
    type Response = UpdatedCase;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/cases/update/{}", self.id)
    }

    fn body(&self) -> Option<Value> {
        to_body(&self.draft)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteCaseRequest {
    pub id: String,
}

impl ApiRequest for DeleteCaseRequest {
    type Response = DeletedCase;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/cases/delete/{}", self.id)
    }
}

/// Full-text search. Unlike ids, the query is URL-encoded.
#[derive(Debug, Clone)]
pub struct SearchCasesRequest {
    pub query: String,
}

impl ApiRequest for SearchCasesRequest {
    type Response = SearchCasesResponse;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/cases/search?q={}", urlencoding::encode(&self.query))
    }
}

// =========================================================
// User Endpoints
// =========================================================

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub user: NewUser,
}

impl ApiRequest for RegisterRequest {
    type Response = MessageResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/users/register".to_string()
    }

    fn body(&self) -> Option<Value> {
        to_body(&self.user)
    }
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub credentials: Credentials,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/users/login".to_string()
    }

    fn body(&self) -> Option<Value> {
        to_body(&self.credentials)
    }
}

/// Current user profile, including `role`
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardRequest;

impl ApiRequest for DashboardRequest {
    type Response = UserProfile;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/users/dashboard".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_query_is_url_encoded() {
        let req = SearchCasesRequest {
            query: "fraud & theft/2024?".to_string(),
        };
        assert_eq!(req.path(), "/cases/search?q=fraud%20%26%20theft%2F2024%3F");
    }

    #[test]
    fn case_id_is_interpolated_verbatim() {
        let req = GetCaseRequest {
            id: "a b/../c".to_string(),
        };
        assert_eq!(req.path(), "/cases/case/a b/../c");
        assert_eq!(
            DeleteCaseRequest { id: "42".into() }.path(),
            "/cases/delete/42"
        );
    }

    #[test]
    fn login_body_carries_credentials() {
        let req = LoginRequest {
            credentials: Credentials {
                login: "ann".into(),
                password: "secret".into(),
            },
        };
        assert_eq!(req.body(), Some(json!({ "login": "ann", "password": "secret" })));
        assert_eq!(LoginRequest::METHOD, HttpMethod::Post);
        assert_eq!(DashboardRequest.body(), None);
    }
}
