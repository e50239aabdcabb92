use casebook_shared::protocol::{
    CreateCaseRequest, DeleteCaseRequest, GetCaseRequest, ListCasesRequest, SearchCasesRequest,
    UpdateCaseRequest,
};
use casebook_shared::{Case, CaseDraft, CreatedCase, DeletedCase, SearchCasesResponse, UpdatedCase};

use super::ApiClient;
use crate::error::ApiResult;

/// `/cases` 资源的增删改查与搜索
///
/// 参数不做校验：`id` 原样拼进路径，`query` 经过 URL 编码。
#[derive(Clone)]
pub struct CaseApi {
    client: ApiClient,
}

impl CaseApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 获取全部案件
    pub async fn get_case_list(&self) -> ApiResult<Vec<Case>> {
        let res = self.client.execute(&ListCasesRequest).await?;
        Ok(res.cases)
    }

    /// 按 id 获取案件；服务端返回 `selectedCase: null` 时为 `None`
    pub async fn get_case_by_id(&self, id: &str) -> ApiResult<Option<Case>> {
        let req = GetCaseRequest { id: id.to_string() };
        let res = self.client.execute(&req).await?;
        Ok(res.selected_case)
    }

    pub async fn create_case(&self, draft: CaseDraft) -> ApiResult<CreatedCase> {
        self.client.execute(&CreateCaseRequest { draft }).await
    }

    pub async fn update_case(&self, id: &str, draft: CaseDraft) -> ApiResult<UpdatedCase> {
        let req = UpdateCaseRequest {
            id: id.to_string(),
            draft,
        };
        self.client.execute(&req).await
    }

    pub async fn delete_case(&self, id: &str) -> ApiResult<DeletedCase> {
        let req = DeleteCaseRequest { id: id.to_string() };
        self.client.execute(&req).await
    }

    pub async fn search_cases(&self, query: &str) -> ApiResult<SearchCasesResponse> {
        let req = SearchCasesRequest {
            query: query.to_string(),
        };
        self.client.execute(&req).await
    }
}
