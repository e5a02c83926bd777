use async_graphql::{Context, Object};

use crate::{
    app_state::AppState,
    auth::{extract_claims_from_context, results_owner},
    graphql::helpers::{into_graphql, pagination},
    models::dto::response::{
        PaginatedResponse, ResultSummaryDto, SourceDocumentDto, TestDto, TestResultDto,
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn test(&self, ctx: &Context<'_>, id: String) -> async_graphql::Result<TestDto> {
        let state = ctx.data::<AppState>()?;
        let claims = into_graphql(extract_claims_from_context(ctx))?;

        let test = into_graphql(state.test_service.get_test(&claims.sub, &id).await)?;
        Ok(test.into())
    }

    async fn tests(
        &self,
        ctx: &Context<'_>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> async_graphql::Result<PaginatedResponse<TestDto>> {
        let state = ctx.data::<AppState>()?;
        let claims = into_graphql(extract_claims_from_context(ctx))?;

        let pagination = pagination(offset, limit);
        let page = into_graphql(state.test_service.list_tests(&claims.sub, &pagination).await)?;
        Ok(PaginatedResponse::from_page(page, &pagination))
    }

    /// Results for the caller, or for `user_id` when the caller owns it or is an admin.
    async fn results(
        &self,
        ctx: &Context<'_>,
        user_id: Option<String>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> async_graphql::Result<PaginatedResponse<TestResultDto>> {
        let state = ctx.data::<AppState>()?;
        let claims = into_graphql(extract_claims_from_context(ctx))?;

        let owner_id = into_graphql(results_owner(&claims, user_id.as_deref()))?;

        let pagination = pagination(offset, limit);
        let page = into_graphql(state.test_service.list_results(&owner_id, &pagination).await)?;
        Ok(PaginatedResponse::from_page(page, &pagination))
    }

    async fn result_summary(&self, ctx: &Context<'_>) -> async_graphql::Result<ResultSummaryDto> {
        let state = ctx.data::<AppState>()?;
        let claims = into_graphql(extract_claims_from_context(ctx))?;

        into_graphql(state.test_service.result_summary(&claims.sub).await)
    }

    async fn documents(
        &self,
        ctx: &Context<'_>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> async_graphql::Result<PaginatedResponse<SourceDocumentDto>> {
        let state = ctx.data::<AppState>()?;
        let claims = into_graphql(extract_claims_from_context(ctx))?;

        let pagination = pagination(offset, limit);
        let page = into_graphql(
            state
                .document_service
                .list_documents(&claims.sub, &pagination)
                .await,
        )?;
        Ok(PaginatedResponse::from_page(page, &pagination))
    }
}
