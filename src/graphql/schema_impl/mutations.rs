use async_graphql::{Context, Object};

use crate::{
    app_state::AppState,
    auth::extract_claims_from_context,
    graphql::helpers::into_graphql,
    models::dto::{
        request::{CreateSourceDocumentRequest, GenerateTestRequest, SubmitTestInput},
        response::{GeneratedTestResponse, SourceDocumentDto, TestResultDto},
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_document(
        &self,
        ctx: &Context<'_>,
        input: CreateSourceDocumentRequest,
    ) -> async_graphql::Result<SourceDocumentDto> {
        let state = ctx.data::<AppState>()?;
        let claims = into_graphql(extract_claims_from_context(ctx))?;

        let document =
            into_graphql(state.document_service.create_document(&claims.sub, input).await)?;
        Ok(document.into())
    }

    async fn generate_test(
        &self,
        ctx: &Context<'_>,
        input: GenerateTestRequest,
    ) -> async_graphql::Result<GeneratedTestResponse> {
        let state = ctx.data::<AppState>()?;
        let claims = into_graphql(extract_claims_from_context(ctx))?;

        let test = into_graphql(state.test_service.generate_test(&claims.sub, input).await)?;
        Ok(test.into())
    }

    async fn submit_test(
        &self,
        ctx: &Context<'_>,
        input: SubmitTestInput,
    ) -> async_graphql::Result<TestResultDto> {
        let state = ctx.data::<AppState>()?;
        let claims = into_graphql(extract_claims_from_context(ctx))?;

        let answers = input.submitted_answers();
        let result = into_graphql(
            state
                .test_service
                .submit_test(&claims.sub, &input.test_id, &answers)
                .await,
        )?;
        Ok(result.into())
    }
}
