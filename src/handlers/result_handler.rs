use actix_web::{get, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{results_owner, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::PaginationParams,
        response::{PaginatedResponse, TestResultDto},
    },
};

#[get("/results")]
pub async fn list_results(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    let page = state
        .test_service
        .list_results(auth.user_id(), &pagination)
        .await?;
    let response: PaginatedResponse<TestResultDto> =
        PaginatedResponse::from_page(page, &pagination);
    Ok(HttpResponse::Ok().json(response))
}

#[get("/results/summary")]
pub async fn result_summary(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let summary = state.test_service.result_summary(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(summary))
}

#[get("/users/{user_id}/results")]
pub async fn list_user_results(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let owner_id = results_owner(&auth.0, Some(&user_id))?;

    let pagination = query.into_inner();
    let page = state.test_service.list_results(&owner_id, &pagination).await?;
    let response: PaginatedResponse<TestResultDto> =
        PaginatedResponse::from_page(page, &pagination);
    Ok(HttpResponse::Ok().json(response))
}
