use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{GenerateTestRequest, PaginationParams, SubmitTestRequest},
        response::{GeneratedTestResponse, PaginatedResponse, TestDto, TestResultDto},
    },
};

#[post("/tests/generate")]
pub async fn generate_test(
    state: web::Data<AppState>,
    request: web::Json<GenerateTestRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let test = state
        .test_service
        .generate_test(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(GeneratedTestResponse::from(test)))
}

#[get("/tests")]
pub async fn list_tests(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    let page = state
        .test_service
        .list_tests(auth.user_id(), &pagination)
        .await?;
    let response: PaginatedResponse<TestDto> = PaginatedResponse::from_page(page, &pagination);
    Ok(HttpResponse::Ok().json(response))
}

#[get("/tests/{id}")]
pub async fn get_test(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let test = state.test_service.get_test(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(TestDto::from(test)))
}

#[post("/tests/{id}/submit")]
pub async fn submit_test(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitTestRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let result = state
        .test_service
        .submit_test(auth.user_id(), &id, &request.answers)
        .await?;
    Ok(HttpResponse::Created().json(TestResultDto::from(result)))
}
