use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateSourceDocumentRequest, PaginationParams},
        response::{PaginatedResponse, SourceDocumentDto},
    },
};

#[post("/documents")]
pub async fn create_document(
    state: web::Data<AppState>,
    request: web::Json<CreateSourceDocumentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let document = state
        .document_service
        .create_document(auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(SourceDocumentDto::from(document)))
}

#[get("/documents")]
pub async fn list_documents(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    let page = state
        .document_service
        .list_documents(auth.user_id(), &pagination)
        .await?;
    let response: PaginatedResponse<SourceDocumentDto> =
        PaginatedResponse::from_page(page, &pagination);
    Ok(HttpResponse::Ok().json(response))
}

#[get("/documents/{id}")]
pub async fn get_document(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let document = state
        .document_service
        .get_document(auth.user_id(), &id)
        .await?;
    Ok(HttpResponse::Ok().json(SourceDocumentDto::from(document)))
}
