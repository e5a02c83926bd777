use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::SourceDocument,
        dto::request::{CreateSourceDocumentRequest, PaginationParams},
    },
    repositories::SourceDocumentRepository,
};

pub struct SourceDocumentService {
    repository: Arc<dyn SourceDocumentRepository>,
}

impl SourceDocumentService {
    pub fn new(repository: Arc<dyn SourceDocumentRepository>) -> Self {
        Self { repository }
    }

    /// Registers extracted text. Blank text is accepted here; generation
    /// rejects it later with `EmptySource`.
    pub async fn create_document(
        &self,
        owner_id: &str,
        request: CreateSourceDocumentRequest,
    ) -> AppResult<SourceDocument> {
        request.validate()?;

        let filename = request.filename.trim();
        if filename.is_empty() {
            return Err(AppError::ValidationError(
                "Filename cannot be blank".to_string(),
            ));
        }

        let document = SourceDocument::new(owner_id, filename, &request.extracted_text);
        if !document.has_text() {
            log::warn!(
                "Document {} registered without extractable text",
                document.id
            );
        }

        self.repository.create(document).await
    }

    pub async fn get_document(&self, owner_id: &str, id: &str) -> AppResult<SourceDocument> {
        self.repository
            .find_for_owner(id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document with id '{}' not found", id)))
    }

    pub async fn list_documents(
        &self,
        owner_id: &str,
        pagination: &PaginationParams,
    ) -> AppResult<(Vec<SourceDocument>, i64)> {
        self.repository
            .list_by_owner(owner_id, pagination.offset(), pagination.limit())
            .await
    }
}
