use std::sync::Arc;

use sha2::{Digest, Sha256};
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Test, TestResult},
        dto::{
            request::{GenerateTestRequest, PaginationParams, SubmittedAnswers},
            response::ResultSummaryDto,
        },
    },
    repositories::{SourceDocumentRepository, TestRepository, TestResultRepository},
    services::{response_parser, scorer, test_generator::TestGenerator},
};

/// Hex SHA-256 of the source text actually sent to the provider.
pub fn source_digest(prepared_source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prepared_source.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub struct TestService {
    documents: Arc<dyn SourceDocumentRepository>,
    tests: Arc<dyn TestRepository>,
    results: Arc<dyn TestResultRepository>,
    generator: Arc<TestGenerator>,
}

impl TestService {
    pub fn new(
        documents: Arc<dyn SourceDocumentRepository>,
        tests: Arc<dyn TestRepository>,
        results: Arc<dyn TestResultRepository>,
        generator: Arc<TestGenerator>,
    ) -> Self {
        Self {
            documents,
            tests,
            results,
            generator,
        }
    }

    /// Generates, parses and stores a test from one of the caller's documents.
    /// Nothing is persisted unless at least one question was parsed.
    pub async fn generate_test(&self, owner_id: &str, request: GenerateTestRequest) -> AppResult<Test> {
        request.validate()?;

        let document = self
            .documents
            .find_for_owner(&request.document_id, owner_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Document with id '{}' not found", request.document_id))
            })?;

        let params = request.params();
        let raw_output = self.generator.generate(&document.extracted_text, &params).await?;
        let questions = response_parser::parse(&raw_output)?;

        let prepared = self.generator.prompt_builder().prepare_source(&document.extracted_text);
        let test = Test::new(owner_id, questions, source_digest(prepared))
            .with_source_document(&document.id)
            .with_topic(params.topic)
            .with_difficulty(Some(params.difficulty));

        log::info!(
            "Generated test {} with {} questions from document {}",
            test.id,
            test.question_count(),
            document.id
        );

        self.tests.create(test).await
    }

    pub async fn get_test(&self, owner_id: &str, test_id: &str) -> AppResult<Test> {
        self.tests
            .find_for_owner(test_id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Test with id '{}' not found", test_id)))
    }

    pub async fn list_tests(
        &self,
        owner_id: &str,
        pagination: &PaginationParams,
    ) -> AppResult<(Vec<Test>, i64)> {
        self.tests
            .list_by_owner(owner_id, pagination.offset(), pagination.limit())
            .await
    }

    /// Scores a submission and appends the result. The test itself is never modified.
    pub async fn submit_test(
        &self,
        owner_id: &str,
        test_id: &str,
        answers: &SubmittedAnswers,
    ) -> AppResult<TestResult> {
        let test = self.get_test(owner_id, test_id).await?;
        let result = scorer::score(owner_id, &test, answers);

        log::info!(
            "Scored test {} for user {}: {}/{} ({}%)",
            test.id,
            owner_id,
            result.correct,
            result.total,
            result.score
        );

        self.results.create(result).await
    }

    pub async fn list_results(
        &self,
        owner_id: &str,
        pagination: &PaginationParams,
    ) -> AppResult<(Vec<TestResult>, i64)> {
        self.results
            .list_by_owner(owner_id, pagination.offset(), pagination.limit())
            .await
    }

    pub async fn result_summary(&self, owner_id: &str) -> AppResult<ResultSummaryDto> {
        let results = self.results.find_all_by_owner(owner_id).await?;
        Ok(ResultSummaryDto::from_results(&results))
    }
}
