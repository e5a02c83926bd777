use std::collections::BTreeMap;

use async_graphql::{OutputType, SimpleObject};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{
    domain::{Question, QuestionOutcome, SourceDocument, Test, TestResult},
    dto::request::PaginationParams,
};

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct SourceDocumentDto {
    pub id: String,
    pub filename: String,
    pub character_count: u64,
    pub has_text: bool,
    pub uploaded_at: DateTime<Utc>,
}

impl From<SourceDocument> for SourceDocumentDto {
    fn from(document: SourceDocument) -> Self {
        SourceDocumentDto {
            character_count: document.extracted_text.chars().count() as u64,
            has_text: document.has_text(),
            id: document.id,
            filename: document.filename,
            uploaded_at: document.uploaded_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct GeneratedTestResponse {
    pub test_id: String,
    pub questions: Vec<Question>,
}

impl From<Test> for GeneratedTestResponse {
    fn from(test: Test) -> Self {
        GeneratedTestResponse {
            test_id: test.id,
            questions: test.questions,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct TestDto {
    pub test_id: String,
    pub source_document_id: Option<String>,
    pub topic: Option<String>,
    pub difficulty: Option<String>,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

impl From<Test> for TestDto {
    fn from(test: Test) -> Self {
        TestDto {
            test_id: test.id,
            source_document_id: test.source_document_id,
            topic: test.topic,
            difficulty: test.difficulty,
            questions: test.questions,
            created_at: test.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct TestResultDto {
    pub result_id: String,
    pub test_id: String,
    pub score: f64,
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
    #[graphql(skip)]
    pub submitted_answers: BTreeMap<String, String>,
    pub question_results: Vec<QuestionOutcome>,
    pub submitted_at: DateTime<Utc>,
}

impl From<TestResult> for TestResultDto {
    fn from(result: TestResult) -> Self {
        TestResultDto {
            incorrect: result.incorrect(),
            result_id: result.id,
            test_id: result.test_id,
            score: result.score,
            correct: result.correct,
            total: result.total,
            submitted_answers: result.submitted_answers,
            question_results: result.question_results,
            submitted_at: result.submitted_at,
        }
    }
}

/// Aggregate view over a user's results, newest attempts included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, SimpleObject)]
pub struct ResultSummaryDto {
    pub attempts: u64,
    pub average_score: Option<f64>,
    pub best_score: Option<f64>,
    pub worst_score: Option<f64>,
}

impl ResultSummaryDto {
    pub fn from_results(results: &[TestResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let scores = results.iter().map(|r| r.score);
        let sum: f64 = scores.clone().sum();
        let best = scores.clone().fold(f64::MIN, f64::max);
        let worst = scores.fold(f64::MAX, f64::min);
        let average = (sum / results.len() as f64 * 100.0).round() / 100.0;

        ResultSummaryDto {
            attempts: results.len() as u64,
            average_score: Some(average),
            best_score: Some(best),
            worst_score: Some(worst),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[graphql(concrete(name = "DocumentPage", params(SourceDocumentDto)))]
#[graphql(concrete(name = "TestPage", params(TestDto)))]
#[graphql(concrete(name = "TestResultPage", params(TestResultDto)))]
pub struct PaginatedResponse<T: OutputType> {
    pub items: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

impl<T: OutputType> PaginatedResponse<T> {
    /// Converts a repository page into DTOs.
    pub fn from_page<U: Into<T>>(page: (Vec<U>, i64), pagination: &PaginationParams) -> Self {
        let (items, total) = page;
        PaginatedResponse {
            items: items.into_iter().map(Into::into).collect(),
            total,
            offset: pagination.offset(),
            limit: pagination.limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Difficulty;

    fn result_with_score(score: f64) -> TestResult {
        TestResult {
            id: format!("result-{}", score),
            owner_id: "user-1".to_string(),
            test_id: "test-1".to_string(),
            correct: 0,
            total: 0,
            score,
            submitted_answers: BTreeMap::new(),
            question_results: vec![],
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_of_no_results_is_empty() {
        let summary = ResultSummaryDto::from_results(&[]);

        assert_eq!(summary.attempts, 0);
        assert!(summary.average_score.is_none());
        assert!(summary.best_score.is_none());
    }

    #[test]
    fn test_summary_statistics() {
        let results = vec![
            result_with_score(50.0),
            result_with_score(100.0),
            result_with_score(33.33),
        ];

        let summary = ResultSummaryDto::from_results(&results);

        assert_eq!(summary.attempts, 3);
        assert_eq!(summary.best_score, Some(100.0));
        assert_eq!(summary.worst_score, Some(33.33));
        assert_eq!(summary.average_score, Some(61.11));
    }

    #[test]
    fn test_result_dto_reports_incorrect() {
        let mut result = result_with_score(40.0);
        result.correct = 2;
        result.total = 5;

        let dto = TestResultDto::from(result);
        assert_eq!(dto.incorrect, 3);
    }

    #[test]
    fn test_document_dto_hides_text() {
        let document = SourceDocument::new("user-1", "notes.pdf", "héllo");
        let dto = SourceDocumentDto::from(document);

        assert_eq!(dto.character_count, 5);
        let json = serde_json::to_value(&dto).expect("dto should serialize");
        assert!(json.get("extracted_text").is_none());
    }

    #[test]
    fn test_page_uses_clamped_pagination() {
        let pagination = PaginationParams {
            offset: Some(-5),
            limit: Some(500),
        };
        let document = SourceDocument::new("user-1", "notes.pdf", "text");

        let page: PaginatedResponse<SourceDocumentDto> =
            PaginatedResponse::from_page((vec![document], 7), &pagination);

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 7);
        assert_eq!(page.offset, 0);
        assert_eq!(page.limit, 100);
    }

    #[test]
    fn test_generated_response_keeps_questions() {
        let question = Question::new("Q", vec!["A".to_string()], Difficulty::Medium);
        let test = Test::new("user-1", vec![question.clone()], String::new());
        let id = test.id.clone();

        let response = GeneratedTestResponse::from(test);
        assert_eq!(response.test_id, id);
        assert_eq!(response.questions, vec![question]);
    }
}
