pub mod fixtures {
    use crate::models::domain::{Difficulty, Question, Test};

    pub const JSON_REPLY: &str = r#"[
        {"question": "Capital of France?", "options": ["Paris", "Lyon", "Nice", "Lille"], "answer": "Paris", "difficulty": "easy"},
        {"question": "Capital of Italy?", "options": ["Milan", "Rome", "Turin", "Naples"], "answer": "b", "difficulty": "medium"}
    ]"#;

    pub const LETTERED_REPLY: &str = "1. What is 2+2?\na) 3\nb) 4\nc) 5\nd) 6\n\n\
        2. What is 3+3?\na) 5\nb) 6\nc) 7\nd) 8\n\n\
        Answers:\n1. b\n";

    pub fn test_questions() -> Vec<Question> {
        let mut france = Question::new(
            "Capital of France?",
            vec!["Paris".into(), "Lyon".into(), "Nice".into(), "Lille".into()],
            Difficulty::Easy,
        );
        france.answer = "Paris".to_string();

        let unanswered = Question::new(
            "Largest ocean?",
            vec!["Atlantic".into(), "Pacific".into(), "Indian".into(), "Arctic".into()],
            Difficulty::Medium,
        );

        vec![france, unanswered]
    }

    pub fn test_test(owner_id: &str) -> Test {
        Test::new(owner_id, test_questions(), String::new())
    }
}

pub mod repositories {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::{
        errors::AppResult,
        models::domain::{SourceDocument, Test, TestResult},
        repositories::{SourceDocumentRepository, TestRepository, TestResultRepository},
    };

    fn page<T: Clone>(items: &[T], offset: i64, limit: i64) -> Vec<T> {
        let start = offset.max(0) as usize;
        if start >= items.len() {
            return vec![];
        }
        let end = (start + limit.max(0) as usize).min(items.len());
        items[start..end].to_vec()
    }

    #[derive(Default)]
    pub struct InMemorySourceDocumentRepository {
        documents: Arc<RwLock<Vec<SourceDocument>>>,
    }

    impl InMemorySourceDocumentRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl SourceDocumentRepository for InMemorySourceDocumentRepository {
        async fn create(&self, document: SourceDocument) -> AppResult<SourceDocument> {
            self.documents.write().await.push(document.clone());
            Ok(document)
        }

        async fn find_for_owner(&self, id: &str, owner_id: &str) -> AppResult<Option<SourceDocument>> {
            let documents = self.documents.read().await;
            Ok(documents
                .iter()
                .find(|d| d.id == id && d.owner_id == owner_id)
                .cloned())
        }

        async fn list_by_owner(
            &self,
            owner_id: &str,
            offset: i64,
            limit: i64,
        ) -> AppResult<(Vec<SourceDocument>, i64)> {
            let documents = self.documents.read().await;
            let mut owned: Vec<_> = documents
                .iter()
                .filter(|d| d.owner_id == owner_id)
                .cloned()
                .collect();
            owned.reverse();
            Ok((page(&owned, offset, limit), owned.len() as i64))
        }
    }

    #[derive(Default)]
    pub struct InMemoryTestRepository {
        tests: Arc<RwLock<Vec<Test>>>,
    }

    impl InMemoryTestRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl TestRepository for InMemoryTestRepository {
        async fn create(&self, test: Test) -> AppResult<Test> {
            self.tests.write().await.push(test.clone());
            Ok(test)
        }

        async fn find_for_owner(&self, id: &str, owner_id: &str) -> AppResult<Option<Test>> {
            let tests = self.tests.read().await;
            Ok(tests
                .iter()
                .find(|t| t.id == id && t.owner_id == owner_id)
                .cloned())
        }

        async fn list_by_owner(&self, owner_id: &str, offset: i64, limit: i64) -> AppResult<(Vec<Test>, i64)> {
            let tests = self.tests.read().await;
            let mut owned: Vec<_> = tests
                .iter()
                .filter(|t| t.owner_id == owner_id)
                .cloned()
                .collect();
            owned.reverse();
            Ok((page(&owned, offset, limit), owned.len() as i64))
        }
    }

    #[derive(Default)]
    pub struct InMemoryTestResultRepository {
        results: Arc<RwLock<Vec<TestResult>>>,
    }

    impl InMemoryTestResultRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl TestResultRepository for InMemoryTestResultRepository {
        async fn create(&self, result: TestResult) -> AppResult<TestResult> {
            self.results.write().await.push(result.clone());
            Ok(result)
        }

        async fn list_by_owner(
            &self,
            owner_id: &str,
            offset: i64,
            limit: i64,
        ) -> AppResult<(Vec<TestResult>, i64)> {
            let owned = self.find_all_by_owner(owner_id).await?;
            Ok((page(&owned, offset, limit), owned.len() as i64))
        }

        async fn find_all_by_owner(&self, owner_id: &str) -> AppResult<Vec<TestResult>> {
            let results = self.results.read().await;
            Ok(results
                .iter()
                .rev()
                .filter(|r| r.owner_id == owner_id)
                .cloned()
                .collect())
        }
    }
}

pub mod test_helpers {
    use actix_web::http::StatusCode;

    use crate::auth::{claims::UserRole, jwt::JwtService};
    use crate::config::Config;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }

    /// `Authorization` header value for a token signed with the test secret.
    pub fn bearer_for(user_id: &str, role: UserRole) -> String {
        let jwt = JwtService::from_config(&Config::test_config());
        let token = jwt
            .create_token(user_id, &format!("{}-name", user_id), role)
            .expect("token should be created");
        format!("Bearer {}", token)
    }
}

#[cfg(test)]
mod tests {
    use super::{fixtures::*, repositories::*};
    use crate::repositories::TestResultRepository;

    #[test]
    fn test_fixture_questions_have_one_known_answer() {
        let questions = test_questions();
        assert_eq!(questions.len(), 2);
        assert!(questions[0].has_known_answer());
        assert!(!questions[1].has_known_answer());
    }

    #[tokio::test]
    async fn test_in_memory_results_are_newest_first_and_paged() {
        let repo = InMemoryTestResultRepository::new();
        let test = test_test("user-1");
        for _ in 0..3 {
            let result = crate::services::scorer::score("user-1", &test, &Default::default());
            repo.create(result).await.expect("create should succeed");
        }

        let all = repo.find_all_by_owner("user-1").await.expect("find should succeed");
        let (page, total) = repo.list_by_owner("user-1", 1, 1).await.expect("list should succeed");

        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, all[1].id);
    }
}
