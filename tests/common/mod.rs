#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use forgeprep_server::{
    app_state::{AppState, Repositories},
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{SourceDocument, Test, TestResult},
    repositories::{SourceDocumentRepository, TestRepository, TestResultRepository},
    services::generation_provider::{CompletionRequest, TextGenerator},
};

fn page<T: Clone>(items: Vec<T>, offset: i64, limit: i64) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let page = items
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect();
    (page, total)
}

#[derive(Default)]
pub struct InMemorySourceDocumentRepository {
    documents: RwLock<Vec<SourceDocument>>,
}

#[async_trait]
impl SourceDocumentRepository for InMemorySourceDocumentRepository {
    async fn create(&self, document: SourceDocument) -> AppResult<SourceDocument> {
        let mut documents = self.documents.write().await;
        if documents.iter().any(|d| d.id == document.id) {
            return Err(AppError::DatabaseError("duplicate id".to_string()));
        }
        documents.push(document.clone());
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
        owned.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(page(owned, offset, limit))
    }
}

#[derive(Default)]
pub struct InMemoryTestRepository {
    tests: RwLock<Vec<Test>>,
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
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page(owned, offset, limit))
    }
}

#[derive(Default)]
pub struct InMemoryTestResultRepository {
    results: RwLock<Vec<TestResult>>,
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
        Ok(page(owned, offset, limit))
    }

    async fn find_all_by_owner(&self, owner_id: &str) -> AppResult<Vec<TestResult>> {
        let results = self.results.read().await;
        let mut owned: Vec<_> = results
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(owned)
    }
}

/// Replays canned provider replies in order and records every request.
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<AppResult<String>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<AppResult<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| Err(AppError::GenerationProvider("no scripted reply".to_string())))
    }
}

pub fn config() -> Config {
    let mut config = Config::from_env();
    config.generation.source_char_limit = 10_000;
    config
}

pub fn app_state(generator: Arc<ScriptedGenerator>) -> AppState {
    AppState::from_parts(
        config(),
        Repositories {
            documents: Arc::new(InMemorySourceDocumentRepository::default()),
            tests: Arc::new(InMemoryTestRepository::default()),
            results: Arc::new(InMemoryTestResultRepository::default()),
        },
        generator,
    )
}

pub const LETTERED_REPLY: &str = "Here is your test.\n\n\
    1. Which organelle produces ATP?\n\
    a) Nucleus\n\
    b) Mitochondria\n\
    c) Ribosome\n\
    d) Golgi apparatus\n\n\
    2. What do plants absorb for photosynthesis?\n\
    a) Oxygen\n\
    b) Nitrogen\n\
    c) Carbon dioxide\n\
    d) Helium\n\n\
    Answers:\n\
    1. b\n\
    2. c\n";
