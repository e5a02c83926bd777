use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoSourceDocumentRepository, MongoTestRepository, MongoTestResultRepository,
        SourceDocumentRepository, TestRepository, TestResultRepository,
    },
    services::{
        generation_provider::{OpenAiTextGenerator, TextGenerator},
        source_document_service::SourceDocumentService,
        test_generator::TestGenerator,
        test_service::TestService,
    },
};

/// Repository handles used to assemble the services.
pub struct Repositories {
    pub documents: Arc<dyn SourceDocumentRepository>,
    pub tests: Arc<dyn TestRepository>,
    pub results: Arc<dyn TestResultRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub document_service: Arc<SourceDocumentService>,
    pub test_service: Arc<TestService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
    /// `None` when running without MongoDB (tests).
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let documents = Arc::new(MongoSourceDocumentRepository::new(&db));
        documents.ensure_indexes().await?;
        let tests = Arc::new(MongoTestRepository::new(&db));
        tests.ensure_indexes().await?;
        let results = Arc::new(MongoTestResultRepository::new(&db));
        results.ensure_indexes().await?;

        let provider = Arc::new(OpenAiTextGenerator::new(&config.generation));

        let mut state = Self::from_parts(
            config,
            Repositories {
                documents,
                tests,
                results,
            },
            provider,
        );
        state.db = Some(db);
        Ok(state)
    }

    /// Wires services from already-built repositories and provider.
    pub fn from_parts(
        config: Config,
        repositories: Repositories,
        provider: Arc<dyn TextGenerator>,
    ) -> Self {
        let generator = Arc::new(TestGenerator::new(&config.generation, provider));

        let document_service = Arc::new(SourceDocumentService::new(
            repositories.documents.clone(),
        ));
        let test_service = Arc::new(TestService::new(
            repositories.documents,
            repositories.tests,
            repositories.results,
            generator,
        ));

        Self {
            document_service,
            test_service,
            jwt_service: Arc::new(JwtService::from_config(&config)),
            config: Arc::new(config),
            db: None,
        }
    }
}
