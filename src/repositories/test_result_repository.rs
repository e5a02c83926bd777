use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{db::{Database, TEST_RESULTS}, errors::AppResult, models::domain::TestResult};

#[async_trait]
pub trait TestResultRepository: Send + Sync {
    async fn create(&self, result: TestResult) -> AppResult<TestResult>;
    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<TestResult>, i64)>;
    /// Every result the owner has, newest first. Used for summaries.
    async fn find_all_by_owner(&self, owner_id: &str) -> AppResult<Vec<TestResult>>;
}

pub struct MongoTestResultRepository {
    collection: Collection<TestResult>,
}

impl MongoTestResultRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(TEST_RESULTS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for test_results collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let owner_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1, "submitted_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("owner_submitted_at".to_string())
                    .build(),
            )
            .build();

        let test_index = IndexModel::builder()
            .keys(doc! { "test_id": 1 })
            .options(IndexOptions::builder().name("test_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(owner_index).await?;
        self.collection.create_index(test_index).await?;

        log::info!("Successfully created indexes for test_results collection");
        Ok(())
    }
}

#[async_trait]
impl TestResultRepository for MongoTestResultRepository {
    async fn create(&self, result: TestResult) -> AppResult<TestResult> {
        self.collection.insert_one(&result).await?;
        Ok(result)
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<TestResult>, i64)> {
        let filter = doc! { "owner_id": owner_id };
        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "submitted_at": -1 })
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = self.collection.find(filter).with_options(find_options).await?;
        let items: Vec<TestResult> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn find_all_by_owner(&self, owner_id: &str) -> AppResult<Vec<TestResult>> {
        let cursor = self
            .collection
            .find(doc! { "owner_id": owner_id })
            .sort(doc! { "submitted_at": -1 })
            .await?;
        let items: Vec<TestResult> = cursor.try_collect().await?;
        Ok(items)
    }
}
