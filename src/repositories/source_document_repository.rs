use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{db::{Database, SOURCE_DOCUMENTS}, errors::AppResult, models::domain::SourceDocument};

#[async_trait]
pub trait SourceDocumentRepository: Send + Sync {
    async fn create(&self, document: SourceDocument) -> AppResult<SourceDocument>;
    async fn find_for_owner(&self, id: &str, owner_id: &str) -> AppResult<Option<SourceDocument>>;
    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<SourceDocument>, i64)>;
}

pub struct MongoSourceDocumentRepository {
    collection: Collection<SourceDocument>,
}

impl MongoSourceDocumentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(SOURCE_DOCUMENTS);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for source_documents collection");

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
            .keys(doc! { "owner_id": 1, "uploaded_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("owner_uploaded_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(owner_index).await?;

        log::info!("Successfully created indexes for source_documents collection");
        Ok(())
    }
}

#[async_trait]
impl SourceDocumentRepository for MongoSourceDocumentRepository {
    async fn create(&self, document: SourceDocument) -> AppResult<SourceDocument> {
        self.collection.insert_one(&document).await?;
        Ok(document)
    }

    async fn find_for_owner(&self, id: &str, owner_id: &str) -> AppResult<Option<SourceDocument>> {
        let document = self
            .collection
            .find_one(doc! { "id": id, "owner_id": owner_id })
            .await?;
        Ok(document)
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<SourceDocument>, i64)> {
        let filter = doc! { "owner_id": owner_id };
        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "uploaded_at": -1 })
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = self.collection.find(filter).with_options(find_options).await?;
        let items: Vec<SourceDocument> = cursor.try_collect().await?;

        Ok((items, total))
    }
}
