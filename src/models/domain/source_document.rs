use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceDocument {
    pub id: String,
    pub owner_id: String,
    pub filename: String,
    pub extracted_text: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub uploaded_at: DateTime<Utc>,
}

impl SourceDocument {
    pub fn new(owner_id: &str, filename: &str, extracted_text: &str) -> Self {
        SourceDocument {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            filename: filename.to_string(),
            extracted_text: extracted_text.to_string(),
            uploaded_at: Utc::now(),
        }
    }

    pub fn has_text(&self) -> bool {
        !self.extracted_text.trim().is_empty()
    }
}
