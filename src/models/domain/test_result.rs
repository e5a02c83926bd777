use std::collections::BTreeMap;

use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scored submission against a [`Test`](super::Test). Append-only.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, SimpleObject)]
pub struct TestResult {
    pub id: String,
    pub owner_id: String,
    pub test_id: String,
    pub correct: u32,
    pub total: u32,
    pub score: f64,
    #[graphql(skip)]
    pub submitted_answers: BTreeMap<String, String>,
    pub question_results: Vec<QuestionOutcome>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub submitted_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuestionOutcome {
    pub index: u32,
    pub submitted: Option<String>,
    pub expected: String,
    pub correct: bool,
}

impl TestResult {
    pub fn incorrect(&self) -> u32 {
        self.total.saturating_sub(self.correct)
    }
}
