use std::collections::{BTreeMap, HashMap};

use async_graphql::InputObject;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::services::prompt_builder::GenerationParams;

pub const DEFAULT_QUESTION_COUNT: u32 = 10;
pub const DEFAULT_DIFFICULTY: &str = "medium";

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct CreateSourceDocumentRequest {
    #[validate(length(min = 1, max = 255))]
    pub filename: String,

    #[validate(length(max = 2000000))]
    pub extracted_text: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct GenerateTestRequest {
    #[validate(length(min = 1, max = 64))]
    pub document_id: String,

    #[validate(length(max = 200))]
    pub topic: Option<String>,

    #[validate(length(max = 50))]
    pub difficulty: Option<String>,

    #[validate(range(min = 1, max = 50, message = "Number of questions must be between 1 and 50"))]
    pub num_questions: Option<u32>,

    /// Full prompt override; the study material is still appended.
    #[validate(length(max = 4000))]
    pub prompt: Option<String>,
}

/// Trimmed text, or `None` when absent or blank.
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl GenerateTestRequest {
    /// Blank optional fields fall back to their defaults.
    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            topic: non_blank(&self.topic),
            difficulty: non_blank(&self.difficulty).unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string()),
            num_questions: self.num_questions.unwrap_or(DEFAULT_QUESTION_COUNT),
            prompt_override: non_blank(&self.prompt),
        }
    }
}

/// Submitted answers keyed by zero-based question index.
///
/// Clients send either an object keyed by index (`{"0": "Paris"}`) or a
/// positional array; both are normalized here so scoring only ever sees
/// integer keys. Keys that are not indices and non-scalar values are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawAnswers")]
pub struct SubmittedAnswers(BTreeMap<usize, String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnswers {
    Keyed(HashMap<String, Value>),
    Positional(Vec<Value>),
}

fn scalar_answer(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl From<RawAnswers> for SubmittedAnswers {
    fn from(raw: RawAnswers) -> Self {
        let answers = match raw {
            RawAnswers::Keyed(map) => map
                .into_iter()
                .filter_map(|(key, value)| {
                    let index = key.trim().parse::<usize>().ok()?;
                    Some((index, scalar_answer(value)?))
                })
                .collect(),
            RawAnswers::Positional(list) => list
                .into_iter()
                .enumerate()
                .filter_map(|(index, value)| Some((index, scalar_answer(value)?)))
                .collect(),
        };
        SubmittedAnswers(answers)
    }
}

impl FromIterator<(usize, String)> for SubmittedAnswers {
    fn from_iter<I: IntoIterator<Item = (usize, String)>>(iter: I) -> Self {
        SubmittedAnswers(iter.into_iter().collect())
    }
}

impl SubmittedAnswers {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String-keyed copy for persistence, since BSON documents need string keys.
    pub fn to_keyed_map(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(index, answer)| (index.to_string(), answer.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitTestRequest {
    pub answers: SubmittedAnswers,
}

#[derive(Debug, Clone, InputObject)]
pub struct AnswerInput {
    pub index: i32,
    pub answer: String,
}

#[derive(Debug, Clone, InputObject)]
pub struct SubmitTestInput {
    pub test_id: String,
    pub answers: Vec<AnswerInput>,
}

impl SubmitTestInput {
    pub fn submitted_answers(&self) -> SubmittedAnswers {
        self.answers
            .iter()
            .filter_map(|a| usize::try_from(a.index).ok().map(|i| (i, a.answer.clone())))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}
