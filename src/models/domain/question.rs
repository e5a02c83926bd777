use async_graphql::{Enum, SimpleObject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stored answer for questions whose correct option could not be determined.
pub const UNKNOWN_ANSWER: &str = "Unknown";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject, JsonSchema)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    pub difficulty: Difficulty,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Enum, Copy, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Unknown,
}

impl Difficulty {
    /// Lenient parse of a provider-supplied label; anything unrecognised is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" | "intermediate" => Difficulty::Medium,
            "hard" | "difficult" => Difficulty::Hard,
            _ => Difficulty::Unknown,
        }
    }
}

impl Question {
    pub fn new(question: impl Into<String>, options: Vec<String>, difficulty: Difficulty) -> Self {
        Self {
            question: question.into(),
            options,
            answer: UNKNOWN_ANSWER.to_string(),
            difficulty,
        }
    }

    pub fn has_known_answer(&self) -> bool {
        let answer = self.answer.trim();
        !answer.is_empty() && !answer.eq_ignore_ascii_case(UNKNOWN_ANSWER)
    }

    /// Option text at a zero-based letter position (`a` = 0).
    pub fn option_for_letter(&self, letter: char) -> Option<&String> {
        let letter = letter.to_ascii_lowercase();
        if !letter.is_ascii_lowercase() {
            return None;
        }
        self.options.get((letter as u8 - b'a') as usize)
    }
}
