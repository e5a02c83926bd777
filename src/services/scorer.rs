use chrono::Utc;
use uuid::Uuid;

use crate::models::{
    domain::{Question, QuestionOutcome, Test, TestResult},
    dto::request::SubmittedAnswers,
};

/// Percentage rounded to two decimals; an empty test scores 0.
pub fn percentage(correct: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(correct) * 100.0 / f64::from(total) * 100.0).round() / 100.0
}

/// A question counts only when its stored answer is known and the submitted
/// text matches it case-insensitively after trimming.
pub fn is_correct(question: &Question, submitted: Option<&str>) -> bool {
    let Some(submitted) = submitted.map(str::trim).filter(|s| !s.is_empty()) else {
        return false;
    };
    question.has_known_answer() && submitted.to_lowercase() == question.answer.trim().to_lowercase()
}

/// Scores `answers` against `test`. Pure: the same inputs always give the same
/// counts, score and per-question outcomes.
pub fn score(owner_id: &str, test: &Test, answers: &SubmittedAnswers) -> TestResult {
    let question_results: Vec<QuestionOutcome> = test
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let submitted = answers.get(index);
            QuestionOutcome {
                index: index as u32,
                submitted: submitted.map(str::to_string),
                expected: question.answer.clone(),
                correct: is_correct(question, submitted),
            }
        })
        .collect();

    let total = question_results.len() as u32;
    let correct = question_results.iter().filter(|o| o.correct).count() as u32;

    TestResult {
        id: Uuid::new_v4().to_string(),
        owner_id: owner_id.to_string(),
        test_id: test.id.clone(),
        correct,
        total,
        score: percentage(correct, total),
        submitted_answers: answers.to_keyed_map(),
        question_results,
        submitted_at: Utc::now(),
    }
}
