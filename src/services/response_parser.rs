//! Normalizes raw provider output into [`Question`] records.
//!
//! Parsing runs in two phases. The JSON phase returns a tagged
//! [`JsonOutcome`]; when it asks for the fallback, the lettered-text phase
//! extracts `1. question` / `a)`..`d)` blocks and reconciles them against a
//! trailing `Answers:` key. Malformed entries are dropped silently; only an
//! empty final result is an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Difficulty, Question},
};

static LETTERED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ims)^[ \t]*(\d+)[.)][ \t]*(.+?)\n\s*a\)[ \t]*([^\n]+)\n\s*b\)[ \t]*([^\n]+)\n\s*c\)[ \t]*([^\n]+)\n\s*d\)[ \t]*([^\n]+)",
    )
    .expect("LETTERED_BLOCK is a valid regex pattern")
});

static NUMBERED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(\d+)[.)][ \t]+").expect("NUMBERED_LINE is a valid regex pattern")
});

static ANSWERS_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\banswers[ \t]*:").expect("ANSWERS_LABEL is a valid regex pattern")
});

static ANSWER_KEY_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*[.)]\s*\(?([a-d])\b").expect("ANSWER_KEY_ENTRY is a valid regex pattern")
});

/// Result of the JSON phase.
#[derive(Debug, PartialEq)]
pub enum JsonOutcome {
    Questions(Vec<Question>),
    NeedsFallback(&'static str),
}

/// Parses raw provider output. Returns [`AppError::NoValidQuestions`] when
/// neither phase yields a usable question.
pub fn parse(raw_output: &str) -> AppResult<Vec<Question>> {
    let normalized = raw_output.replace("\r\n", "\n");

    let reason = match parse_json(&normalized) {
        JsonOutcome::Questions(questions) => {
            log::debug!("Parsed {} questions from JSON output", questions.len());
            return Ok(questions);
        }
        JsonOutcome::NeedsFallback(reason) => reason,
    };

    log::debug!("JSON parse unusable ({}), trying lettered layout", reason);

    let questions = parse_lettered(&normalized);
    if questions.is_empty() {
        return Err(AppError::NoValidQuestions(format!(
            "{}; no numbered questions with a) to d) options found",
            reason
        )));
    }

    log::debug!("Parsed {} questions from lettered output", questions.len());
    Ok(questions)
}

/// JSON phase: a top-level list, or an object with a `questions` list.
pub fn parse_json(raw_output: &str) -> JsonOutcome {
    let mut saw_json = false;

    for value in json_values(raw_output) {
        saw_json = true;

        let items = match &value {
            Value::Array(items) => items,
            Value::Object(map) => match map.get("questions") {
                Some(Value::Array(items)) => items,
                _ => continue,
            },
            _ => continue,
        };

        let questions: Vec<Question> = items.iter().filter_map(question_from_value).collect();
        if !questions.is_empty() {
            return JsonOutcome::Questions(questions);
        }
    }

    if saw_json {
        JsonOutcome::NeedsFallback("JSON output contained no valid questions")
    } else {
        JsonOutcome::NeedsFallback("output is not valid JSON")
    }
}

/// Whole output without code fences first, then the first complete JSON
/// value starting at each `[` or `{`, in order of position.
fn json_values(raw_output: &str) -> impl Iterator<Item = Value> + '_ {
    let whole = serde_json::from_str::<Value>(strip_code_fences(raw_output)).ok();

    let embedded = raw_output
        .char_indices()
        .filter(|(_, c)| matches!(c, '[' | '{'))
        .filter_map(move |(start, _)| {
            serde_json::Deserializer::from_str(&raw_output[start..])
                .into_iter::<Value>()
                .next()?
                .ok()
        });

    whole.into_iter().chain(embedded)
}

fn strip_code_fences(raw_output: &str) -> &str {
    let trimmed = raw_output.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. `json`) on the opening fence line.
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn question_from_value(value: &Value) -> Option<Question> {
    let object = value.as_object()?;

    let text = object.get("question")?.as_str()?.trim();
    if text.is_empty() {
        return None;
    }

    let options: Vec<String> = object
        .get("options")?
        .as_array()?
        .iter()
        .filter_map(scalar_text)
        .collect();

    let difficulty = object
        .get("difficulty")
        .and_then(Value::as_str)
        .map(Difficulty::from_label)
        .unwrap_or(Difficulty::Unknown);

    let mut question = Question::new(text, options, difficulty);
    if let Some(answer) = object.get("answer").and_then(scalar_text) {
        question.answer = resolve_answer(&question, answer);
    }
    Some(question)
}

/// Maps a bare option letter to its option text when the answer matches no option.
fn resolve_answer(question: &Question, answer: String) -> String {
    let matches_option = question
        .options
        .iter()
        .any(|option| option.trim().eq_ignore_ascii_case(&answer));
    if matches_option || question.options.is_empty() {
        return answer;
    }

    let mut chars = answer.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => question
            .option_for_letter(letter)
            .cloned()
            .unwrap_or(answer),
        _ => answer,
    }
}

/// A lettered block and the number the provider printed in front of it.
#[derive(Debug)]
struct NumberedQuestion {
    number: Option<usize>,
    question: Question,
}

/// Fallback phase: lettered blocks plus answer-key reconciliation.
pub fn parse_lettered(raw_output: &str) -> Vec<Question> {
    let mut blocks = Vec::new();
    let mut blocks_end = 0;

    for captures in LETTERED_BLOCK.captures_iter(raw_output) {
        if let Some(whole) = captures.get(0) {
            blocks_end = whole.end();
        }

        let (inner_number, inner_text) = innermost_question(&captures[2]);
        let text = collapse_whitespace(inner_text);
        if text.is_empty() {
            continue;
        }

        let number = inner_number.or_else(|| captures[1].parse().ok());
        let options = (3..=6)
            .map(|group| captures[group].trim().to_string())
            .collect();
        blocks.push(NumberedQuestion {
            number,
            question: Question::new(text, options, Difficulty::Medium),
        });
    }

    if !blocks.is_empty() {
        apply_answer_key(&mut blocks, &raw_output[blocks_end..]);
    }

    blocks.into_iter().map(|block| block.question).collect()
}

/// Lazy matching can start a block at an earlier numbered line; keep only the
/// text (and number) of the last numbered line inside the captured question.
fn innermost_question(text: &str) -> (Option<usize>, &str) {
    let inner = NUMBERED_LINE
        .captures_iter(text)
        .filter_map(|c| c.get(0).map(|whole| (whole, c.get(1))))
        .filter(|(whole, _)| whole.start() > 0)
        .last();

    match inner {
        Some((whole, digits)) => (
            digits.and_then(|d| d.as_str().parse().ok()),
            &text[whole.end()..],
        ),
        None => (None, text),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Fills answers from an `Answers:` block found in `remaining`. Key numbers
/// refer to the provider's own question numbers; entries naming no parsed
/// block, or a letter beyond its options, are ignored.
fn apply_answer_key(blocks: &mut [NumberedQuestion], remaining: &str) {
    let Some(label) = ANSWERS_LABEL.find(remaining) else {
        return;
    };

    for entry in ANSWER_KEY_ENTRY.captures_iter(&remaining[label.end()..]) {
        let Ok(number) = entry[1].parse::<usize>() else {
            continue;
        };
        let Some(letter) = entry[2].chars().next() else {
            continue;
        };
        let Some(block) = blocks.iter_mut().find(|b| b.number == Some(number)) else {
            continue;
        };
        if let Some(option) = block.question.option_for_letter(letter).cloned() {
            block.question.answer = option;
        }
    }
}
