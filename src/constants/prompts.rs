pub const TEST_GENERATOR_SYSTEM_PROMPT: &str = "You are a helpful test generator assistant.";

/// Separator placed between the instructions and the (truncated) study material.
pub const STUDY_MATERIAL_HEADER: &str = "\n\nStudy Material:\n";

/// Default instructions asking for a JSON array.
///
/// Placeholders: `{count}`, `{topic}`, `{difficulty}`, `{schema}`.
pub const JSON_TEST_PROMPT: &str = "Generate {count} multiple-choice questions on the topic of '{topic}' from the study material provided below. Questions should be suitable for a {difficulty} level.

Respond with a JSON array only, no prose and no markdown. Each item must be an object with:
- \"question\": the question text
- \"options\": exactly four answer options as strings
- \"answer\": the exact text of the correct option
- \"difficulty\": one of \"easy\", \"medium\" or \"hard\"

The array must conform to this JSON schema:
{schema}";

/// Default instructions asking for numbered questions, lettered options and an answer key.
///
/// Placeholders: `{count}`, `{topic}`, `{difficulty}`.
pub const LETTERED_TEST_PROMPT: &str = "Generate {count} multiple-choice questions on the topic of '{topic}' from the study material provided below. Questions should be suitable for a {difficulty} level.

Use exactly this plain-text layout and nothing else:

1. <question text>
a) <option>
b) <option>
c) <option>
d) <option>

Number the questions 1, 2, 3 and so on, with a blank line between questions. After the last question write a line containing only \"Answers:\" followed by one line per question in the form \"1. b\".";
