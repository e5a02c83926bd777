use once_cell::sync::Lazy;

use crate::{
    config::{GenerationConfig, PromptStyle},
    constants::prompts::{
        JSON_TEST_PROMPT, LETTERED_TEST_PROMPT, STUDY_MATERIAL_HEADER,
        TEST_GENERATOR_SYSTEM_PROMPT,
    },
    models::domain::Question,
    services::generation_provider::CompletionRequest,
};

const TOKENS_PER_QUESTION: u32 = 150;

static QUESTION_LIST_SCHEMA: Lazy<String> = Lazy::new(|| {
    serde_json::to_string_pretty(&schemars::schema_for!(Vec<Question>)).unwrap_or_default()
});

/// Caller-controlled knobs for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    pub topic: Option<String>,
    pub difficulty: String,
    pub num_questions: u32,
    pub prompt_override: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    model: String,
    temperature: f32,
    max_tokens_cap: u32,
    source_char_limit: usize,
    style: PromptStyle,
}

/// Returns at most `limit` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

impl PromptBuilder {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens_cap: config.max_tokens_cap,
            source_char_limit: config.source_char_limit,
            style: config.prompt_style,
        }
    }

    pub fn with_style(mut self, style: PromptStyle) -> Self {
        self.style = style;
        self
    }

    /// The portion of the source text that will actually be sent to the provider.
    pub fn prepare_source<'a>(&self, source_text: &'a str) -> &'a str {
        truncate_chars(source_text.trim(), self.source_char_limit)
    }

    /// Builds the provider request. The caller has already rejected empty sources.
    pub fn build(&self, source_text: &str, params: &GenerationParams) -> CompletionRequest {
        let material = self.prepare_source(source_text);

        let instructions = match &params.prompt_override {
            Some(prompt) => prompt.clone(),
            None => self.default_instructions(params),
        };

        CompletionRequest {
            model: self.model.clone(),
            system: TEST_GENERATOR_SYSTEM_PROMPT.to_string(),
            user: format!("{}{}{}", instructions, STUDY_MATERIAL_HEADER, material),
            max_tokens: params
                .num_questions
                .saturating_mul(TOKENS_PER_QUESTION)
                .min(self.max_tokens_cap),
            temperature: self.temperature,
        }
    }

    fn default_instructions(&self, params: &GenerationParams) -> String {
        let template = match self.style {
            PromptStyle::Json => JSON_TEST_PROMPT,
            PromptStyle::Lettered => LETTERED_TEST_PROMPT,
        };

        let topic = params
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("general");

        template
            .replace("{count}", &params.num_questions.to_string())
            .replace("{topic}", topic)
            .replace("{difficulty}", params.difficulty.trim())
            .replace("{schema}", &QUESTION_LIST_SCHEMA)
    }
}
