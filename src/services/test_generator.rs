use std::sync::Arc;

use crate::{
    config::GenerationConfig,
    errors::{AppError, AppResult},
    services::{
        generation_provider::TextGenerator,
        prompt_builder::{GenerationParams, PromptBuilder},
    },
};

/// Turns source text plus caller parameters into raw provider output.
pub struct TestGenerator {
    prompt_builder: PromptBuilder,
    provider: Arc<dyn TextGenerator>,
}

impl TestGenerator {
    pub fn new(config: &GenerationConfig, provider: Arc<dyn TextGenerator>) -> Self {
        Self {
            prompt_builder: PromptBuilder::new(config),
            provider,
        }
    }

    pub fn with_prompt_builder(prompt_builder: PromptBuilder, provider: Arc<dyn TextGenerator>) -> Self {
        Self {
            prompt_builder,
            provider,
        }
    }

    pub fn prompt_builder(&self) -> &PromptBuilder {
        &self.prompt_builder
    }

    /// One provider call per invocation. Empty or whitespace-only sources are
    /// rejected before anything is sent.
    pub async fn generate(&self, source_text: &str, params: &GenerationParams) -> AppResult<String> {
        if source_text.trim().is_empty() {
            return Err(AppError::EmptySource(
                "Source document has no extractable text".to_string(),
            ));
        }

        let request = self.prompt_builder.build(source_text, params);
        self.provider.complete(request).await
    }
}
