use std::time::{Duration, Instant};

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::{
    config::GenerationConfig,
    errors::{AppError, AppResult},
};

/// One chat-completion call: a system/user message pair plus sampling limits.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Text-generation backend. Implementations make exactly one upstream call per
/// invocation and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionReply {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: Option<u64>,
    completion_tokens: Option<u64>,
}

/// OpenAI-compatible chat completion client. Credentials and endpoint are
/// injected at construction.
pub struct OpenAiTextGenerator {
    client: Client<OpenAIConfig>,
    timeout: Duration,
}

impl OpenAiTextGenerator {
    pub fn new(config: &GenerationConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        // Zero elapsed budget: a transient 5xx/429 is returned on the first attempt.
        let single_attempt = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Self {
            client: Client::with_config(openai_config).with_backoff(single_attempt),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        let body = ChatCompletionBody {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        log::info!(
            "Requesting completion from model {} (prompt {} chars, max_tokens {})",
            request.model,
            request.user.len(),
            request.max_tokens
        );

        let started = Instant::now();
        let reply: ChatCompletionReply =
            tokio::time::timeout(self.timeout, self.client.chat().create_byot(body))
                .await
                .map_err(|_| {
                    log::warn!("Completion timed out after {:?}", self.timeout);
                    AppError::GenerationTimeout(self.timeout.as_secs())
                })?
                .map_err(|e| {
                    log::error!("Completion request failed: {}", e);
                    AppError::from(e)
                })?;

        if let Some(usage) = &reply.usage {
            log::info!(
                "Completion finished in {:?} (prompt_tokens={:?}, completion_tokens={:?})",
                started.elapsed(),
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                AppError::GenerationProvider("Provider returned no message content".to_string())
            })
    }
}
