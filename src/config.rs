use std::env;
use std::str::FromStr;

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const DEFAULT_OPENAI_KEY: &str = "sk-local-placeholder";

/// Which default instruction template the prompt builder emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptStyle {
    Json,
    Lettered,
}

impl FromStr for PromptStyle {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "json" => Ok(PromptStyle::Json),
            "lettered" | "text" => Ok(PromptStyle::Lettered),
            other => Err(format!("unknown prompt style '{}'", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GenerationConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens_cap: u32,
    pub source_char_limit: usize,
    pub prompt_style: PromptStyle,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub cors_allowed_origin: String,
    pub generation: GenerationConfig,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env_or("MONGO_CONN_STRING", "mongodb://localhost:27017"),
            mongo_db_name: env_or("MONGO_DB_NAME", "forgeprep-local"),
            web_server_host: env_or("WEB_SERVER_HOST", "localhost"),
            web_server_port: env_parse("WEB_SERVER_PORT", 8080),
            jwt_secret: SecretString::from(env_or("JWT_SECRET", DEFAULT_JWT_SECRET)),
            jwt_expiration_hours: env_parse("JWT_EXPIRATION_HOURS", 24),
            cors_allowed_origin: env_or("CORS_ALLOWED_ORIGIN", "http://localhost:5173"),
            generation: GenerationConfig {
                api_key: SecretString::from(env_or("OPENAI_API_KEY", DEFAULT_OPENAI_KEY)),
                base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                model: env_or("OPENAI_MODEL", "gpt-4.1-nano"),
                timeout_secs: env_parse("GENERATION_TIMEOUT_SECS", 60),
                temperature: env_parse("GENERATION_TEMPERATURE", 0.7),
                max_tokens_cap: env_parse("GENERATION_MAX_TOKENS", 2000),
                source_char_limit: env_parse("SOURCE_CHAR_LIMIT", 10_000),
                prompt_style: env_parse("PROMPT_STYLE", PromptStyle::Json),
            },
        }
    }

    /// Rejects configuration that still carries development secrets.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using the default value".to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}), must be at least 32 characters",
                jwt_secret.len()
            )));
        }

        if self.generation.api_key.expose_secret() == DEFAULT_OPENAI_KEY {
            return Err(AppError::InternalError(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "forgeprep-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            cors_allowed_origin: "http://localhost:5173".to_string(),
            generation: GenerationConfig {
                api_key: SecretString::from("sk-test".to_string()),
                base_url: "http://localhost:9999/v1".to_string(),
                model: "gpt-4.1-nano".to_string(),
                timeout_secs: 5,
                temperature: 0.7,
                max_tokens_cap: 2000,
                source_char_limit: 10_000,
                prompt_style: PromptStyle::Json,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(config.generation.source_char_limit > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_db_name, "forgeprep-test");
        assert_eq!(config.generation.model, "gpt-4.1-nano");
        assert_eq!(config.generation.prompt_style, PromptStyle::Json);
    }

    #[test]
    fn test_prompt_style_parsing() {
        assert_eq!("json".parse::<PromptStyle>(), Ok(PromptStyle::Json));
        assert_eq!(" Lettered ".parse::<PromptStyle>(), Ok(PromptStyle::Lettered));
        assert!("yaml".parse::<PromptStyle>().is_err());
    }

    #[test]
    fn test_test_config_fails_production_validation() {
        let config = Config::test_config();
        assert!(config.validate_for_production().is_err());
    }
}
