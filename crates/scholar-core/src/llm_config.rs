use std::borrow::Cow;
use std::str::FromStr;

use async_openai::config::OpenAIConfig;
use scholar_utils::args::llm::LlmServices as LlmServiceArgs;
use thiserror::Error;
use url::Url;

/// OpenAI compatible chat completion endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LlmService {
    #[default]
    OpenAI,
    Gemini,
    Custom(Url),
}

#[derive(Debug, Error)]
pub enum LlmServiceError {
    #[error("Unknown service: {0}")]
    UnknownService(String),
}

impl FromStr for LlmService {
    type Err = LlmServiceError;

    /// Accepts `openai`, `gemini` or the base url of any other compatible endpoint.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LlmService::OpenAI),
            "gemini" => Ok(LlmService::Gemini),
            _ => Url::parse(s)
                .map(LlmService::Custom)
                .map_err(|_| LlmServiceError::UnknownService(s.to_string())),
        }
    }
}

impl LlmService {
    #[must_use]
    pub fn get_base(&self) -> Cow<'_, str> {
        match self {
            LlmService::OpenAI => "https://api.openai.com/v1".into(),
            LlmService::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai".into(),
            LlmService::Custom(url) => Cow::from(url.as_str().trim_end_matches('/')),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmServiceConfig {
    pub key: Option<String>,
    pub default_model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    openai: LlmServiceConfig,
    gemini: LlmServiceConfig,
    custom: LlmServiceConfig,
    pub generation_service: LlmService,
    pub generation_model: Option<String>,
}

impl TryFrom<LlmServiceArgs> for LlmConfig {
    type Error = LlmServiceError;

    fn try_from(config: LlmServiceArgs) -> Result<LlmConfig, Self::Error> {
        let generation_service = config
            .generation_service
            .as_deref()
            .map(LlmService::from_str)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            openai: LlmServiceConfig {
                key: config.openai_key,
                default_model: config.openai_default_model,
            },
            gemini: LlmServiceConfig {
                key: config.gemini_key,
                default_model: config.gemini_default_model,
            },
            custom: LlmServiceConfig {
                key: config.custom_key,
                default_model: config.custom_default_model,
            },
            generation_service,
            generation_model: config.generation_model,
        })
    }
}

impl LlmConfig {
    #[must_use]
    pub fn new(
        openai: LlmServiceConfig,
        gemini: LlmServiceConfig,
        custom: LlmServiceConfig,
        generation_service: LlmService,
        generation_model: Option<String>,
    ) -> Self {
        Self {
            openai,
            gemini,
            custom,
            generation_service,
            generation_model,
        }
    }

    #[must_use]
    pub fn get_default_model(&self, service: &LlmService) -> &str {
        match service {
            LlmService::OpenAI => self.openai.default_model.as_deref().unwrap_or("gpt-4.1-mini"),
            LlmService::Gemini => self.gemini.default_model.as_deref().unwrap_or("gemini-2.0-flash"),
            LlmService::Custom(_) => self.custom.default_model.as_deref().unwrap_or("llama-3.3-8b-instruct"),
        }
    }

    #[must_use]
    pub fn get_key(&self, service: &LlmService) -> Option<&str> {
        match service {
            LlmService::OpenAI => self.openai.key.as_deref(),
            LlmService::Gemini => self.gemini.key.as_deref(),
            LlmService::Custom(_) => self.custom.key.as_deref(),
        }
    }

    #[must_use]
    pub fn get_openai_config(&self, service: &LlmService) -> OpenAIConfig {
        let mut openai_config = OpenAIConfig::default().with_api_base(service.get_base());

        if let Some(api_key) = self.get_key(service) {
            openai_config = openai_config.with_api_key(api_key);
        }
        openai_config
    }

    /// Model used to draft notes and quizzes.
    #[must_use]
    pub fn get_generation_model(&self) -> &str {
        if let Some(model) = &self.generation_model {
            model.as_str()
        } else {
            tracing::debug!("Using default model for generation");
            self.get_default_model(&self.generation_service)
        }
    }

    #[must_use]
    pub fn get_generation_openai_config(&self) -> OpenAIConfig {
        self.get_openai_config(&self.generation_service)
    }
}
