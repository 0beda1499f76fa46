//! Provider-qualified model identifiers (`<provider>/<model-name>`).

use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// LLM providers reachable through an OpenAI-compatible endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    HuggingFace,
    OpenRouter,
    Groq,
    OpenAi,
}

impl Provider {
    /// Prefix used in model identifiers.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::HuggingFace => "huggingface",
            Self::OpenRouter => "openrouter",
            Self::Groq => "groq",
            Self::OpenAi => "openai",
        }
    }

    /// Default chat-completions base URL (without the `/chat/completions` suffix).
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::HuggingFace => "https://router.huggingface.co/v1",
            Self::OpenRouter => "https://openrouter.ai/api/v1",
            Self::Groq => "https://api.groq.com/openai/v1",
            Self::OpenAi => "https://api.openai.com/v1",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix.to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Some(Self::HuggingFace),
            "openrouter" => Some(Self::OpenRouter),
            "groq" => Some(Self::Groq),
            "openai" => Some(Self::OpenAi),
            _ => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A model identifier split into provider and upstream model name.
///
/// Only the first `/` separates the provider, so
/// `huggingface/meta-llama/Meta-Llama-3-8B-Instruct` resolves to the
/// HuggingFace provider and the model `meta-llama/Meta-Llama-3-8B-Instruct`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelId {
    provider: Provider,
    name: String,
}

impl ModelId {
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Model name as the provider expects it in the request body.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for ModelId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || ConfigError::UnknownModel(s.to_string());
        let (prefix, name) = s.trim().split_once('/').ok_or_else(unknown)?;
        let provider = Provider::from_prefix(prefix).ok_or_else(unknown)?;
        if name.trim().is_empty() {
            return Err(unknown());
        }
        Ok(Self {
            provider,
            name: name.trim().to_string(),
        })
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.provider, self.name)
    }
}
