//! Agent configuration.
//!
//! An [`Agent`] is a persona bound to one model and one credential. The
//! service builds exactly one at startup and shares it read-only between
//! requests; nothing about it changes after construction.

mod crew;
mod types;

pub use crew::Crew;
pub use types::{AgentId, Persona};

use std::sync::Arc;

use crate::config::{Config, ConfigError};
use crate::llm::{ChatCompletionsClient, ChatOptions, LlmClient, ModelId};

/// Shared reference to the configured agent.
pub type AgentRef = Arc<Agent>;

/// A persona bound to a model and an LLM client.
pub struct Agent {
    id: AgentId,
    persona: Persona,
    model: ModelId,
    options: ChatOptions,
    llm: Arc<dyn LlmClient>,
}

impl Agent {
    /// Build an agent around an existing client.
    pub fn new(persona: Persona, model: ModelId, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            id: AgentId::new(),
            persona,
            model,
            options: ChatOptions::default(),
            llm,
        }
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn id(&self) -> &AgentId {
        &self.id
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn model(&self) -> &ModelId {
        &self.model
    }

    pub fn options(&self) -> &ChatOptions {
        &self.options
    }

    pub fn llm(&self) -> &dyn LlmClient {
        self.llm.as_ref()
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("role", &self.persona.role)
            .field("model", &self.model.to_string())
            .finish_non_exhaustive()
    }
}

/// Bind the architect persona to `model_id` using `credential`.
///
/// Does not touch the network; a bad credential only shows up on the first
/// provider call.
///
/// # Errors
///
/// `ConfigError::MissingCredential` for a blank credential and
/// `ConfigError::UnknownModel` when the identifier does not name a supported provider.
pub fn configure(model_id: &str, credential: &str) -> Result<Agent, ConfigError> {
    let (model, credential) = validate(model_id, credential)?;
    let client = ChatCompletionsClient::new(model.provider(), credential);
    Ok(Agent::new(Persona::architect(), model, Arc::new(client)))
}

/// Build the agent from the full service configuration, honoring the base URL
/// override and the completion token cap.
pub fn from_config(config: &Config) -> Result<Agent, ConfigError> {
    let (model, credential) = validate(&config.model, &config.api_key)?;
    let client = match config.llm_base_url.as_deref() {
        Some(base_url) => ChatCompletionsClient::with_base_url(base_url, credential),
        None => ChatCompletionsClient::new(model.provider(), credential),
    };
    let options = ChatOptions {
        max_tokens: config.llm_max_tokens,
        ..ChatOptions::default()
    };
    Ok(Agent::new(Persona::architect(), model, Arc::new(client)).with_options(options))
}

fn validate(model_id: &str, credential: &str) -> Result<(ModelId, String), ConfigError> {
    let credential = credential.trim();
    if credential.is_empty() {
        return Err(ConfigError::MissingCredential);
    }
    let model = model_id.parse::<ModelId>()?;
    Ok((model, credential.to_string()))
}
