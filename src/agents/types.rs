//! Core types for the agent.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(Uuid);

impl AgentId {
    /// Create a new unique agent ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static persona text that shapes every answer of an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl Persona {
    /// The technical mentor persona used for roadmap generation.
    pub fn architect() -> Self {
        Self {
            role: "Senior AI Architect & Technical Mentor".to_string(),
            goal: "Empower aspiring engineers by providing actionable project roadmaps."
                .to_string(),
            backstory: concat!(
                "You are a Senior AI Solutions Architect with 15+ years of experience at NVIDIA and Google. ",
                "You now specialize in technical mentoring, turning ambitious research ideas into concrete ",
                "4-step engineering plans. You focus heavily on MLOps, data integrity, and practical ",
                "resource management, ensuring projects are viable on standard hardware while remaining innovative."
            )
            .to_string(),
        }
    }

    /// Render the persona as a system prompt.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.role, self.backstory, self.goal
        )
    }
}
