//! Roadmap generation: idea in, roadmap text (or error) out.
//!
//! [`RoadmapService`] is the application context: it owns the one configured
//! agent and is shared by every request. Each call builds its own [`Task`],
//! runs it through a [`Crew`] and folds the outcome into a [`RoadmapResult`].
//! Provider failures never propagate past [`RoadmapService::generate`].

use std::time::Duration;

use serde::Serialize;

use crate::agents::{AgentRef, Crew};
use crate::task::{Task, TaskStatus};

/// Outcome of one roadmap request.
///
/// Serializes to `{"roadmap": "..."}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadmapResult {
    Roadmap(String),
    Error(String),
}

impl RoadmapResult {
    pub fn status(&self) -> TaskStatus {
        match self {
            RoadmapResult::Roadmap(_) => TaskStatus::Completed,
            RoadmapResult::Error(_) => TaskStatus::Failed,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, RoadmapResult::Roadmap(_))
    }
}

/// Shared roadmap generator.
#[derive(Debug, Clone)]
pub struct RoadmapService {
    agent: AgentRef,
    timeout: Option<Duration>,
}

impl RoadmapService {
    pub fn new(agent: AgentRef, timeout: Option<Duration>) -> Self {
        Self { agent, timeout }
    }

    pub fn agent(&self) -> &AgentRef {
        &self.agent
    }

    /// Generate a roadmap for `idea`.
    ///
    /// `idea` is forwarded as-is; the empty string is a valid idea.
    pub async fn generate(&self, idea: &str) -> RoadmapResult {
        let task = Task::roadmap(idea);
        let task_id = task.id();
        tracing::info!(
            task_id = %task_id,
            status = %TaskStatus::Pending,
            idea_chars = idea.chars().count(),
            "Roadmap requested"
        );

        let crew = Crew::new(&self.agent, task);
        let result = match crew.kickoff(self.timeout).await {
            Ok(roadmap) => RoadmapResult::Roadmap(roadmap),
            Err(e) => {
                tracing::warn!(task_id = %task_id, kind = %e.kind, "Roadmap generation failed: {}", e);
                RoadmapResult::Error(format!("AI process failed: {}", e))
            }
        };

        tracing::info!(task_id = %task_id, status = %result.status(), "Roadmap request finished");
        result
    }
}
