//! Task type: one unit of work for the agent.
//!
//! # Invariants
//! - `idea` is carried verbatim into `description`, no validation or escaping
//! - a task is built per request and never shared

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task, used to correlate log lines of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Create a new unique task ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a task in its lifecycle.
///
/// # State Machine
/// ```text
/// Pending -> Completed
///        \-> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task built, runner invoked
    Pending,
    /// Provider returned a roadmap
    Completed,
    /// Provider call failed
    Failed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A task to be executed by an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for this task
    id: TaskId,

    /// Caller-supplied idea
    idea: String,

    /// Prompt describing what to produce
    description: String,

    /// Contract for the shape of the answer
    expected_output: String,
}

impl Task {
    /// Create a task from an explicit description and expected output.
    pub fn new(
        idea: impl Into<String>,
        description: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> Self {
        Self {
            id: TaskId::new(),
            idea: idea.into(),
            description: description.into(),
            expected_output: expected_output.into(),
        }
    }

    /// Build the roadmap task for `idea`.
    pub fn roadmap(idea: &str) -> Self {
        Self::new(idea, roadmap_description(idea), ROADMAP_EXPECTED_OUTPUT)
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn idea(&self) -> &str {
        &self.idea
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn expected_output(&self) -> &str {
        &self.expected_output
    }

    /// Render the user prompt sent to the model.
    pub fn prompt(&self) -> String {
        format!(
            "{}\n\nThis is the expected criteria for your final answer: {}\n\
             You MUST return the actual complete content as the final answer, not a summary.",
            self.description, self.expected_output
        )
    }
}

const ROADMAP_EXPECTED_OUTPUT: &str = concat!(
    "A structured roadmap in Markdown. ",
    "STRICT RULE: Do NOT include any 'Thought:' or 'Thinking Process' sections. ",
    "Start directly with the Step 1 Title. Use ### for step titles. ",
    "Use standard Markdown code blocks with language identifiers (e.g., ```python)."
);

fn roadmap_description(idea: &str) -> String {
    format!(
        "Create a professional engineering roadmap for: {}. \
         For EACH step, you MUST provide: \
         1. A clear Title. \
         2. A technical explanation. \
         3. A 'Quick Start' code snippet wrapped in triple backticks. \
         4. A Milestone.",
        idea
    )
}
