//! Task module - the single unit of work handed to the agent per request.

#[allow(clippy::module_inception)]
pub mod task;

pub use task::{Task, TaskId, TaskStatus};
