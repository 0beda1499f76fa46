//! # Architect AI
//!
//! HTTP backend that turns a project idea into an engineering roadmap
//! written by an LLM acting as a technical mentor.
//!
//! ## Architecture
//!
//! ```text
//!   GET /plan?idea=...
//!          │
//!          ▼
//!   ┌────────────────┐     ┌──────────────┐     ┌────────────────────┐
//!   │ RoadmapService │ ──▶ │ Crew         │ ──▶ │ LLM provider       │
//!   │ (one Agent)    │     │ (1 agent,    │     │ /chat/completions  │
//!   └────────────────┘     │  1 task)     │     └────────────────────┘
//!          │               └──────────────┘
//!          ▼
//!   {"roadmap": ...} | {"error": ...}
//! ```
//!
//! ## Modules
//! - `agents`: agent persona, model binding and the single-task crew
//! - `task`: roadmap task and its prompt contract
//! - `roadmap`: request-level orchestration and the result type
//! - `llm`: provider client
//! - `api`: axum routes

pub mod agents;
pub mod api;
pub mod config;
pub mod llm;
pub mod roadmap;
pub mod task;

pub use config::Config;
pub use roadmap::{RoadmapResult, RoadmapService};
