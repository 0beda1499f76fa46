//! HTTP API for Architect AI.
//!
//! ## Endpoints
//!
//! - `GET /` - Liveness check
//! - `GET /plan?idea=...` - Generate a roadmap for an idea
//!
//! Provider failures are reported in the body (`{"error": ...}`) with a
//! `200` status, so clients tell success from failure by the payload key.
//! A `/plan` request without `idea` is a `400` carrying the same
//! `{"error": ...}` shape.

mod routes;
pub mod types;

pub use routes::{app_router, serve, AppState};
pub use types::*;
