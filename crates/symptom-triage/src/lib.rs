//! Rule-based symptom triage.
//!
//! The [`triage`] module holds the engine: a static rule table, a matcher over canonicalized
//! symptom names, a ranking pass, and the aggregation that turns the ranking into advice.
//! The remaining modules carry the service plumbing shared with the API binary.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod triage;
