//! The scheduled orchestration engine.
//!
//! One invocation of [`orchestrator::run`] scans every live workspace for
//! enabled janitor types, applies the sequential gate, dispatches each
//! admitted (workspace, type) pair to the external workflow engine, and
//! aggregates a report. A failing pair never aborts the batch: dispatch
//! errors are values in the report, not exceptions.

pub mod dispatcher;
pub mod gate;
pub mod orchestrator;
pub mod scanner;
pub mod settings;

pub use orchestrator::{OrchestrationReport, ReportError};
pub use settings::JanitorSettings;
