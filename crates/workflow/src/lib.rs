//! Client for the external asynchronous workflow engine.
//!
//! The engine accepts a "start workflow" request over HTTP, performs the
//! maintenance work out of band, and reports completion later through a
//! webhook carrying the run identifier returned here. [`WorkflowDispatch`]
//! is the seam the orchestrator dispatches through, so tests can substitute
//! a scripted engine.

pub mod api;
pub mod dispatch;

pub use api::{WorkflowApi, WorkflowApiConfig};
pub use dispatch::{StartRunRequest, StartedRun, WorkflowDispatch, WorkflowError};
