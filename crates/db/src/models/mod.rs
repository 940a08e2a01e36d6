//! Entity structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Where relevant, an update DTO with all-`Option` fields for patches

pub mod janitor_config;
pub mod janitor_run;
pub mod pull_request;
pub mod repository;
pub mod scm_credential;
pub mod swarm;
pub mod task;
pub mod user;
pub mod workspace;
