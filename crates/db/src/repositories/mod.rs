//! Repository layer: unit structs with static async fns on `&PgPool`.

mod janitor_config_repo;
mod janitor_run_repo;
mod pull_request_repo;
mod repository_repo;
mod scm_credential_repo;
mod swarm_repo;
mod task_repo;
mod user_repo;
mod workspace_repo;

pub use janitor_config_repo::JanitorConfigRepo;
pub use janitor_run_repo::JanitorRunRepo;
pub use pull_request_repo::PullRequestRepo;
pub use repository_repo::RepositoryRepo;
pub use scm_credential_repo::ScmCredentialRepo;
pub use swarm_repo::SwarmRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
pub use workspace_repo::WorkspaceRepo;
