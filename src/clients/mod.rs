//! Resource clients, one per area of the REST API.

pub mod application;
pub mod projects;
pub mod pulls;
pub mod repos;
pub mod users;

// Re-exports
pub use application::ApplicationClient;
pub use projects::ProjectsClient;
pub use pulls::PullsClient;
pub use repos::ReposClient;
pub use users::UsersClient;
