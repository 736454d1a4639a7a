// GitHub API module.
// Provides the client and the repository type read from the GitHub REST API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use types::Repository;
