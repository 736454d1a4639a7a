// repo-cards: render GitHub repository metadata as project cards.
// Fetches a fixed list of repositories, caches them per session with a TTL, and builds HTML cards.

pub mod cache;
pub mod config;
pub mod document;
pub mod error;
pub mod github;
pub mod pipeline;
pub mod render;

pub use config::ProjectsConfig;
pub use error::{CardsError, Result};
pub use pipeline::{LoadReport, LoadSource, ProjectLoader, ProjectOutcome, ProjectResult, SkipReason};
