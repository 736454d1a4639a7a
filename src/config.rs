// Pipeline configuration.
// A single immutable value describing which repositories to show and how to cache them.

use std::time::Duration;

/// Owner shared by every configured project.
pub const DEFAULT_OWNER: &str = "mstanimirovic";

/// Projects rendered, in display order.
pub const DEFAULT_PROJECTS: &[&str] = &["portfolio", "berba", "skocko"];

/// Session storage key holding the cache entry.
pub const DEFAULT_CACHE_KEY: &str = "projects_cache";

/// Cached project data stays valid for one hour.
pub const DEFAULT_TTL: Duration = Duration::from_millis(60 * 60 * 1000);

/// Id of the element cards are appended to.
pub const DEFAULT_CONTAINER_ID: &str = "projects";

pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Everything the pipeline needs to know, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectsConfig {
    pub owner: String,
    pub projects: Vec<String>,
    pub cache_key: String,
    pub cache_ttl: Duration,
    pub container_id: String,
    pub api_base: String,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            projects: DEFAULT_PROJECTS.iter().map(|p| p.to_string()).collect(),
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            cache_ttl: DEFAULT_TTL,
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            api_base: GITHUB_API_BASE.to_string(),
        }
    }
}

impl ProjectsConfig {
    /// Configuration for `owner` with the given projects and default everything else.
    pub fn new<I, S>(owner: impl Into<String>, projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            owner: owner.into(),
            projects: projects.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Point the pipeline at a different API host (used by tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }

    /// Number of projects a complete cache must hold.
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProjectsConfig::default();
        assert_eq!(config.owner, "mstanimirovic");
        assert_eq!(config.projects, vec!["portfolio", "berba", "skocko"]);
        assert_eq!(config.cache_key, "projects_cache");
        assert_eq!(config.cache_ttl.as_millis(), 3_600_000);
        assert_eq!(config.container_id, "projects");
        assert_eq!(config.project_count(), 3);
    }

    #[test]
    fn test_builder_overrides() {
        let config = ProjectsConfig::new("octo", ["a", "b"])
            .with_api_base("http://127.0.0.1:1234/")
            .with_container_id("cards");

        assert_eq!(config.owner, "octo");
        assert_eq!(config.project_count(), 2);
        assert_eq!(config.api_base, "http://127.0.0.1:1234");
        assert_eq!(config.container_id, "cards");
        assert_eq!(config.cache_key, DEFAULT_CACHE_KEY);
    }
}
