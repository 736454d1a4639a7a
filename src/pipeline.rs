// Fetch/render pipeline.
// Renders project cards from a fresh cache, or fetches each project in turn and caches the result.

use crate::cache::{Clock, ProjectsCache, SessionStore, SystemClock};
use crate::config::ProjectsConfig;
use crate::document::Document;
use crate::error::{CardsError, Result};
use crate::github::{GitHubClient, Repository};
use crate::render::project_card;

/// Why a project produced no card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The API answered with a non-success status.
    HttpStatus(u16),
    /// The request never got a response.
    Request(String),
    /// The response body was not a repository.
    Decode(String),
}

impl From<CardsError> for SkipReason {
    fn from(err: CardsError) -> Self {
        match err {
            CardsError::Status { status, .. } => SkipReason::HttpStatus(status),
            CardsError::Json(e) => SkipReason::Decode(e.to_string()),
            CardsError::Api(e) if e.is_decode() => SkipReason::Decode(e.to_string()),
            other => SkipReason::Request(other.to_string()),
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::HttpStatus(status) => write!(f, "HTTP {}", status),
            SkipReason::Request(e) => write!(f, "request failed: {}", e),
            SkipReason::Decode(e) => write!(f, "invalid response body: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectResult {
    Loaded,
    Skipped(SkipReason),
}

/// What happened to one configured project during a network load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOutcome {
    pub project: String,
    pub result: ProjectResult,
}

impl ProjectOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self.result, ProjectResult::Loaded)
    }
}

/// Where the rendered cards came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Cache,
    Network,
    /// The document had no container; nothing was done.
    MissingContainer,
}

/// Summary of one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub source: LoadSource,
    /// Cards appended to the container.
    pub rendered: usize,
    /// Per-project results, in configured order. Empty unless the network was used.
    pub outcomes: Vec<ProjectOutcome>,
    /// Whether the fetched set reached the session store.
    pub cache_written: bool,
}

impl LoadReport {
    fn new(source: LoadSource) -> Self {
        Self {
            source,
            rendered: 0,
            outcomes: Vec::new(),
            cache_written: false,
        }
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.outcomes.iter().filter_map(|o| match &o.result {
            ProjectResult::Skipped(reason) => Some((o.project.as_str(), reason)),
            ProjectResult::Loaded => None,
        })
    }
}

/// Loads the configured projects into a document, once per page load.
pub struct ProjectLoader<S, C = SystemClock> {
    config: ProjectsConfig,
    client: GitHubClient,
    cache: ProjectsCache<S, C>,
}

impl<S: SessionStore> ProjectLoader<S, SystemClock> {
    pub fn new(config: ProjectsConfig, store: S) -> Result<Self> {
        Self::with_clock(config, store, SystemClock)
    }
}

impl<S: SessionStore, C: Clock> ProjectLoader<S, C> {
    pub fn with_clock(config: ProjectsConfig, store: S, clock: C) -> Result<Self> {
        let client = GitHubClient::from_config(&config)?;
        let cache = ProjectsCache::from_config(store, &config, clock);
        Ok(Self {
            config,
            client,
            cache,
        })
    }

    pub fn config(&self) -> &ProjectsConfig {
        &self.config
    }

    pub fn cache(&self) -> &ProjectsCache<S, C> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ProjectsCache<S, C> {
        &mut self.cache
    }

    /// Render the project cards into the document's container.
    ///
    /// A cache holding exactly as many records as there are configured
    /// projects is rendered as-is, with no network traffic. The check is by
    /// count only. Anything else triggers one request per project, in order,
    /// with each card appended as soon as its response arrives. Whatever was
    /// fetched is then cached, even if some projects were skipped.
    pub async fn load(&mut self, doc: &mut Document) -> LoadReport {
        let Some(container) = doc.element_by_id_mut(&self.config.container_id) else {
            tracing::debug!(id = %self.config.container_id, "No container element, nothing to load");
            return LoadReport::new(LoadSource::MissingContainer);
        };

        if let Some(cached) = self.cache.read() {
            if cached.len() == self.config.project_count() {
                for repo in &cached {
                    container.append_child(project_card(repo));
                }
                tracing::info!(count = cached.len(), "Rendered projects from cache");

                let mut report = LoadReport::new(LoadSource::Cache);
                report.rendered = cached.len();
                return report;
            }
            tracing::debug!(
                cached = cached.len(),
                expected = self.config.project_count(),
                "Cached project count mismatch, refetching"
            );
        }

        let mut report = LoadReport::new(LoadSource::Network);
        let (repos, outcomes) = self
            .fetch_each(|repo| {
                container.append_child(project_card(repo));
                tracing::info!(project = %repo.name, "Rendered project");
            })
            .await;

        report.rendered = repos.len();
        report.outcomes = outcomes;
        report.cache_written = match self.cache.write(&repos) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to cache projects");
                false
            }
        };

        report
    }

    /// Fetch every configured project without rendering.
    pub async fn fetch_all(&self) -> (Vec<Repository>, Vec<ProjectOutcome>) {
        self.fetch_each(|_| {}).await
    }

    /// Fetch projects one at a time in configured order, calling `on_loaded`
    /// for each success before the next request starts.
    async fn fetch_each<F>(&self, mut on_loaded: F) -> (Vec<Repository>, Vec<ProjectOutcome>)
    where
        F: FnMut(&Repository),
    {
        let mut repos = Vec::with_capacity(self.config.project_count());
        let mut outcomes = Vec::with_capacity(self.config.project_count());

        for project in &self.config.projects {
            let result = match self.client.get_repo(&self.config.owner, project).await {
                Ok(repo) => {
                    on_loaded(&repo);
                    repos.push(repo);
                    ProjectResult::Loaded
                }
                Err(e) => {
                    let reason = SkipReason::from(e);
                    match &reason {
                        SkipReason::HttpStatus(status) => {
                            tracing::warn!(%project, status, "Skipping project");
                        }
                        _ => {
                            tracing::error!(%project, error = %reason, "Failed loading project");
                        }
                    }
                    ProjectResult::Skipped(reason)
                }
            };

            outcomes.push(ProjectOutcome {
                project: project.clone(),
                result,
            });
        }

        (repos, outcomes)
    }
}
