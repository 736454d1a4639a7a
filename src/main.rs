// Command-line host for the project cards pipeline.
// Builds the page, runs one load against the session cache, and writes the HTML.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::DateTime;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use repo_cards::cache::{DEFAULT_SESSION, FileStore, ProjectsCache};
use repo_cards::document::Document;
use repo_cards::render::summary_line;
use repo_cards::{ProjectLoader, ProjectsConfig, Result};

#[derive(Debug, Parser)]
#[command(name = "repo-cards", version, about)]
struct Cli {
    /// Owner of every listed repository
    #[arg(long, global = true)]
    owner: Option<String>,

    /// Repository to show; repeat to build the list (replaces the defaults)
    #[arg(long = "project", global = true)]
    projects: Vec<String>,

    /// Session whose cache is used
    #[arg(long, global = true, default_value = DEFAULT_SESSION)]
    session: String,

    /// Cache lifetime in seconds
    #[arg(long, global = true)]
    ttl_secs: Option<u64>,

    /// GitHub API base URL
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Id of the element cards are appended to
    #[arg(long, global = true)]
    container: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the projects and write the HTML page
    Render {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit only the container element
        #[arg(long)]
        fragment: bool,

        /// Page title
        #[arg(long, default_value = "Projects")]
        title: String,
    },
    /// Fetch the projects and print them, bypassing the cache
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Inspect or reset the session cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Debug, Subcommand)]
enum CacheAction {
    /// Print the cached entry and its age
    Show,
    /// Delete the cached entry
    Clear,
}

impl Cli {
    fn config(&self) -> ProjectsConfig {
        let mut config = ProjectsConfig::default();
        if let Some(owner) = &self.owner {
            config.owner = owner.clone();
        }
        if !self.projects.is_empty() {
            config.projects = self.projects.clone();
        }
        if let Some(secs) = self.ttl_secs {
            config = config.with_cache_ttl(Duration::from_secs(secs));
        }
        if let Some(api_base) = &self.api_base {
            config = config.with_api_base(api_base.as_str());
        }
        if let Some(container) = &self.container {
            config = config.with_container_id(container.as_str());
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.config();
    let store = FileStore::for_session(&cli.session)?;

    match cli.command {
        Command::Render {
            output,
            fragment,
            title,
        } => {
            let container_id = config.container_id.clone();
            let mut doc = Document::projects_page(title, &container_id);
            let mut loader = ProjectLoader::new(config, store)?;

            let report = loader.load(&mut doc).await;
            tracing::info!(
                source = ?report.source,
                rendered = report.rendered,
                skipped = report.skipped().count(),
                "Page loaded"
            );

            let html = if fragment {
                doc.element_by_id(&container_id)
                    .map(|el| el.to_html())
                    .unwrap_or_default()
            } else {
                doc.to_html()
            };

            match output {
                Some(path) => std::fs::write(&path, html)?,
                None => println!("{}", html),
            }
        }
        Command::List { json } => {
            let loader = ProjectLoader::new(config, store)?;
            let (repos, _) = loader.fetch_all().await;

            if json {
                println!("{}", serde_json::to_string_pretty(&repos)?);
            } else {
                for repo in &repos {
                    println!("{}", summary_line(repo));
                }
            }
        }
        Command::Cache { action } => {
            let mut cache = ProjectsCache::new(store, config.cache_key.as_str(), config.cache_ttl);

            match action {
                CacheAction::Show => match cache.entry() {
                    Some(entry) => {
                        let now = cache.now_millis();
                        let written = DateTime::from_timestamp_millis(entry.timestamp)
                            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                            .unwrap_or_else(|| "unknown".to_string());
                        let state = if entry.is_expired(now, cache.ttl()) {
                            "stale"
                        } else {
                            "fresh"
                        };

                        println!(
                            "{} project(s), written {} ({}s ago, {})",
                            entry.data.len(),
                            written,
                            entry.age_millis(now) / 1000,
                            state
                        );
                        for repo in &entry.data {
                            println!("  {}", summary_line(repo));
                        }
                    }
                    None => println!("No cached projects"),
                },
                CacheAction::Clear => {
                    cache.clear()?;
                    tracing::info!(session = %cli.session, "Cache cleared");
                }
            }
        }
    }

    Ok(())
}
