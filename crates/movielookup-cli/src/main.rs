mod console;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use movielookup_core::reconcile::{DEFAULT_MEDIA_FORMAT, DEFAULT_TITLE_BASE_URL};
use movielookup_core::{FindPageParser, ReconcileOptions, Reconciler, SearchFailurePolicy};
use movielookup_search::{DEFAULT_SEARCH_URL, SearchClient};
use tracing_subscriber::EnvFilter;

use console::ConsolePrompter;

/// Look up movies in a tab-separated list and fill in year, reference URL
/// and media type.
///
/// Each input line is `title <TAB> year <TAB> url <TAB> media`; any column
/// after the title may be empty or missing. Fields already present are never
/// overwritten.
#[derive(Parser, Debug)]
#[command(name = "movielookup", version)]
struct Cli {
    /// Tab-separated movie list to read
    input: PathBuf,

    /// Where to write the completed list
    output: PathBuf,

    /// Title search endpoint; the title is sent as the `q` parameter
    #[arg(long, env = "MOVIELOOKUP_SEARCH_URL", default_value = DEFAULT_SEARCH_URL)]
    search_url: String,

    /// Prefix joined with a result's id to build its reference URL
    #[arg(long, env = "MOVIELOOKUP_TITLE_BASE_URL", default_value = DEFAULT_TITLE_BASE_URL)]
    title_base_url: String,

    /// Media type offered first when a record has none
    #[arg(long, env = "MOVIELOOKUP_DEFAULT_MEDIA", default_value = DEFAULT_MEDIA_FORMAT)]
    default_media: String,

    /// What to do when a search request fails
    #[arg(long, env = "MOVIELOOKUP_ON_SEARCH_ERROR", value_enum, default_value_t = OnSearchError::Skip)]
    on_search_error: OnSearchError,

    /// Per-request timeout in seconds
    #[arg(long, env = "MOVIELOOKUP_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OnSearchError {
    /// Warn and leave the record unresolved
    Skip,
    /// Stop without writing any output
    Abort,
}

impl From<OnSearchError> for SearchFailurePolicy {
    fn from(value: OnSearchError) -> Self {
        match value {
            OnSearchError::Skip => SearchFailurePolicy::Skip,
            OnSearchError::Abort => SearchFailurePolicy::Abort,
        }
    }
}

impl Cli {
    fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            title_base_url: self.title_base_url.clone(),
            default_media_format: self.default_media.clone(),
            on_search_error: self.on_search_error.into(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout carries the operator dialogue; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("movielookup v{}", env!("CARGO_PKG_VERSION"));

    println!("Attempting to import {}", cli.input.display());
    let rows = movielookup_core::read_listing(&cli.input)
        .with_context(|| format!("importing {}", cli.input.display()))?;

    let search = SearchClient::new(cli.search_url.clone(), Duration::from_secs(cli.timeout_secs))
        .context("building search client")?;
    let parser = FindPageParser;
    let mut prompter = ConsolePrompter::stdio();

    let mut reconciler = Reconciler::new(&search, &parser, &mut prompter, cli.reconcile_options());
    let rows = reconciler.reconcile(rows).await?;
    let stats = reconciler.stats();
    tracing::info!(
        records = stats.records,
        resolved = stats.resolved,
        failed = stats.failed,
        "lookup pass finished"
    );

    println!("Writing new TSV to {}", cli.output.display());
    movielookup_core::write_listing(&cli.output, &rows)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    println!("Finished");
    Ok(())
}
