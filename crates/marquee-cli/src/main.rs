//! marquee - terminal movie browser for the TMDB catalog.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

use crate::config::{AppConfig, resolve_config_path};
use marquee_api::tmdb::{CatalogApi, ListCategory, TmdbClient, image_url};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse the movie catalog interactively.
    Browse,
    /// Print one category's movie list.
    List(ListArgs),
    /// Print details for a single movie.
    Detail(DetailArgs),
    /// Update stored configuration.
    Config(ConfigArgs),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Category: now-playing, popular, top-rated or upcoming.
    #[arg(long, default_value = "now-playing")]
    category: ListCategory,

    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `detail` subcommand.
#[derive(clap::Args)]
struct DetailArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigArgs {
    /// TMDB API Read Access Token to store.
    #[arg(long)]
    token: Option<String>,

    /// Response language to store, e.g. "en-US".
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(long, value_enum)]
    shell: clap_complete::Shell,
}

/// Builds the API client from config and environment.
fn build_client(dir: Option<&PathBuf>) -> Result<TmdbClient> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    let api_token = config.resolve_api_token()?;

    TmdbClient::builder()
        .api_token(api_token)
        .language(config.tmdb.language)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build API client")
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the API client fails to build or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&PathBuf>) -> Result<()> {
    let client = Arc::new(build_client(dir)?);
    tui::run_browser(client).await.context("browser TUI failed")
}

/// Runs the `list` subcommand.
///
/// # Errors
///
/// Returns an error if the API client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_list(args: &ListArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;

    let response = client
        .movie_list(args.category, args.page)
        .await
        .context("failed to fetch movie list")?;

    tracing::info!(
        "{} (page {}/{}, {} movies total)",
        args.category.title(),
        response.page,
        response.total_pages,
        response.total_results,
    );
    tracing::info!("ID\t\tTitle\t\t\tPoster");
    for movie in &response.results {
        tracing::info!(
            "{}\t{}\t{}",
            movie.id,
            movie.title,
            movie
                .poster_path
                .as_deref()
                .map_or_else(|| String::from("-"), |p| image_url(p, Some("w500"))),
        );
    }
    tracing::info!("Total: {} movies", response.results.len());

    Ok(())
}

/// Runs the `detail` subcommand.
///
/// # Errors
///
/// Returns an error if the API client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_detail(args: &DetailArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_client(dir)?;

    let details = client
        .movie_details(args.id)
        .await
        .context("failed to fetch movie details")?;

    let genres = details
        .genres
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    tracing::info!("Release date: {}", details.release_date);
    tracing::info!("Rating:       {:.2}", details.vote_average);
    tracing::info!("Genres:       {genres}");
    if let Some(backdrop) = details.backdrop_path.as_deref() {
        tracing::info!("Backdrop:     {}", image_url(backdrop, None));
    }
    tracing::info!("{}", details.overview);

    Ok(())
}

/// Runs the `config` subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
fn run_config(args: &ConfigArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).unwrap_or_default();

    if let Some(token) = &args.token {
        config.tmdb.api_token = Some(token.clone());
    }
    if let Some(language) = &args.language {
        config.tmdb.language = language.clone();
    }
    config.save(&config_path).context("failed to save config")?;
    tracing::info!("wrote {}", config_path.display());

    Ok(())
}

/// Runs the `completions` subcommand.
fn run_completions(args: &CompletionsArgs) {
    let mut command = Cli::command();
    let name = command.get_name().to_owned();
    clap_complete::generate(args.shell, &mut command, name, &mut std::io::stdout());
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Browse => run_browse(cli.dir.as_ref()).await,
        Commands::List(args) => run_list(&args, cli.dir.as_ref()).await,
        Commands::Detail(args) => run_detail(&args, cli.dir.as_ref()).await,
        Commands::Config(args) => run_config(&args, cli.dir.as_ref()),
        Commands::Completions(args) => {
            run_completions(&args);
            Ok(())
        }
    }
}
