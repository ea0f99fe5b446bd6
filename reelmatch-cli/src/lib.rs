//! Command-line interface for querying the Reelmatch recommender.
//!
//! Each subcommand loads a catalog snapshot and a ratings export from disk,
//! builds the content index, runs one ranking and prints the result as JSON.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod artefacts;
mod error;
mod recommend;
mod similar;
mod trending;

pub use error::CliError;

use recommend::{RecommendArgs, run_recommend_with};
use similar::{SimilarArgs, run_similar_with};
use trending::{TrendingArgs, run_trending_with};

pub(crate) const ARG_ARTEFACTS_DIR: &str = "artefacts-dir";
pub(crate) const ARG_CATALOG: &str = "catalog";
pub(crate) const ARG_RATINGS: &str = "ratings";
pub(crate) const ARG_ENGINE_CONFIG: &str = "engine-config";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_USER: &str = "user";
pub(crate) const ARG_NO_FALLBACK: &str = "no-fallback";
pub(crate) const ARG_MOVIE: &str = "movie";
pub(crate) const ARG_WINDOW: &str = "window";
pub(crate) const ENV_RECOMMEND_USER: &str = "REELMATCH_CMDS_RECOMMEND_USER";
pub(crate) const ENV_SIMILAR_MOVIE: &str = "REELMATCH_CMDS_SIMILAR_MOVIE";

/// Results printed when `--limit` is not given.
pub(crate) const DEFAULT_LIMIT: usize = 10;

/// Run the Reelmatch CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Recommend(args) => run_recommend_with(args, writer),
        Command::Similar(args) => run_similar_with(args, writer),
        Command::Trending(args) => run_trending_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "reelmatch",
    about = "Query the Reelmatch movie recommender from prepared artefacts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend unseen movies for a user.
    Recommend(RecommendArgs),
    /// List movies similar to a given movie.
    Similar(SimilarArgs),
    /// List trending movies.
    Trending(TrendingArgs),
}

/// Pretty-print `value` as JSON followed by a newline.
pub(crate) fn write_json<T>(writer: &mut dyn Write, value: &T) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
