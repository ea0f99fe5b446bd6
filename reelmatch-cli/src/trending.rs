//! `trending` command implementation.

use std::io::Write;
use std::str::FromStr;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use reelmatch_core::{RecommendationResult, TrendingWindow, UnknownWindow};
use serde::{Deserialize, Serialize};

use crate::artefacts::{ArtefactPaths, Artefacts};
use crate::{
    ARG_ARTEFACTS_DIR, ARG_CATALOG, ARG_ENGINE_CONFIG, ARG_LIMIT, ARG_RATINGS, ARG_WINDOW,
    CliError, DEFAULT_LIMIT, write_json,
};

/// Window name selecting community rating activity instead of a feed.
const COMMUNITY: &str = "community";

/// CLI arguments for the `trending` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the catalog's trending feed for a window by popularity \
                 velocity, recency and rating. The community window ranks \
                 movies by how well and how often users rated them instead.",
    about = "List trending movies"
)]
#[ortho_config(prefix = "REELMATCH")]
pub(crate) struct TrendingArgs {
    /// Trending window: day, week (default) or community.
    #[arg(long = ARG_WINDOW, value_name = "window")]
    #[serde(default)]
    pub(crate) window: Option<String>,
    /// Maximum number of results.
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Directory containing the default artefact filenames.
    #[arg(long = ARG_ARTEFACTS_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) artefacts_dir: Option<Utf8PathBuf>,
    /// Override the path to the catalog snapshot (`catalog.json`).
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Override the path to the ratings export (`ratings.json`).
    #[arg(long = ARG_RATINGS, value_name = "path")]
    #[serde(default)]
    pub(crate) ratings: Option<Utf8PathBuf>,
    /// Engine configuration JSON; defaults apply when omitted.
    #[arg(long = ARG_ENGINE_CONFIG, value_name = "path")]
    #[serde(default)]
    pub(crate) engine_config: Option<Utf8PathBuf>,
}

impl TrendingArgs {
    pub(crate) fn into_config(self) -> Result<TrendingConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        TrendingConfig::try_from(merged)
    }
}

/// What the `trending` command ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrendingSource {
    /// The catalog's feed for a window.
    Feed(TrendingWindow),
    /// Community rating activity.
    Community,
}

impl FromStr for TrendingSource {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(COMMUNITY) {
            return Ok(Self::Community);
        }
        TrendingWindow::from_str(s)
            .map(Self::Feed)
            .map_err(|UnknownWindow(value)| CliError::InvalidWindow { value })
    }
}

/// Resolved `trending` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TrendingConfig {
    pub(crate) paths: ArtefactPaths,
    pub(crate) source: TrendingSource,
    pub(crate) limit: usize,
}

impl TryFrom<TrendingArgs> for TrendingConfig {
    type Error = CliError;

    fn try_from(args: TrendingArgs) -> Result<Self, Self::Error> {
        let source = match args.window.as_deref() {
            Some(window) => window.parse()?,
            None => TrendingSource::Feed(TrendingWindow::Week),
        };
        Ok(Self {
            paths: ArtefactPaths::resolve(
                args.artefacts_dir,
                args.catalog,
                args.ratings,
                args.engine_config,
            ),
            source,
            limit: args.limit.unwrap_or(DEFAULT_LIMIT),
        })
    }
}

pub(crate) fn run_trending_with(
    args: TrendingArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let results = execute_trending(&config)?;
    write_json(writer, &results)
}

pub(crate) fn execute_trending(
    config: &TrendingConfig,
) -> Result<Vec<RecommendationResult>, CliError> {
    config.paths.validate_sources()?;
    let artefacts = Artefacts::load(&config.paths)?;
    let engine = artefacts.engine()?;
    Ok(match config.source {
        TrendingSource::Feed(window) => engine.trending_top(window, config.limit),
        TrendingSource::Community => engine.community_trending(config.limit),
    })
}
