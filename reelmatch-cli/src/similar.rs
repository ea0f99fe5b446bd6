//! `similar` command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use reelmatch_core::{CatalogId, RecommendationResult};
use serde::{Deserialize, Serialize};

use crate::artefacts::{ArtefactPaths, Artefacts};
use crate::{
    ARG_ARTEFACTS_DIR, ARG_CATALOG, ARG_ENGINE_CONFIG, ARG_LIMIT, ARG_MOVIE, ARG_RATINGS,
    CliError, DEFAULT_LIMIT, ENV_SIMILAR_MOVIE, write_json,
};

/// CLI arguments for the `similar` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank catalog movies by content similarity to one movie. \
                 Needs no user ratings.",
    about = "List movies similar to a given movie"
)]
#[ortho_config(prefix = "REELMATCH")]
pub(crate) struct SimilarArgs {
    /// Catalog id of the movie to match.
    #[arg(long = ARG_MOVIE, value_name = "id")]
    #[serde(default)]
    pub(crate) movie: Option<String>,
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

impl SimilarArgs {
    pub(crate) fn into_config(self) -> Result<SimilarConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SimilarConfig::try_from(merged)
    }
}

/// Resolved `similar` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SimilarConfig {
    pub(crate) paths: ArtefactPaths,
    pub(crate) movie_id: CatalogId,
    pub(crate) limit: usize,
}

impl TryFrom<SimilarArgs> for SimilarConfig {
    type Error = CliError;

    fn try_from(args: SimilarArgs) -> Result<Self, Self::Error> {
        let movie = args.movie.ok_or(CliError::MissingArgument {
            field: ARG_MOVIE,
            env: ENV_SIMILAR_MOVIE,
        })?;
        Ok(Self {
            paths: ArtefactPaths::resolve(
                args.artefacts_dir,
                args.catalog,
                args.ratings,
                args.engine_config,
            ),
            movie_id: CatalogId::from(movie),
            limit: args.limit.unwrap_or(DEFAULT_LIMIT),
        })
    }
}

pub(crate) fn run_similar_with(args: SimilarArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let results = execute_similar(&config)?;
    write_json(writer, &results)
}

pub(crate) fn execute_similar(
    config: &SimilarConfig,
) -> Result<Vec<RecommendationResult>, CliError> {
    config.paths.validate_sources()?;
    let artefacts = Artefacts::load(&config.paths)?;
    let engine = artefacts.engine()?;
    Ok(engine.similar_movies(&config.movie_id, config.limit)?)
}
