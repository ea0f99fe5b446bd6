//! `recommend` command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use reelmatch_core::UserId;
use reelmatch_recommender::{Recommendations, Strategy};
use serde::{Deserialize, Serialize};

use crate::artefacts::{ArtefactPaths, Artefacts};
use crate::{
    ARG_ARTEFACTS_DIR, ARG_CATALOG, ARG_ENGINE_CONFIG, ARG_LIMIT, ARG_NO_FALLBACK, ARG_RATINGS,
    ARG_USER, CliError, DEFAULT_LIMIT, ENV_RECOMMEND_USER, write_json,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Recommend unseen movies for a user. Users with fewer rated \
                 movies than the engine's minimum are served popular movies \
                 instead unless --no-fallback is given.",
    about = "Recommend movies for a user"
)]
#[ortho_config(prefix = "REELMATCH")]
pub(crate) struct RecommendArgs {
    /// User to recommend for.
    #[arg(long = ARG_USER, value_name = "id")]
    #[serde(default)]
    pub(crate) user: Option<UserId>,
    /// Maximum number of results.
    #[arg(long = ARG_LIMIT, value_name = "n")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Fail rather than fall back to popular movies.
    #[arg(long = ARG_NO_FALLBACK)]
    #[serde(default)]
    pub(crate) no_fallback: bool,
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

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    pub(crate) paths: ArtefactPaths,
    pub(crate) user_id: UserId,
    pub(crate) limit: usize,
    /// Serve popular movies when the user has too few ratings.
    pub(crate) fallback: bool,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let user_id = args.user.ok_or(CliError::MissingArgument {
            field: ARG_USER,
            env: ENV_RECOMMEND_USER,
        })?;
        Ok(Self {
            paths: ArtefactPaths::resolve(
                args.artefacts_dir,
                args.catalog,
                args.ratings,
                args.engine_config,
            ),
            user_id,
            limit: args.limit.unwrap_or(DEFAULT_LIMIT),
            fallback: !args.no_fallback,
        })
    }
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let recommendations = execute_recommend(&config)?;
    write_json(writer, &recommendations)
}

pub(crate) fn execute_recommend(config: &RecommendConfig) -> Result<Recommendations, CliError> {
    config.paths.validate_sources()?;
    let artefacts = Artefacts::load(&config.paths)?;
    let engine = artefacts.engine()?;
    if config.fallback {
        return Ok(engine.recommend(config.user_id, config.limit)?);
    }
    let results = engine.personalized_recommendations(config.user_id, config.limit)?;
    Ok(Recommendations {
        strategy: Strategy::Personalised,
        results,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
