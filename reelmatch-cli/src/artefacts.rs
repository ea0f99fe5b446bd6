//! Loading the catalog, ratings and engine configuration from disk.
//!
//! Files are opened through `cap-std` with ambient authority and addressed
//! with UTF-8 `camino` paths.

use std::collections::BTreeMap;
use std::io::{self, BufReader};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use log::{info, warn};
use reelmatch_core::{
    CatalogId, CatalogSnapshot, InMemoryRatings, InMemoryWatchlists, Movie, MovieCatalog, Rating,
    RatingScore, TrendingFeed, UserId,
};
use reelmatch_index::ContentIndex;
use reelmatch_recommender::{HybridRecommender, RecommenderConfig};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{ARG_CATALOG, ARG_ENGINE_CONFIG, ARG_RATINGS, CliError};

/// Default catalog filename inside the artefacts directory.
pub(crate) const CATALOG_FILE: &str = "catalog.json";
/// Default ratings filename inside the artefacts directory.
pub(crate) const RATINGS_FILE: &str = "ratings.json";

/// Recommender over artefacts loaded by [`Artefacts::load`].
pub(crate) type Engine<'a> =
    HybridRecommender<'a, CatalogSnapshot, InMemoryRatings, InMemoryWatchlists>;

/// Resolved artefact locations shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ArtefactPaths {
    /// Path to `catalog.json`.
    pub(crate) catalog: Utf8PathBuf,
    /// Path to `ratings.json`.
    pub(crate) ratings: Utf8PathBuf,
    /// Optional engine configuration JSON.
    pub(crate) engine_config: Option<Utf8PathBuf>,
}

impl ArtefactPaths {
    /// Fill unset paths from the artefacts directory (default `.`).
    pub(crate) fn resolve(
        artefacts_dir: Option<Utf8PathBuf>,
        catalog: Option<Utf8PathBuf>,
        ratings: Option<Utf8PathBuf>,
        engine_config: Option<Utf8PathBuf>,
    ) -> Self {
        let artefacts_dir = artefacts_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        Self {
            catalog: catalog.unwrap_or_else(|| artefacts_dir.join(CATALOG_FILE)),
            ratings: ratings.unwrap_or_else(|| artefacts_dir.join(RATINGS_FILE)),
            engine_config,
        }
    }

    /// Check every referenced file exists before any is parsed.
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.catalog, ARG_CATALOG)?;
        require_existing(&self.ratings, ARG_RATINGS)?;
        if let Some(path) = &self.engine_config {
            require_existing(path, ARG_ENGINE_CONFIG)?;
        }
        Ok(())
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Whether `path` names a regular file, checked through its parent directory.
fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "path has no file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// On-disk shape of `catalog.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    movies: Vec<Movie>,
    trending: TrendingFeed,
}

/// On-disk shape of one rating row; scores are validated after parsing so a
/// bad row can be skipped rather than failing the whole file.
#[derive(Debug, Deserialize)]
struct RatingRow {
    user_id: UserId,
    movie_id: CatalogId,
    score: f64,
    #[serde(default)]
    timestamp: u64,
}

/// On-disk shape of `ratings.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RatingsFile {
    ratings: Vec<RatingRow>,
    watchlists: BTreeMap<UserId, Vec<CatalogId>>,
}

/// Everything a command needs to build a recommender.
#[derive(Debug)]
pub(crate) struct Artefacts {
    pub(crate) catalog: CatalogSnapshot,
    pub(crate) ratings: InMemoryRatings,
    pub(crate) watchlists: InMemoryWatchlists,
    pub(crate) index: ContentIndex,
    pub(crate) config: RecommenderConfig,
}

impl Artefacts {
    /// Load and validate the artefacts at `paths`, then build the content
    /// index.
    pub(crate) fn load(paths: &ArtefactPaths) -> Result<Self, CliError> {
        let config = match &paths.engine_config {
            Some(path) => {
                let loaded: RecommenderConfig = load_json(path, ARG_ENGINE_CONFIG)?;
                loaded
                    .validate()
                    .map_err(|source| CliError::InvalidEngineConfig {
                        path: path.clone(),
                        source,
                    })?;
                loaded
            }
            None => RecommenderConfig::default(),
        };

        let catalog_file: CatalogFile = load_json(&paths.catalog, ARG_CATALOG)?;
        let catalog =
            CatalogSnapshot::new(catalog_file.movies).with_trending(catalog_file.trending);
        let ratings_file: RatingsFile = load_json(&paths.ratings, ARG_RATINGS)?;
        let ratings = InMemoryRatings::from_ratings(known_ratings(&catalog, ratings_file.ratings));
        let watchlists = InMemoryWatchlists::from_lists(ratings_file.watchlists);
        let index = ContentIndex::build(&catalog);
        info!("loaded {} movies and {} ratings", catalog.len(), ratings.len());
        Ok(Self {
            catalog,
            ratings,
            watchlists,
            index,
            config,
        })
    }

    /// A recommender borrowing these artefacts.
    pub(crate) fn engine(&self) -> Result<Engine<'_>, CliError> {
        HybridRecommender::with_config(
            &self.catalog,
            &self.ratings,
            &self.watchlists,
            &self.index,
            self.config.clone(),
        )
        .map_err(CliError::from)
    }
}

/// Validated ratings for movies in `catalog`; other rows are skipped with a
/// warning.
fn known_ratings(catalog: &CatalogSnapshot, rows: Vec<RatingRow>) -> Vec<Rating> {
    let mut unknown = 0_usize;
    let mut invalid = 0_usize;
    let ratings: Vec<Rating> = rows
        .into_iter()
        .filter_map(|row| {
            if catalog.movie(&row.movie_id).is_none() {
                unknown += 1;
                return None;
            }
            match RatingScore::new(row.score) {
                Ok(score) => Some(Rating::new(row.user_id, row.movie_id, score, row.timestamp)),
                Err(_) => {
                    invalid += 1;
                    None
                }
            }
        })
        .collect();
    if unknown > 0 {
        warn!("skipped {unknown} ratings referencing movies missing from the catalog");
    }
    if invalid > 0 {
        warn!("skipped {invalid} ratings with invalid scores");
    }
    ratings
}

/// Decode a JSON artefact from `path`.
pub(crate) fn load_json<T>(path: &Utf8Path, field: &'static str) -> Result<T, CliError>
where
    T: DeserializeOwned,
{
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenArtefact {
            field,
            path: path.to_path_buf(),
            source,
        }
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseArtefact {
        field,
        path: path.to_path_buf(),
        source,
    })
}
