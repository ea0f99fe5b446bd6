//! Test helpers for writing artefact directories.

use camino::{Utf8Path, Utf8PathBuf};
use reelmatch_core::test_support::{sample_catalog, sample_ratings};
use reelmatch_core::{MovieCatalog, Rating, RatingsStore, TrendingFeed, TrendingWindow};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write test file");
}

/// A temporary artefacts directory.
#[derive(Debug)]
pub(super) struct ArtefactDir {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl ArtefactDir {
    /// An empty directory.
    pub(super) fn empty() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    /// The sample catalog and ratings, plus user 1's watchlist holding `m11`,
    /// one rating of a movie missing from the catalog and one off-scale score.
    pub(super) fn with_sample_data() -> Self {
        let dir = Self::empty();
        let catalog = sample_catalog();
        let movies: Vec<_> = catalog.movies().cloned().collect();
        let trending = TrendingFeed {
            day: catalog.trending_feed(TrendingWindow::Day).to_vec(),
            week: catalog.trending_feed(TrendingWindow::Week).to_vec(),
        };
        let catalog_json = json!({ "movies": movies, "trending": trending });
        write_utf8(&dir.catalog(), catalog_json.to_string().as_bytes());

        let store = sample_ratings();
        let mut ratings: Vec<serde_json::Value> = (1..=4)
            .flat_map(|user_id| store.ratings_by_user(user_id).collect::<Vec<Rating>>())
            .map(|rating| serde_json::to_value(rating).expect("serialise rating"))
            .collect();
        ratings.push(json!({ "user_id": 1, "movie_id": "ghost", "score": 4.0 }));
        ratings.push(json!({ "user_id": 9, "movie_id": "m01", "score": 4.3 }));
        let ratings_json = json!({ "ratings": ratings, "watchlists": { "1": ["m11"] } });
        write_utf8(&dir.ratings(), ratings_json.to_string().as_bytes());
        dir
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn catalog(&self) -> Utf8PathBuf {
        self.root.join("catalog.json")
    }

    pub(super) fn ratings(&self) -> Utf8PathBuf {
        self.root.join("ratings.json")
    }
}
