//! Similarity index for Reelmatch.
//!
//! Two kinds of similarity feed the hybrid recommender:
//! - **Content**: every movie gets a sparse TF-IDF vector over its genres,
//!   keywords, billed cast, director and overview words. Movies compare by
//!   cosine similarity ([`content_similarity`]).
//! - **Collaborative**: two users compare by the Pearson correlation of the
//!   ratings they share ([`collaborative_similarity`]). Too little overlap or a
//!   flat rating history leaves the similarity undefined.
//!
//! [`SharedContentIndex`] publishes a complete index per catalog snapshot and
//! swaps it atomically on rebuild.

#![forbid(unsafe_code)]

mod collaborative;
mod content;
mod snapshot;
mod tokenize;

pub use collaborative::{
    DEFAULT_MIN_OVERLAP, RatingProfile, UserSimilarity, collaborative_similarity,
    profile_similarity, rating_profile,
};
pub use content::{ContentIndex, ContentVector, build_content_vectors, content_similarity};
pub use snapshot::SharedContentIndex;
pub use tokenize::{overview_words, weighted_terms};
