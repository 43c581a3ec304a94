//! Ranking engine
//!
//! Scores indexed documents against free-text queries with TF-IDF weighted
//! cosine similarity, a title-match bonus, and a single thesaurus expansion
//! for sparse result sets. Everything here reads the frozen matrix only.

mod query;
mod weighting;

pub use query::{validate_query, Ranker, SearchResult, PREVIEW_TERMS, TITLE_BONUS};
pub use weighting::{normalize, VectorSpace};
