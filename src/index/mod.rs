//! Index builder
//!
//! Turns the crawled document store into a term-document frequency matrix.
//! The matrix is immutable once built; rebuilding replaces it wholesale.

mod matrix;

pub use matrix::{build_frequency_matrix, FrequencyMatrix, MatrixShapeError, TermStat};
