use crate::state::DocumentStore;
use crate::text::Stemmer;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Raised when stored rows do not form a valid matrix
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixShapeError {
    #[error("Vocabulary has {terms} terms but matrix has {rows} rows")]
    RowCount { terms: usize, rows: usize },

    #[error("Row {row} has {len} cells, expected {expected}")]
    RowLength {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("Vocabulary is not sorted and unique at term '{0}'")]
    UnsortedVocabulary(String),
}

/// Corpus statistics for one term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermStat {
    pub term: String,
    /// Occurrences summed over every document
    pub total: u64,
    /// Number of documents containing the term
    pub document_frequency: usize,
}

/// Term-document frequency matrix
///
/// Rows follow the lexicographically sorted vocabulary of stemmed terms and
/// columns follow document insertion order. Each cell is a raw count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMatrix {
    terms: Vec<String>,
    rows: Vec<Vec<u32>>,
    doc_count: usize,
    document_frequency: Vec<usize>,
}

/// Builds the term-document matrix for every stored document
///
/// # Arguments
///
/// * `documents` - Indexed documents; their order becomes the column order
/// * `stemmer` - Reduces each filtered term to the vocabulary form
pub fn build_frequency_matrix(documents: &DocumentStore, stemmer: &dyn Stemmer) -> FrequencyMatrix {
    let counts: Vec<HashMap<String, u32>> = documents
        .iter()
        .map(|document| {
            let mut counts = HashMap::new();
            for term in &document.terms {
                *counts.entry(stemmer.stem(term)).or_insert(0) += 1;
            }
            counts
        })
        .collect();

    let vocabulary: BTreeSet<&String> = counts.iter().flat_map(|c| c.keys()).collect();
    let terms: Vec<String> = vocabulary.into_iter().cloned().collect();

    let rows = terms
        .iter()
        .map(|term| {
            counts
                .iter()
                .map(|c| c.get(term).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    tracing::debug!(
        "Built frequency matrix: {} terms x {} documents",
        terms.len(),
        counts.len()
    );

    FrequencyMatrix::assemble(terms, rows, counts.len())
}

impl FrequencyMatrix {
    /// Rebuilds a matrix from stored vocabulary and rows
    ///
    /// # Returns
    ///
    /// * `Ok(FrequencyMatrix)` - Rows and vocabulary agree
    /// * `Err(MatrixShapeError)` - Ragged rows or an unsorted vocabulary
    pub fn from_rows(
        terms: Vec<String>,
        rows: Vec<Vec<u32>>,
        doc_count: usize,
    ) -> Result<Self, MatrixShapeError> {
        if terms.len() != rows.len() {
            return Err(MatrixShapeError::RowCount {
                terms: terms.len(),
                rows: rows.len(),
            });
        }

        if let Some(pair) = terms.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(MatrixShapeError::UnsortedVocabulary(pair[1].clone()));
        }

        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != doc_count) {
            return Err(MatrixShapeError::RowLength {
                row,
                len: cells.len(),
                expected: doc_count,
            });
        }

        Ok(Self::assemble(terms, rows, doc_count))
    }

    fn assemble(terms: Vec<String>, rows: Vec<Vec<u32>>, doc_count: usize) -> Self {
        let document_frequency = rows
            .iter()
            .map(|row| row.iter().filter(|&&c| c > 0).count())
            .collect();

        Self {
            terms,
            rows,
            doc_count,
            document_frequency,
        }
    }

    /// Sorted vocabulary of stemmed terms
    pub fn vocabulary(&self) -> &[String] {
        &self.terms
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    /// Number of documents (columns)
    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Per-term document frequency, aligned with the vocabulary
    pub fn document_frequency(&self) -> &[usize] {
        &self.document_frequency
    }

    /// Row index of a stemmed term
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.terms
            .binary_search_by(|probe| probe.as_str().cmp(term))
            .ok()
    }

    /// Term counts of one document, aligned with the vocabulary
    pub fn column(&self, doc: usize) -> Vec<u32> {
        self.rows
            .iter()
            .map(|row| row.get(doc).copied().unwrap_or(0))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_count == 0
    }

    /// The `n` terms with the highest total frequency
    ///
    /// Ties are broken alphabetically.
    pub fn most_common(&self, n: usize) -> Vec<TermStat> {
        let mut stats: Vec<TermStat> = self
            .terms
            .iter()
            .zip(&self.rows)
            .zip(&self.document_frequency)
            .map(|((term, row), &df)| TermStat {
                term: term.clone(),
                total: row.iter().map(|&c| u64::from(c)).sum(),
                document_frequency: df,
            })
            .collect();

        stats.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.term.cmp(&b.term)));
        stats.truncate(n);
        stats
    }

    /// Renders the matrix as CSV
    ///
    /// The header is `,Doc0,Doc1,...`; each following line is the term and
    /// its counts.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();

        for doc in 0..self.doc_count {
            out.push_str(&format!(",Doc{}", doc));
        }
        out.push('\n');

        for (term, row) in self.terms.iter().zip(&self.rows) {
            out.push_str(term);
            for count in row {
                out.push_str(&format!(",{}", count));
            }
            out.push('\n');
        }

        out
    }
}
