//! Vector-space weighting primitives

/// Corpus statistics needed to weight term-count vectors
#[derive(Debug, Clone, Copy)]
pub struct VectorSpace<'a> {
    /// Number of documents
    pub doc_count: usize,
    /// Document frequency per vocabulary term
    pub document_frequency: &'a [usize],
}

impl<'a> VectorSpace<'a> {
    pub fn new(doc_count: usize, document_frequency: &'a [usize]) -> Self {
        Self {
            doc_count,
            document_frequency,
        }
    }

    /// TF-IDF weights of a term-count vector
    ///
    /// Each weight is `(1 + log10(count)) * log10(N / df)`. A term with zero
    /// count, zero document frequency, or an empty corpus weighs 0.
    pub fn tfidf_weight(&self, counts: &[u32]) -> Vec<f64> {
        let n = self.doc_count as f64;

        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let df = self.document_frequency.get(i).copied().unwrap_or(0);
                if count == 0 || df == 0 || self.doc_count == 0 {
                    return 0.0;
                }
                (1.0 + f64::from(count).log10()) * (n / df as f64).log10()
            })
            .collect()
    }

    /// Cosine similarity of two term-count vectors after TF-IDF weighting
    pub fn cosine_similarity(&self, query: &[u32], document: &[u32]) -> f64 {
        let q = normalize(self.tfidf_weight(query));
        let d = normalize(self.tfidf_weight(document));
        q.iter().zip(&d).map(|(a, b)| a * b).sum()
    }
}

/// Scales a vector to unit L2 length; a zero vector is returned unchanged
pub fn normalize(mut vector: Vec<f64>) -> Vec<f64> {
    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for v in &mut vector {
            *v /= norm;
        }
    }
    vector
}
