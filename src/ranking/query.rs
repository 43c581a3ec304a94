//! Query validation and ranking

use crate::index::FrequencyMatrix;
use crate::ranking::weighting::VectorSpace;
use crate::state::DocumentStore;
use crate::text::{query_tokens, word_is_valid, Stemmer, StopWords, Thesaurus};
use crate::url::relative_to_domain;
use crate::QueryError;
use std::cmp::Ordering;

/// Score added when a raw query token appears in a document title
pub const TITLE_BONUS: f64 = 0.25;

/// Number of filtered terms shown in a result preview
pub const PREVIEW_TERMS: usize = 20;

/// One ranked document
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub score: f64,
    pub title: String,
    /// URL relative to the crawled domain root
    pub url: String,
    /// First filtered terms of the document
    pub snippet: String,
}

impl SearchResult {
    /// Score zero-padded to six characters with four decimals, e.g. `0.7071`
    pub fn formatted_score(&self) -> String {
        format!("{:06.4}", self.score)
    }
}

/// Rejects queries containing tokens that fail the token-validity rule
///
/// # Examples
///
/// ```
/// use quarry::ranking::validate_query;
///
/// assert!(validate_query("rust crawler").is_ok());
/// assert!(validate_query("rust !!").is_err());
/// ```
pub fn validate_query(query: &str) -> Result<(), QueryError> {
    match query.split_whitespace().find(|token| !word_is_valid(token)) {
        Some(token) => Err(QueryError::InvalidToken(token.to_string())),
        None => Ok(()),
    }
}

/// Ranks documents of a frozen index against free-text queries
pub struct Ranker<'a> {
    pub documents: &'a DocumentStore,
    pub matrix: &'a FrequencyMatrix,
    pub stop_words: &'a StopWords,
    pub thesaurus: &'a Thesaurus,
    pub stemmer: &'a dyn Stemmer,
    /// `scheme://host[:port]` stripped from result URLs
    pub domain_root: &'a str,
}

impl<'a> Ranker<'a> {
    /// Returns the top `k` documents for a query
    ///
    /// When fewer than `k / 2` documents score above zero, the query is
    /// widened once with thesaurus synonyms of its original tokens and ranked
    /// again. The widened query is never widened a second time.
    pub fn process_query(&self, raw_query: &str, k: usize) -> Vec<SearchResult> {
        let mut query = raw_query.to_string();
        let mut expanded = false;

        loop {
            let results = self.rank(&query);

            if (results.len() as f64) < k as f64 / 2.0 && !expanded {
                let original = query_tokens(raw_query).join(" ");
                query = self.thesaurus.expand(&original);
                expanded = true;
                tracing::info!(
                    "Less than k/2 results. Performing thesaurus expansion: '{}'",
                    query
                );
                continue;
            }

            return results.into_iter().take(k).collect();
        }
    }

    /// Scores every document once and keeps those above zero, best first
    fn rank(&self, query: &str) -> Vec<SearchResult> {
        let tokens = query_tokens(query);
        let query_vector = self.query_vector(&tokens);
        let space = VectorSpace::new(self.matrix.doc_count(), self.matrix.document_frequency());

        let mut scored: Vec<(f64, usize)> = self
            .documents
            .iter()
            .enumerate()
            .map(|(col, document)| {
                let title_tokens = query_tokens(&document.title);
                let bonus = if tokens.iter().any(|t| title_tokens.contains(t)) {
                    TITLE_BONUS
                } else {
                    0.0
                };
                let similarity = space.cosine_similarity(&query_vector, &self.matrix.column(col));
                (bonus + similarity, col)
            })
            .filter(|(score, _)| *score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        scored
            .into_iter()
            .filter_map(|(score, col)| {
                self.documents.get_index(col).map(|document| SearchResult {
                    score,
                    title: document.title.clone(),
                    url: relative_to_domain(&document.url, self.domain_root),
                    snippet: document.preview(PREVIEW_TERMS),
                })
            })
            .collect()
    }

    /// In-query counts of known stems, aligned with the vocabulary
    fn query_vector(&self, tokens: &[String]) -> Vec<u32> {
        let mut vector = vec![0u32; self.matrix.term_count()];

        for token in tokens.iter().filter(|t| !self.stop_words.contains(t)) {
            if let Some(index) = self.matrix.term_index(&self.stemmer.stem(token)) {
                vector[index] += 1;
            }
        }

        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_frequency_matrix;
    use crate::state::Document;
    use crate::text::EnglishStemmer;

    struct Fixture {
        documents: DocumentStore,
        matrix: FrequencyMatrix,
        stop_words: StopWords,
        thesaurus: Thesaurus,
        stemmer: EnglishStemmer,
    }

    impl Fixture {
        fn new(docs: &[(&str, &str)], thesaurus: &str) -> Self {
            let mut documents = DocumentStore::new();
            for (i, (title, text)) in docs.iter().enumerate() {
                documents.insert(Document {
                    fingerprint: format!("fp{}", i),
                    url: format!("http://a.com/site/doc{}.html", i),
                    title: title.to_string(),
                    terms: text.split_whitespace().map(str::to_string).collect(),
                });
            }
            let stemmer = EnglishStemmer::new();
            let matrix = build_frequency_matrix(&documents, &stemmer);

            Self {
                documents,
                matrix,
                stop_words: StopWords::from_words(["the", "a"]),
                thesaurus: Thesaurus::parse(thesaurus).unwrap(),
                stemmer,
            }
        }

        fn ranker(&self) -> Ranker<'_> {
            Ranker {
                documents: &self.documents,
                matrix: &self.matrix,
                stop_words: &self.stop_words,
                thesaurus: &self.thesaurus,
                stemmer: &self.stemmer,
                domain_root: "http://a.com",
            }
        }
    }

    #[test]
    fn test_validate_query() {
        assert!(validate_query("the car").is_ok());
        assert!(validate_query("").is_ok());
        assert_eq!(
            validate_query("car 42"),
            Err(QueryError::InvalidToken("42".to_string()))
        );
    }

    #[test]
    fn test_ranks_by_similarity() {
        let fixture = Fixture::new(
            &[
                ("One", "garden flower flower"),
                ("Two", "garden soil"),
                ("Three", "engine piston"),
            ],
            "",
        );
        let results = fixture.ranker().process_query("flower", 6);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "One");
        assert_eq!(results[0].url, "/site/doc0.html");
        assert_eq!(results[0].snippet, "garden flower flower");
    }

    #[test]
    fn test_scores_are_descending_and_positive() {
        let fixture = Fixture::new(
            &[
                ("One", "garden flower"),
                ("Two", "garden flower flower soil"),
                ("Three", "engine piston"),
                ("Four", "soil tractor"),
            ],
            "",
        );
        let results = fixture.ranker().process_query("flower soil", 2);

        assert_eq!(results.len(), 2);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(results.iter().all(|r| r.score > 0.0));
    }

    #[test]
    fn test_title_bonus_is_case_insensitive() {
        let fixture = Fixture::new(
            &[("Car Reviews", "engine piston"), ("Other", "garden soil")],
            "",
        );
        let results = fixture.ranker().process_query("CAR", 6);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Car Reviews");
        assert!((results[0].score - TITLE_BONUS).abs() < 1e-9);
        assert_eq!(results[0].formatted_score(), "0.2500");
    }

    #[test]
    fn test_thesaurus_expansion_finds_synonym() {
        let fixture = Fixture::new(
            &[
                ("Motors", "automobile engine"),
                ("Bakery", "banana bread"),
                ("Yard", "garden soil"),
            ],
            "car, automobile",
        );
        let results = fixture.ranker().process_query("the car", 6);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Motors");
    }

    #[test]
    fn test_expansion_happens_once() {
        // Only a second expansion (auto -> vehicle) could reach the document
        let fixture = Fixture::new(
            &[("Garage", "vehicle repair"), ("Bakery", "banana bread")],
            "car, auto\nauto, vehicle",
        );
        let results = fixture.ranker().process_query("car", 6);
        assert!(results.is_empty());
    }

    #[test]
    fn test_stop_word_only_query() {
        let fixture = Fixture::new(&[("One", "garden soil"), ("Two", "engine")], "");
        assert!(fixture.ranker().process_query("the a", 6).is_empty());
    }

    #[test]
    fn test_result_count_capped_at_k() {
        let fixture = Fixture::new(
            &[
                ("A", "garden one"),
                ("B", "garden two"),
                ("C", "garden three"),
                ("D", "other four"),
            ],
            "",
        );
        let results = fixture.ranker().process_query("garden", 2);
        assert_eq!(results.len(), 2);
    }
}
