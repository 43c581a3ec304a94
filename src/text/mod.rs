//! Text processing capabilities
//!
//! Tokenization with the token-validity rule, stemming, and the stop-word
//! and thesaurus word lists.

mod lexicon;
mod stemmer;
mod tokenizer;

pub use lexicon::{StopWords, Thesaurus};
pub use stemmer::{EnglishStemmer, Stemmer};
pub use tokenizer::{extract_terms, query_tokens, word_is_valid};
