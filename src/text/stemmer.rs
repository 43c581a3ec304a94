use rust_stemmers::Algorithm;

/// Reduces a word to its root form
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;
}

/// English (Porter2) stemmer
pub struct EnglishStemmer {
    inner: rust_stemmers::Stemmer,
}

impl EnglishStemmer {
    pub fn new() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for EnglishStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for EnglishStemmer {
    fn stem(&self, word: &str) -> String {
        self.inner.stem(word).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stemming() {
        let stemmer = EnglishStemmer::new();
        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("cats"), "cat");
        assert_eq!(stemmer.stem("search"), "search");
    }

    #[test]
    fn test_stemming_is_deterministic() {
        let stemmer = EnglishStemmer::new();
        assert_eq!(stemmer.stem("automobile"), stemmer.stem("automobile"));
        assert_eq!(stemmer.stem("automobiles"), stemmer.stem("automobile"));
    }
}
