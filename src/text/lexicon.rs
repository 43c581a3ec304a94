//! Stop-word and thesaurus word lists
//!
//! Both are loaded once before crawling and are read-only afterward. A file
//! that cannot be read or parsed is a configuration error.

use crate::{ConfigError, ConfigResult};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Words dropped from page text and queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Loads a newline-separated stop-word list
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = read_word_list(path)?;
        Ok(Self::parse(&content))
    }

    /// Parses a newline-separated stop-word list
    pub fn parse(content: &str) -> Self {
        Self::from_words(content.lines())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Synonym alternatives used to widen sparse queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thesaurus {
    entries: HashMap<String, Vec<String>>,
}

impl Thesaurus {
    /// Loads a thesaurus of comma-separated rows: `word, synonym, synonym, ...`
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = read_word_list(path)?;
        Self::parse(&content).map_err(|message| ConfigError::Lexicon {
            path: path.display().to_string(),
            message,
        })
    }

    /// Parses thesaurus rows; blank lines are skipped
    pub fn parse(content: &str) -> Result<Self, String> {
        let mut entries = HashMap::new();

        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let mut cells = line.split(',').map(|cell| cell.trim().to_lowercase());
            let word = cells.next().unwrap_or_default();
            if word.is_empty() {
                return Err(format!("line {}: missing head word", line_num + 1));
            }

            let alternatives: Vec<String> = cells.filter(|cell| !cell.is_empty()).collect();
            entries.insert(word, alternatives);
        }

        Ok(Self { entries })
    }

    pub fn synonyms(&self, word: &str) -> Option<&[String]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    /// Appends the synonyms of every query token that are not already present
    ///
    /// # Examples
    ///
    /// ```
    /// use quarry::text::Thesaurus;
    ///
    /// let thesaurus = Thesaurus::parse("car, automobile, vehicle").unwrap();
    /// assert_eq!(thesaurus.expand("the car"), "the car automobile vehicle");
    /// ```
    pub fn expand(&self, query: &str) -> String {
        let mut tokens: Vec<String> = query.split_whitespace().map(str::to_string).collect();
        let originals = tokens.clone();

        for token in &originals {
            if let Some(alternatives) = self.synonyms(token) {
                for alternative in alternatives {
                    if !tokens.contains(alternative) {
                        tokens.push(alternative.clone());
                    }
                }
            }
        }

        tokens.join(" ")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn read_word_list(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::Lexicon {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
