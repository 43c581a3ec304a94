use crate::text::StopWords;

/// Checks the token-validity rule
///
/// A valid token starts with an ASCII letter, ends with an ASCII letter or
/// digit, contains no whitespace, and is at least two characters long.
pub fn word_is_valid(word: &str) -> bool {
    let (Some(first), Some(last)) = (word.chars().next(), word.chars().last()) else {
        return false;
    };

    word.chars().count() >= 2
        && first.is_ascii_alphabetic()
        && last.is_ascii_alphanumeric()
        && !word.chars().any(char::is_whitespace)
}

/// Splits visible page text into filtered terms
///
/// Text is lowercased, ASCII punctuation is removed, and the remainder is
/// split on whitespace. Stop-words and tokens failing [`word_is_valid`] are
/// dropped. Order is preserved and terms are not stemmed.
pub fn extract_terms(text: &str, stop_words: &StopWords) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| !stop_words.contains(word) && word_is_valid(word))
        .map(str::to_string)
        .collect()
}

/// Lowercased whitespace tokens of a query or title
pub fn query_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
