//! Text normalization and tokenization shared by the classifier and renderers

use unicode_segmentation::UnicodeSegmentation;

/// Apostrophe variants folded to `'` before any lexicon comparison
const APOSTROPHE_VARIANTS: [char; 4] = ['\u{2019}', '\u{2018}', '\u{02BC}', '\u{FF07}'];

/// Regex character class accepting every apostrophe form
pub(crate) const APOSTROPHE_CLASS: &str = "['\u{2019}\u{2018}\u{02BC}\u{FF07}]";

pub fn is_apostrophe(c: char) -> bool {
    c == '\'' || APOSTROPHE_VARIANTS.contains(&c)
}

/// Replace curly and other apostrophe variants with a straight apostrophe
pub fn normalize_apostrophes(text: &str) -> String {
    text.chars()
        .map(|c| if APOSTROPHE_VARIANTS.contains(&c) { '\'' } else { c })
        .collect()
}

/// Lowercase plus apostrophe normalization
pub fn normalize(text: &str) -> String {
    normalize_apostrophes(&text.to_lowercase())
}

/// Whitespace-only split of normalized text, as used by the lexicon categories
///
/// Punctuation stays attached (`"in."` is not `"in"`).
pub fn whitespace_tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}

/// Word tokens for render-time lookups: Unicode word boundaries, normalized
///
/// Keeps internal apostrophes so `"Don’t"` yields `"don't"`.
pub fn words(text: &str) -> Vec<String> {
    text.unicode_words().map(normalize).collect()
}
