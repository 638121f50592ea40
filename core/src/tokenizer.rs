use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Tokenize text into lowercase terms using NFKC normalization and Unicode
/// word-boundary segmentation (UAX #29). Punctuation-only and whitespace
/// segments are dropped; letters and digits group into terms. Documents and
/// queries must pass through this same function, otherwise their term
/// spaces diverge and scores stop being comparable.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    normalized.unicode_words().map(str::to_owned).collect()
}
