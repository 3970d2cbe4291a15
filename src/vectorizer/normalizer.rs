use once_cell::sync::Lazy;
use regex::Regex;

// Everything outside the ASCII word range (minus digits) separates tokens.
// Applied after lowercasing, so `[^a-z_]` covers digits, punctuation,
// whitespace and non-ASCII in one pass.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z_]+").unwrap());

/// Lower-case `text` and split it into word tokens.
///
/// Every maximal run of digit or non-word characters collapses into a single
/// separator, so empty or all-punctuation input yields an empty token list
/// rather than an error.
pub fn normalize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .split(&lowered)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
