use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("non-word pattern is valid"));

/// Tokens this short ("a", "on", "of") carry no signal and are dropped.
const MAX_STOP_TOKEN_CHARS: usize = 2;

/// Lowercase, split on non-word characters, and keep the distinct tokens
/// longer than two characters.
pub fn tokenize(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, " ")
        .split_whitespace()
        .filter(|t| t.chars().count() > MAX_STOP_TOKEN_CHARS)
        .map(str::to_owned)
        .collect()
}

/// Jaccard similarity of the token sets of `a` and `b`, in [0, 1].
///
/// Two inputs that both reduce to no tokens score 0.
pub fn text_similarity(a: &str, b: &str) -> f64 {
    let ta = tokenize(a);
    let tb = tokenize(b);

    let union = ta.union(&tb).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = ta.intersection(&tb).count();
    intersection as f64 / union as f64
}
