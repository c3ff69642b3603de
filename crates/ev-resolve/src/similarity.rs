//! Weighted string similarity on a 0–100 scale.
//!
//! [`score`] takes the best of three views of the pair:
//!
//! | Component          | Weight | Applies when                                   |
//! |--------------------|--------|------------------------------------------------|
//! | [`ratio`]          | 1.00   | always                                         |
//! | [`token_sort_ratio`] | 0.95 | always                                         |
//! | [`partial_ratio`]  | 0.90   | the longer string is ≥ 1.5× the shorter's length |
//! | [`partial_ratio`]  | 0.60   | the longer string is > 8× the shorter's length   |
//!
//! All lengths are in `char`s, not bytes.

const TOKEN_SORT_WEIGHT: f64 = 0.95;
const PARTIAL_WEIGHT: f64 = 0.90;
const PARTIAL_LENGTH_RATIO: f64 = 1.5;
// Partial weight once the longer string exceeds 8x the shorter.
const PARTIAL_WEIGHT_FAR: f64 = 0.60;
const FAR_LENGTH_RATIO: f64 = 8.0;

/// Normalized Levenshtein similarity × 100.
pub fn ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// [`ratio`] after sorting the whitespace-separated tokens of both strings,
/// so `"west andheri"` and `"andheri west"` compare equal.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Best [`ratio`] between the shorter string and every equally long window
/// of the longer one.  `0.0` if the shorter string is empty.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() { (a, b) } else { (b, a) };
    let short_len = short.chars().count();
    if short_len == 0 {
        return 0.0;
    }

    let long_chars: Vec<char> = long.chars().collect();
    let mut best = 0.0_f64;
    for window in long_chars.windows(short_len) {
        let candidate: String = window.iter().collect();
        best = best.max(ratio(short, &candidate));
        if best >= 100.0 {
            break;
        }
    }
    best
}

/// Weighted similarity rounded to an integer in `0..=100`.
///
/// Identical strings always score 100.
pub fn score(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }

    let mut best = ratio(a, b).max(token_sort_ratio(a, b) * TOKEN_SORT_WEIGHT);

    let (la, lb) = (a.chars().count() as f64, b.chars().count() as f64);
    let (short, long) = if la <= lb { (la, lb) } else { (lb, la) };
    if short > 0.0 && long >= PARTIAL_LENGTH_RATIO * short {
        let weight = if long > FAR_LENGTH_RATIO * short { PARTIAL_WEIGHT_FAR } else { PARTIAL_WEIGHT };
        best = best.max(partial_ratio(a, b) * weight);
    }

    best.round().clamp(0.0, 100.0) as u8
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
