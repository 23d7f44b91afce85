//! Weighted fuzzy string similarity on a 0–100 scale.
//!
//! Mirrors the usual "WRatio" recipe: both strings are normalised (lowercase,
//! non-alphanumerics to spaces), then the best of a plain ratio, token-sorted and
//! token-set ratios is taken. The plain ratio is the indel similarity
//! `2·M / (|a| + |b|)`, M being the longest common subsequence. When lengths differ by 1.5× or more, partial
//! (best-window) variants are used instead, scaled down.

use std::collections::BTreeSet;

use rapidfuzz::fuzz;

const TOKEN_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.9;
const LONG_PARTIAL_SCALE: f64 = 0.6;

fn normalize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c.to_lowercase().next().unwrap_or(c) } else { ' ' })
        .collect::<String>()
        .trim()
        .to_string()
}

fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    fuzz::ratio(a.chars(), b.chars()) * 100.0
}

/// Best ratio of the shorter string against every same-length window of the longer.
fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let short_len = short.chars().count();
    let long_chars: Vec<char> = long.chars().collect();
    if short_len == 0 || short_len == long_chars.len() {
        return ratio(short, long);
    }

    let mut best = 0.0_f64;
    for start in 0..=(long_chars.len() - short_len) {
        let window: String = long_chars[start..start + short_len].iter().collect();
        best = best.max(ratio(short, &window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort(a: &str, b: &str, scorer: fn(&str, &str) -> f64) -> f64 {
    scorer(&sorted_tokens(a), &sorted_tokens(b))
}

fn token_set(a: &str, b: &str, scorer: fn(&str, &str) -> f64) -> f64 {
    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();

    let join = |set: Vec<&str>| set.join(" ");
    let sect = join(ta.intersection(&tb).copied().collect());
    let diff_ab = join(ta.difference(&tb).copied().collect());
    let diff_ba = join(tb.difference(&ta).copied().collect());

    let combine = |diff: &str| match (sect.is_empty(), diff.is_empty()) {
        (true, _) => diff.to_string(),
        (false, true) => sect.clone(),
        (false, false) => format!("{sect} {diff}"),
    };
    let combined_ab = combine(&diff_ab);
    let combined_ba = combine(&diff_ba);

    let mut best = scorer(&combined_ab, &combined_ba);
    if !sect.is_empty() {
        best = best
            .max(scorer(&sect, &combined_ab))
            .max(scorer(&sect, &combined_ba));
    }
    best
}

/// Similarity of two strings in `0..=100`. Empty input (after normalisation) scores 0.
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (len_a, len_b) = (a.chars().count() as f64, b.chars().count() as f64);
    let len_ratio = len_a.max(len_b) / len_a.min(len_b);
    let base = ratio(&a, &b);

    let best = if len_ratio < 1.5 {
        base.max(token_sort(&a, &b, ratio) * TOKEN_SCALE)
            .max(token_set(&a, &b, ratio) * TOKEN_SCALE)
    } else {
        let scale = if len_ratio < 8.0 {
            PARTIAL_SCALE
        } else {
            LONG_PARTIAL_SCALE
        };
        base.max(partial_ratio(&a, &b) * scale)
            .max(token_sort(&a, &b, partial_ratio) * TOKEN_SCALE * scale)
            .max(token_set(&a, &b, partial_ratio) * TOKEN_SCALE * scale)
    };

    best.round().clamp(0.0, 100.0) as u8
}

/// The highest-scoring choice and its score; the earliest choice wins ties.
pub fn best_match<'a, S: AsRef<str>>(query: &str, choices: &'a [S]) -> Option<(&'a str, u8)> {
    let mut best: Option<(&'a str, u8)> = None;
    for choice in choices {
        let score = weighted_ratio(query, choice.as_ref());
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((choice.as_ref(), score));
        }
    }
    best
}
