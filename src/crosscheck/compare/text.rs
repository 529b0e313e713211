use serde::{Deserialize, Serialize};

/// Outcome of a fuzzy text comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextComparison {
    Match,
    /// Same value written differently (reordered, abbreviated, or a near-identical spelling).
    FormatDifference,
    Mismatch,
}

impl TextComparison {
    pub fn is_same_entity(self) -> bool {
        !matches!(self, TextComparison::Mismatch)
    }
}

/// Case-insensitive equality after trimming surrounding whitespace.
pub fn exact_match(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}

/// Lowercase tokens with punctuation treated as a separator.
pub(crate) fn tokens(value: &str) -> Vec<String> {
    value
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

pub(crate) fn normalize_text(value: &str) -> String {
    tokens(value).join(" ")
}

fn compact(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn sorted_tokens(value: &str) -> String {
    let mut parts = tokens(value);
    parts.sort();
    parts.join(" ")
}

/// Normalized Levenshtein similarity in `[0, 1]`; two empty values are identical.
pub fn similarity(left: &str, right: &str) -> f32 {
    strsim::normalized_levenshtein(left, right) as f32
}

/// Compare two free-text values such as names.
///
/// Case, whitespace, and punctuation never make a difference. Reordered tokens
/// (`Smith, John` / `John Smith`), a dropped middle name or initial, and spellings whose
/// similarity reaches `threshold` are a [`TextComparison::FormatDifference`]. Anything else,
/// including an empty side, is a mismatch.
pub fn fuzzy_match(left: &str, right: &str, threshold: f32) -> TextComparison {
    let left_compact = compact(left);
    let right_compact = compact(right);
    if left_compact.is_empty() || right_compact.is_empty() {
        return TextComparison::Mismatch;
    }

    if exact_match(left, right) || normalize_text(left) == normalize_text(right) {
        return TextComparison::Match;
    }

    let left_sorted = sorted_tokens(left);
    let right_sorted = sorted_tokens(right);
    if left_sorted == right_sorted || left_compact == right_compact {
        return TextComparison::FormatDifference;
    }

    if tokens_contained(&tokens(left), &tokens(right)) {
        return TextComparison::FormatDifference;
    }

    let score = similarity(&left_sorted, &right_sorted)
        .max(similarity(&normalize_text(left), &normalize_text(right)));
    if score >= threshold {
        TextComparison::FormatDifference
    } else {
        TextComparison::Mismatch
    }
}

/// Every token of the shorter value appears in the longer one, with single letters
/// accepted as initials. Needs at least two tokens on the shorter side.
fn tokens_contained(left: &[String], right: &[String]) -> bool {
    let (short, long) = if left.len() <= right.len() {
        (left, right)
    } else {
        (right, left)
    };
    if short.len() < 2 || short.len() == long.len() {
        return false;
    }

    let mut available: Vec<&String> = long.iter().collect();
    for token in short {
        let position = available.iter().position(|candidate| {
            *candidate == token
                || (token.chars().count() == 1 && candidate.starts_with(token.as_str()))
                || (candidate.chars().count() == 1 && token.starts_with(candidate.as_str()))
        });
        match position {
            Some(index) => {
                available.remove(index);
            }
            None => return false,
        }
    }
    true
}

/// Licence numbers compare without case, whitespace, or `-` separators.
pub fn normalize_licence(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn licence_numbers_match(left: &str, right: &str) -> bool {
    let left = normalize_licence(left);
    !left.is_empty() && left == normalize_licence(right)
}
