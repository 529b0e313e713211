use super::text::{normalize_text, similarity, tokens, TextComparison};

const ABBREVIATIONS: [(&str, &str); 18] = [
    ("street", "st"),
    ("avenue", "ave"),
    ("av", "ave"),
    ("road", "rd"),
    ("drive", "dr"),
    ("boulevard", "blvd"),
    ("crescent", "cres"),
    ("court", "crt"),
    ("ct", "crt"),
    ("place", "pl"),
    ("lane", "ln"),
    ("apartment", "apt"),
    ("unit", "apt"),
    ("north", "n"),
    ("south", "s"),
    ("east", "e"),
    ("west", "w"),
    ("ontario", "on"),
];

fn canonical_tokens(value: &str) -> Vec<String> {
    let raw = tokens(value);
    let mut merged: Vec<String> = Vec::with_capacity(raw.len());
    let mut index = 0;
    while index < raw.len() {
        let token = &raw[index];
        if let Some(next) = raw.get(index + 1) {
            if is_postal_half(token, true) && is_postal_half(next, false) {
                merged.push(format!("{token}{next}"));
                index += 2;
                continue;
            }
        }
        let canonical = ABBREVIATIONS
            .iter()
            .find(|(long, _)| long == token)
            .map(|(_, short)| short.to_string())
            .unwrap_or_else(|| token.clone());
        merged.push(canonical);
        index += 1;
    }
    merged
}

/// `A1A` (forward sortation area) or `1A1` (local delivery unit).
fn is_postal_half(token: &str, leading: bool) -> bool {
    let chars: Vec<char> = token.chars().collect();
    chars.len() == 3
        && chars.iter().enumerate().all(|(i, c)| {
            let expect_letter = (i % 2 == 0) == leading;
            if expect_letter {
                c.is_ascii_alphabetic()
            } else {
                c.is_ascii_digit()
            }
        })
}

fn postal_code(tokens: &[String]) -> Option<&str> {
    tokens
        .iter()
        .find(|token| {
            token.len() == 6
                && token.is_ascii()
                && is_postal_half(&token[..3], true) && is_postal_half(&token[3..], false)
        })
        .map(String::as_str)
}

/// Compare a mailing address against a garaging or residence address.
///
/// Identical text (ignoring case and punctuation) matches. Street-type abbreviations,
/// reordered parts, an address that is a subset of the other (city or province omitted),
/// the same postal code, or a similarity at or above `threshold` are format differences.
pub fn address_match(left: &str, right: &str, threshold: f32) -> TextComparison {
    let left_normal = normalize_text(left);
    let right_normal = normalize_text(right);
    if left_normal.is_empty() || right_normal.is_empty() {
        return TextComparison::Mismatch;
    }
    if left_normal == right_normal {
        return TextComparison::Match;
    }

    let left_tokens = canonical_tokens(left);
    let right_tokens = canonical_tokens(right);
    if left_tokens == right_tokens {
        return TextComparison::FormatDifference;
    }

    let mut left_sorted = left_tokens.clone();
    let mut right_sorted = right_tokens.clone();
    left_sorted.sort();
    right_sorted.sort();
    if left_sorted == right_sorted {
        return TextComparison::FormatDifference;
    }

    if let (Some(left_postal), Some(right_postal)) =
        (postal_code(&left_tokens), postal_code(&right_tokens))
    {
        if left_postal == right_postal {
            return TextComparison::FormatDifference;
        }
    }

    let (short, long) = if left_tokens.len() <= right_tokens.len() {
        (&left_tokens, &right_tokens)
    } else {
        (&right_tokens, &left_tokens)
    };
    if short.len() >= 2 && short.iter().all(|token| long.contains(token)) {
        return TextComparison::FormatDifference;
    }

    if similarity(&left_tokens.join(" "), &right_tokens.join(" ")) >= threshold {
        TextComparison::FormatDifference
    } else {
        TextComparison::Mismatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_and_case_do_not_matter() {
        assert_eq!(
            address_match(
                "123 Main St., Toronto, ON M6N 1T3",
                "123 MAIN ST TORONTO ON M6N 1T3",
                0.75
            ),
            TextComparison::Match
        );
    }

    #[test]
    fn abbreviations_and_postal_spacing_are_format_differences() {
        assert_eq!(
            address_match(
                "123 Main Street, Toronto, Ontario M6N1T3",
                "123 Main St Toronto ON M6N 1T3",
                0.75
            ),
            TextComparison::FormatDifference
        );
    }

    #[test]
    fn shorter_address_contained_in_longer_is_a_format_difference() {
        assert_eq!(
            address_match("45 Lakeshore Rd, Oakville", "45 Lakeshore Rd", 0.75),
            TextComparison::FormatDifference
        );
    }

    #[test]
    fn different_streets_and_postal_codes_mismatch() {
        assert_eq!(
            address_match(
                "123 Main St Toronto ON M6N 1T3",
                "88 Queen St W Ottawa ON K1P 5E7",
                0.75
            ),
            TextComparison::Mismatch
        );
    }
}
