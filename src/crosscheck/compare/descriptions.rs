use super::text::{normalize_text, similarity};

const REPLACEMENTS: [(&str, &str); 9] = [
    ("drv", "drive"),
    ("driving", "drive"),
    ("com", "communication"),
    ("dev", "device"),
    ("using", "use"),
    ("holding", "hold"),
    ("veh", "vehicle"),
    ("mv", "vehicle"),
    ("prohibited", "not allowed"),
];

/// Offence families; two descriptions naming the same family describe the same conviction.
const OFFENCE_GROUPS: [&[&str]; 7] = [
    &["speed", "speeding", "exceed", "km/h", "kmh", "mph"],
    &["handheld", "hand-held", "hand held", "device", "communication", "cell phone"],
    &["red light", "traffic light", "amber light", "signal"],
    &["stop sign", "fail to stop", "failed to stop"],
    &["seatbelt", "seat belt", "restraint"],
    &["impaired", "dui", "dwi", "alcohol", "intoxicated", "over 80"],
    &["careless", "dangerous", "stunt", "racing"],
];

fn normalize_description(value: &str) -> String {
    normalize_text(value)
        .split(' ')
        .map(|token| {
            REPLACEMENTS
                .iter()
                .find(|(short, _)| *short == token)
                .map(|(_, long)| *long)
                .unwrap_or(token)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn offence_group(value: &str) -> Option<usize> {
    let lowered = value.to_lowercase();
    OFFENCE_GROUPS
        .iter()
        .position(|keywords| keywords.iter().any(|keyword| lowered.contains(keyword)))
}

/// Whether an MVR conviction description and a quote conviction description refer to
/// the same offence: identical after normalization, similar at or above `threshold`, or
/// naming the same offence family.
pub fn descriptions_match(left: &str, right: &str, threshold: f32) -> bool {
    let left_normal = normalize_description(left);
    let right_normal = normalize_description(right);
    if left_normal.is_empty() || right_normal.is_empty() {
        return false;
    }
    if left_normal == right_normal || similarity(&left_normal, &right_normal) >= threshold {
        return true;
    }

    match (offence_group(left), offence_group(right)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
