//! Hourly-rate extraction — a small cascade of monetary phrases with a
//! positional tie-break for announcements that restate the rate.

use once_cell::sync::Lazy;
use regex::Regex;

/// Plausibility band. Amounts outside it are ignored entirely.
pub const RATE_MIN: u32 = 10;
pub const RATE_MAX: u32 = 200;

/// Two amounts this close are treated as one statement reinforced, and
/// the later-written one wins. Heuristic constant — tunable, not a
/// semantic guarantee.
pub const RATE_TIE_DELTA: u32 = 3;

static RATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(\d{1,3})(?:[.,]\d{1,2})?\s*(?:€|euros?)\s*/\s*h(?:eure)?\b",
        r"(\d{1,3})(?:[.,]\d{1,2})?\s*(?:€|euros?)\s+(?:par|de l['’]?)\s*heure\b",
        r"(\d{1,3})(?:[.,]\d{1,2})?\s*(?:€|euros?)\s+l['’]?heure\b",
        r"(\d{1,3})(?:[.,]\d{1,2})?\s*(?:€|euros?)\s*(?:brut|net)?\s*/\s*heure\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Extracts the hourly rate, formatted as `"{n}€/h"`.
///
/// All candidates across all patterns are collected with their text
/// position and filtered to [RATE_MIN, RATE_MAX]. When several remain:
/// the maximum wins, unless the right-most amount is within
/// [`RATE_TIE_DELTA`] of that maximum — then the right-most wins.
pub fn detect_hourly_rate(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();

    let mut candidates: Vec<(usize, u32)> = Vec::new();
    for pattern in RATE_PATTERNS.iter() {
        for caps in pattern.captures_iter(&lowered) {
            let full = caps.get(0)?;
            let value: u32 = caps.get(1)?.as_str().parse().ok()?;
            if (RATE_MIN..=RATE_MAX).contains(&value)
                && !candidates.iter().any(|(pos, _)| *pos == full.start())
            {
                candidates.push((full.start(), value));
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let max_value = candidates.iter().map(|(_, v)| *v).max()?;
    let (_, rightmost_value) = *candidates.iter().max_by_key(|(pos, _)| *pos)?;

    let chosen = if max_value - rightmost_value <= RATE_TIE_DELTA {
        rightmost_value
    } else {
        max_value
    };

    Some(format!("{chosen}€/h"))
}

/// Parses a previously formatted rate string back to its numeric value.
/// Used by the suggestion engine to avoid restating present amounts.
pub fn rate_value(formatted: &str) -> Option<u32> {
    formatted.trim_end_matches("€/h").parse().ok()
}
