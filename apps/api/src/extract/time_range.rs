//! Time-range extraction — six literal pattern shapes, first
//! structurally valid match wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::TimeRange;

/// The six accepted shapes, tried in order. Minute components are
/// captured but dropped: missions are announced on whole hours.
static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b(\d{1,2})h(\d{2})\s*[-–]\s*(\d{1,2})h(\d{2})\b", // 19h30-23h00
        r"\b(\d{1,2}):(\d{2})\s*[-–]\s*(\d{1,2}):(\d{2})\b", // 19:30-23:00
        r"\b(\d{1,2})h\s*[-–]\s*(\d{1,2})h\b",               // 19h-23h
        r"\bde\s+(\d{1,2})\s*h(?:\d{2})?\s+a\s+(\d{1,2})\s*h\b", // de 19h à 23h
        r"\b(\d{1,2})\s*h\s+a\s+(\d{1,2})\s*h\b",            // 19h à 23h
        r"\b(\d{1,2})h\s+(\d{1,2})h\b",                      // 19h 23h
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Extracts the first valid time window from free text.
///
/// A match is valid when start and end are both in 0..=23 and end is
/// strictly after start; anything else falls through to the next shape.
pub fn detect_time_range(text: &str) -> Option<TimeRange> {
    let lowered = crate::text::strip_diacritics(&text.to_lowercase());
    // "minuit" closes a service at 23h, "midi" opens one at 12h.
    let lowered = lowered.replace("minuit", "23h").replace("midi", "12h");

    for (idx, pattern) in PATTERNS.iter().enumerate() {
        if let Some(caps) = pattern.captures(&lowered) {
            let (start_idx, end_idx) = match idx {
                // Four-capture shapes carry minutes in groups 2 and 4.
                0 | 1 => (1, 3),
                _ => (1, 2),
            };
            let start: u32 = caps.get(start_idx)?.as_str().parse().ok()?;
            let end: u32 = caps.get(end_idx)?.as_str().parse().ok()?;
            if start <= 23 && end <= 23 && end > start {
                return Some(TimeRange { start, end });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_six_shapes() {
        for text in [
            "19h30-23h00",
            "19:30-23:00",
            "19h-23h",
            "de 19h à 23h",
            "19h à 23h",
            "samedi 19h 23h",
        ] {
            let range = detect_time_range(text).unwrap_or_else(|| panic!("no match for {text}"));
            assert_eq!(range, TimeRange { start: 19, end: 23 }, "shape: {text}");
        }
    }

    #[test]
    fn test_valid_ranges_across_the_day() {
        for start in 0u32..23 {
            let end = start + 1;
            let range = detect_time_range(&format!("{start}h-{end}h")).unwrap();
            assert_eq!(range.to_string(), format!("{start}h–{end}h"));
        }
    }

    #[test]
    fn test_end_must_be_after_start() {
        assert_eq!(detect_time_range("23h-19h"), None);
        assert_eq!(detect_time_range("19h-19h"), None);
    }

    #[test]
    fn test_hours_out_of_band_rejected() {
        assert_eq!(detect_time_range("19h-25h"), None);
    }

    #[test]
    fn test_minuit_closes_at_23h() {
        let range = detect_time_range("de 19h à minuit").unwrap();
        assert_eq!(range.start, 19);
        assert_eq!(range.end, 23);
    }

    #[test]
    fn test_midi_opens_at_12h() {
        let range = detect_time_range("de midi à 15h").unwrap();
        assert_eq!(range, TimeRange { start: 12, end: 15 });
    }

    #[test]
    fn test_no_range_returns_none() {
        assert_eq!(detect_time_range("samedi soir au centre-ville"), None);
    }
}
