//! Date extraction — relative terms, weekday names, holiday windows,
//! explicit day+month, then numeric dates. Every branch rejects dates
//! in the past; `today` is injected so tests stay deterministic.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::normalize;

const WEEKDAYS: &[(&str, Weekday)] = &[
    ("lundi", Weekday::Mon),
    ("mardi", Weekday::Tue),
    ("mercredi", Weekday::Wed),
    ("jeudi", Weekday::Thu),
    ("vendredi", Weekday::Fri),
    ("samedi", Weekday::Sat),
    ("dimanche", Weekday::Sun),
];

const MONTHS: &[(&str, u32)] = &[
    ("janvier", 1),
    ("fevrier", 2),
    ("mars", 3),
    ("avril", 4),
    ("mai", 5),
    ("juin", 6),
    ("juillet", 7),
    ("aout", 8),
    ("septembre", 9),
    ("octobre", 10),
    ("novembre", 11),
    ("decembre", 12),
];

// Holiday windows as (month, day) candidate lists. Calendar data, not
// logic: refresh the lists without touching the resolution code.
const NOEL_WINDOW: &[(u32, u32)] = &[(12, 20), (12, 21), (12, 22), (12, 23), (12, 24)];
const TOUSSAINT_WINDOW: &[(u32, u32)] = &[(10, 31), (11, 1)];
const ETE_WINDOW: &[(u32, u32)] = &[(7, 1), (7, 15), (8, 1)];

static EXPLICIT_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:lundi |mardi |mercredi |jeudi |vendredi |samedi |dimanche )?(\d{1,2})(?:er)? (janvier|fevrier|mars|avril|mai|juin|juillet|aout|septembre|octobre|novembre|decembre)(?: (\d{4}))?\b",
    )
    .unwrap()
});

static NUMERIC_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?\b").unwrap());

/// Extracts a date from free text. Returns `None` when nothing matches
/// or every candidate lies in the past.
pub fn detect_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let normalized = normalize(text);

    if let Some(date) = match_relative(&normalized, today) {
        return Some(date);
    }
    if let Some(date) = match_weekday(&normalized, today) {
        return Some(date);
    }
    if let Some(date) = match_holiday(&normalized, today) {
        return Some(date);
    }
    if let Some(date) = match_explicit(&normalized, today) {
        return Some(date);
    }
    match_numeric(&normalized, today)
}

/// "aujourd'hui" / "ce soir" → today, "demain" → +1, "après-demain" → +2.
fn match_relative(normalized: &str, today: NaiveDate) -> Option<NaiveDate> {
    if normalized.contains("apres demain") {
        return Some(today + Duration::days(2));
    }
    if normalized.contains("demain") {
        return Some(today + Duration::days(1));
    }
    if normalized.contains("aujourd hui")
        || normalized.contains("ce soir")
        || normalized.contains("ce midi")
        || normalized.contains("ce matin")
    {
        return Some(today);
    }
    None
}

/// Named weekday → the *next* occurrence, 1–7 days out, never same-day.
///
/// A weekday directly followed by a day number ("samedi 7 mars") is the
/// explicit-date shape and is left to that branch.
fn match_weekday(normalized: &str, today: NaiveDate) -> Option<NaiveDate> {
    let padded = format!(" {normalized} ");
    for (name, weekday) in WEEKDAYS {
        if let Some(pos) = padded.find(&format!(" {name} ")) {
            let after = &padded[pos + name.len() + 2..];
            if after.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                continue;
            }
            let mut offset = (weekday.num_days_from_monday() as i64
                - today.weekday().num_days_from_monday() as i64)
                .rem_euclid(7);
            if offset == 0 {
                offset = 7;
            }
            return Some(today + Duration::days(offset));
        }
    }
    None
}

/// Holiday windows resolve to the earliest candidate date of the next
/// upcoming occurrence (this year, else next year).
fn match_holiday(normalized: &str, today: NaiveDate) -> Option<NaiveDate> {
    let window: &[(u32, u32)] = if normalized.contains("noel") {
        NOEL_WINDOW
    } else if normalized.contains("toussaint") {
        TOUSSAINT_WINDOW
    } else if normalized.contains("cet ete") || normalized.contains("vacances d ete") {
        ETE_WINDOW
    } else {
        return None;
    };

    for year in [today.year(), today.year() + 1] {
        let earliest = window
            .iter()
            .filter_map(|&(m, d)| NaiveDate::from_ymd_opt(year, m, d))
            .filter(|d| *d >= today)
            .min();
        if earliest.is_some() {
            return earliest;
        }
    }
    None
}

/// "[weekday] D month [YYYY]". Year defaults to the current year; a
/// resulting past date falls through to the next branch.
fn match_explicit(normalized: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = EXPLICIT_DATE_RE.captures(normalized)?;
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month_name = caps.get(2)?.as_str();
    let month = MONTHS.iter().find(|(n, _)| *n == month_name)?.1;
    let year: i32 = match caps.get(3) {
        Some(y) => y.as_str().parse().ok()?,
        None => today.year(),
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    if date >= today {
        Some(date)
    } else if caps.get(3).is_none() {
        // Year was defaulted; the writer almost certainly meant the next
        // occurrence of that calendar day.
        NaiveDate::from_ymd_opt(year + 1, month, day).filter(|d| *d >= today)
    } else {
        None
    }
}

/// Numeric `D/M[/Y]`. Two-digit years are 2000-based.
fn match_numeric(normalized: &str, today: NaiveDate) -> Option<NaiveDate> {
    for caps in NUMERIC_DATE_RE.captures_iter(normalized) {
        let day: u32 = caps.get(1)?.as_str().parse().ok()?;
        let month: u32 = caps.get(2)?.as_str().parse().ok()?;
        let year: i32 = match caps.get(3) {
            Some(y) => {
                let raw: i32 = y.as_str().parse().ok()?;
                if raw < 100 {
                    2000 + raw
                } else {
                    raw
                }
            }
            None => today.year(),
        };

        let candidate = NaiveDate::from_ymd_opt(year, month, day).and_then(|date| {
            if date >= today {
                Some(date)
            } else if caps.get(3).is_none() {
                NaiveDate::from_ymd_opt(year + 1, month, day).filter(|d| *d >= today)
            } else {
                None
            }
        });
        if candidate.is_some() {
            return candidate;
        }
    }
    None
}

/// Formats a date the way announcements spell it: "samedi 7 mars 2026".
pub fn format_date_fr(date: NaiveDate) -> String {
    let weekday = WEEKDAYS
        .iter()
        .find(|(_, w)| *w == date.weekday())
        .map(|(n, _)| *n)
        .unwrap_or("");
    let month = MONTH_DISPLAY
        .get(date.month0() as usize)
        .copied()
        .unwrap_or("");
    format!("{weekday} {} {month} {}", date.day(), date.year())
}

const MONTH_DISPLAY: &[&str] = &[
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // A Monday.
    fn today() -> NaiveDate {
        day(2026, 3, 2)
    }

    #[test]
    fn test_relative_terms() {
        assert_eq!(detect_date("besoin aujourd'hui", today()), Some(today()));
        assert_eq!(detect_date("pour demain", today()), Some(day(2026, 3, 3)));
        assert_eq!(
            detect_date("après-demain matin", today()),
            Some(day(2026, 3, 4))
        );
        assert_eq!(detect_date("un extra ce soir", today()), Some(today()));
    }

    #[test]
    fn test_apres_demain_checked_before_demain() {
        // "après-demain" contains "demain"; must resolve to +2, not +1.
        assert_eq!(detect_date("après-demain", today()), Some(day(2026, 3, 4)));
    }

    #[test]
    fn test_weekday_resolves_to_next_occurrence() {
        // today() is Monday 2026-03-02; "samedi" → Saturday 2026-03-07.
        assert_eq!(
            detect_date("serveur pour samedi soir", today()),
            Some(day(2026, 3, 7))
        );
    }

    #[test]
    fn test_same_weekday_never_resolves_to_today() {
        // "lundi" on a Monday → next Monday, 7 days out.
        assert_eq!(detect_date("mission lundi", today()), Some(day(2026, 3, 9)));
    }

    #[test]
    fn test_explicit_day_month() {
        assert_eq!(
            detect_date("samedi 7 mars", today()),
            Some(day(2026, 3, 7))
        );
        assert_eq!(
            detect_date("le 15 avril 2026", today()),
            Some(day(2026, 4, 15))
        );
    }

    #[test]
    fn test_weekday_followed_by_day_number_uses_explicit_branch() {
        // The stated calendar date wins over the weekday word.
        assert_eq!(
            detect_date("lundi 15 avril 2026", today()),
            Some(day(2026, 4, 15))
        );
    }

    #[test]
    fn test_explicit_past_with_year_is_rejected() {
        assert_eq!(detect_date("le 15 avril 2020", today()), None);
    }

    #[test]
    fn test_explicit_past_without_year_rolls_forward() {
        // 1 janvier already passed in 2026 → 2027.
        assert_eq!(detect_date("le 1er janvier", today()), Some(day(2027, 1, 1)));
    }

    #[test]
    fn test_numeric_date() {
        assert_eq!(detect_date("dispo le 7/3", today()), Some(day(2026, 3, 7)));
        assert_eq!(
            detect_date("le 07/03/2026", today()),
            Some(day(2026, 3, 7))
        );
        assert_eq!(detect_date("le 10/04/26", today()), Some(day(2026, 4, 10)));
    }

    #[test]
    fn test_numeric_invalid_date_ignored() {
        assert_eq!(detect_date("le 32/13", today()), None);
    }

    #[test]
    fn test_holiday_noel_earliest_upcoming() {
        assert_eq!(
            detect_date("extra pour noël", today()),
            Some(day(2026, 12, 20))
        );
        // Mid-window: earliest candidate >= today.
        assert_eq!(
            detect_date("extra pour noël", day(2026, 12, 22)),
            Some(day(2026, 12, 22))
        );
        // Window fully past → next year.
        assert_eq!(
            detect_date("extra pour noël", day(2026, 12, 26)),
            Some(day(2027, 12, 20))
        );
    }

    #[test]
    fn test_holiday_toussaint() {
        assert_eq!(
            detect_date("renfort toussaint", today()),
            Some(day(2026, 10, 31))
        );
    }

    #[test]
    fn test_ete_requires_a_holiday_phrase() {
        // "a été" the verb must not trigger the summer window.
        assert_eq!(detect_date("le poste a été pourvu", today()), None);
        assert_eq!(
            detect_date("mission cet été", today()),
            Some(day(2026, 7, 1))
        );
    }

    #[test]
    fn test_relative_outranks_weekday() {
        // Monday today: "demain" wins over "samedi".
        assert_eq!(
            detect_date("demain ou samedi", today()),
            Some(day(2026, 3, 3))
        );
    }

    #[test]
    fn test_no_date_returns_none() {
        assert_eq!(detect_date("je cherche un serveur à Lille", today()), None);
    }

    #[test]
    fn test_format_date_fr() {
        assert_eq!(format_date_fr(day(2026, 3, 7)), "samedi 7 mars 2026");
        assert_eq!(format_date_fr(day(2026, 8, 1)), "samedi 1 août 2026");
    }
}
