//! Suggestion engine — grouped, priority-ranked completions for a
//! partially written request.
//!
//! Three maturity branches: empty input gets templates and contextual
//! starters, a short prefix gets job-name completions, longer text gets
//! a missing-field checklist built from a full interpretation pass.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::detect::detect_with_confidence;
use crate::extract::date::format_date_fr;
use crate::extract::rate::{RATE_MAX, RATE_MIN};
use crate::interpret::interpret;
use crate::lexicon::synonyms::SynonymTable;
use crate::lexicon::{JobLexiconEntry, Lexicon};
use crate::text::normalize;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionCategory {
    Complete,
    Role,
    City,
    Contract,
    Skills,
    Rate,
    Date,
    Hours,
    History,
    Trending,
}

#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub text: String,
    pub category: SuggestionCategory,
    /// Fixed per suggestion type, 1..=10. Higher surfaces first.
    pub priority: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_complete: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuggestionGroup {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
    pub suggestions: Vec<Suggestion>,
}

/// Ambient signals the engine branches on. `now` is injected so the
/// same request always yields the same groups in tests.
#[derive(Debug, Clone)]
pub struct SuggestContext {
    pub now: NaiveDateTime,
    /// Raw text of the caller's previous unfinished draft, if any.
    pub last_draft: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Priorities — contextual completions outrank passive alternatives.
// ────────────────────────────────────────────────────────────────────────────

const PRIORITY_HISTORY: u8 = 10;
const PRIORITY_MISSING_ROLE: u8 = 9;
const PRIORITY_MISSING_CITY: u8 = 8;
const PRIORITY_MISSING_DATE: u8 = 8;
const PRIORITY_MISSING_HOURS: u8 = 7;
const PRIORITY_CONTEXTUAL: u8 = 7;
const PRIORITY_MISSING_RATE: u8 = 6;
const PRIORITY_TEMPLATE: u8 = 6;
const PRIORITY_MISSING_SKILLS: u8 = 5;
const PRIORITY_MISSING_CONTRACT: u8 = 4;
const PRIORITY_COMPLETE_EXAMPLE: u8 = 4;
const PRIORITY_SIMILAR_JOB: u8 = 2;

const SHORT_INPUT_LEN: usize = 10;
const MAX_FIELD_CANDIDATES: usize = 3;

const POPULAR_CITIES: &[&str] = &["Paris", "Lyon", "Lille", "Marseille", "Bordeaux"];

/// Default working windows per category, most requested first.
const HOUR_DEFAULTS: &[(&str, &[&str])] = &[
    ("restauration", &["18h-23h", "11h-15h", "19h-23h"]),
    ("sécurité", &["18h-23h", "20h-23h", "14h-22h"]),
    ("événementiel", &["17h-23h", "14h-22h", "10h-18h"]),
    ("logistique", &["6h-14h", "8h-16h", "14h-22h"]),
    ("bâtiment", &["8h-16h", "7h-15h", "9h-17h"]),
];
const HOUR_FALLBACK: &[&str] = &["9h-17h", "14h-18h", "18h-22h"];

/// Typical hourly amounts per category, in euros.
const RATE_DEFAULTS: &[(&str, &[u32])] = &[
    ("restauration", &[12, 14, 16]),
    ("sécurité", &[14, 16, 18]),
    ("bâtiment", &[15, 18, 22]),
    ("logistique", &[12, 13, 15]),
    ("garde d'enfants", &[11, 12, 14]),
];
const RATE_FALLBACK: &[u32] = &[12, 14, 16];

const TEMPLATES: &[&str] = &[
    "Je cherche un serveur à Paris samedi de 19h à 23h, 14€/h",
    "Besoin d'un agent de sécurité à Lille vendredi soir 18h-23h, 16€/h",
    "Recherche manutentionnaire à Lyon demain matin 6h-14h, 13€/h",
    "Baby-sitter à Bordeaux samedi soir de 19h à 23h, 12€/h",
];

static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,3})\s*(?:€|euros?)").unwrap());

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Builds the suggestion groups for the current input. Never fails:
/// an unrecognizable text simply yields the generic groups.
pub fn generate(
    text: &str,
    context: &SuggestContext,
    lexicon: &Lexicon,
    synonyms: &SynonymTable,
) -> Vec<SuggestionGroup> {
    let trimmed = text.trim();

    let mut groups = if trimmed.is_empty() {
        empty_input_groups(context)
    } else if trimmed.chars().count() < SHORT_INPUT_LEN {
        completion_groups(trimmed, lexicon, synonyms)
    } else {
        checklist_groups(trimmed, context, lexicon, synonyms)
    };

    for group in &mut groups {
        group
            .suggestions
            .sort_by(|a, b| b.priority.cmp(&a.priority));
    }
    groups.retain(|g| !g.suggestions.is_empty());
    groups.sort_by(|a, b| {
        let pa = a.suggestions.first().map(|s| s.priority).unwrap_or(0);
        let pb = b.suggestions.first().map(|s| s.priority).unwrap_or(0);
        pb.cmp(&pa)
    });

    debug!(input_len = trimmed.len(), groups = groups.len(), "built suggestions");
    groups
}

// ────────────────────────────────────────────────────────────────────────────
// Branch 1: empty input
// ────────────────────────────────────────────────────────────────────────────

fn empty_input_groups(context: &SuggestContext) -> Vec<SuggestionGroup> {
    let mut groups = Vec::new();

    if let Some(draft) = context.last_draft.as_deref().filter(|d| !d.trim().is_empty()) {
        groups.push(SuggestionGroup {
            title: "Reprendre où vous en étiez".to_string(),
            icon: Some("↩"),
            suggestions: vec![Suggestion {
                text: draft.to_string(),
                category: SuggestionCategory::History,
                priority: PRIORITY_HISTORY,
                description: Some("Votre dernière demande non terminée".to_string()),
                is_complete: false,
            }],
        });
    }

    groups.push(SuggestionGroup {
        title: "En ce moment".to_string(),
        icon: Some("⏰"),
        suggestions: contextual_now(context.now),
    });

    groups.push(SuggestionGroup {
        title: "Exemples prêts à l'emploi".to_string(),
        icon: Some("✨"),
        suggestions: TEMPLATES
            .iter()
            .map(|t| Suggestion {
                text: t.to_string(),
                category: SuggestionCategory::Complete,
                priority: PRIORITY_TEMPLATE,
                description: None,
                is_complete: true,
            })
            .collect(),
    });

    groups
}

/// One or two starters driven by time of day and day of week.
fn contextual_now(now: NaiveDateTime) -> Vec<Suggestion> {
    let mut out = Vec::new();
    let hour = now.hour();
    let weekday = now.weekday();

    let starter = if (17..=23).contains(&hour) {
        "Un serveur pour le service de ce soir"
    } else if (6..11).contains(&hour) {
        "Un commis pour le service du midi"
    } else {
        "Un extra pour cet après-midi"
    };
    out.push(Suggestion {
        text: starter.to_string(),
        category: SuggestionCategory::Trending,
        priority: PRIORITY_CONTEXTUAL,
        description: None,
        is_complete: false,
    });

    if matches!(weekday, Weekday::Thu | Weekday::Fri | Weekday::Sat) {
        out.push(Suggestion {
            text: "Des extras pour ce week-end".to_string(),
            category: SuggestionCategory::Trending,
            priority: PRIORITY_CONTEXTUAL,
            description: None,
            is_complete: false,
        });
    }

    out
}

// ────────────────────────────────────────────────────────────────────────────
// Branch 2: short prefix — job-name completions only
// ────────────────────────────────────────────────────────────────────────────

fn completion_groups(
    prefix: &str,
    lexicon: &Lexicon,
    synonyms: &SynonymTable,
) -> Vec<SuggestionGroup> {
    let needle = normalize(prefix);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut suggestions = Vec::new();
    for entry in lexicon.entries() {
        let mut hit = entry.id.starts_with(&needle)
            || normalize(entry.canonical_name).starts_with(&needle);
        if !hit {
            if let Some(syn) = synonyms.get(entry.id) {
                hit = syn.synonyms.iter().any(|s| normalize(s).starts_with(&needle));
            }
        }
        if hit {
            suggestions.push(Suggestion {
                text: entry.canonical_name.to_string(),
                category: SuggestionCategory::Role,
                priority: PRIORITY_MISSING_ROLE,
                description: Some(entry.category.to_string()),
                is_complete: false,
            });
        }
    }
    suggestions.truncate(5);

    vec![SuggestionGroup {
        title: "Métiers correspondants".to_string(),
        icon: Some("💼"),
        suggestions,
    }]
}

// ────────────────────────────────────────────────────────────────────────────
// Branch 3: longer text — missing-field checklist
// ────────────────────────────────────────────────────────────────────────────

fn checklist_groups(
    text: &str,
    context: &SuggestContext,
    lexicon: &Lexicon,
    synonyms: &SynonymTable,
) -> Vec<SuggestionGroup> {
    let today = context.now.date();
    let result = interpret(text, today, lexicon, synonyms);
    let fields = &result.fields;
    let entry = result
        .detection
        .as_ref()
        .and_then(|d| lexicon.find(&d.primary.job_key));

    let mut missing = Vec::new();

    if fields.role.is_none() {
        missing.push(role_suggestions(text, lexicon, synonyms));
    }
    if fields.city.is_none() {
        missing.push(city_suggestions());
    }
    if fields.date.is_none() {
        missing.push(date_suggestions(today));
    }
    if fields.time_range.is_none() {
        missing.push(hour_suggestions(entry));
    }
    if fields.hourly_rate.is_none() {
        missing.push(rate_suggestions(text, entry));
    }
    if fields.contract_type.is_none() && fields.mission_type.is_none() {
        missing.push(contract_suggestions());
    }
    if let Some(e) = entry {
        let unmentioned: Vec<&str> = e
            .skills
            .iter()
            .copied()
            .filter(|s| {
                !fields
                    .skills
                    .iter()
                    .any(|have| have.eq_ignore_ascii_case(s))
            })
            .collect();
        if !e.skills.is_empty() && !unmentioned.is_empty() {
            missing.push(skill_suggestions(&unmentioned));
        }
    }

    let mut groups: Vec<SuggestionGroup> = missing.into_iter().collect();

    if let Some(e) = entry {
        groups.push(complete_example_group(e, today));
        if let Some(similar) = similar_job_group(&result, lexicon) {
            groups.push(similar);
        }
    }

    groups
}

fn role_suggestions(
    text: &str,
    lexicon: &Lexicon,
    synonyms: &SynonymTable,
) -> SuggestionGroup {
    // Even below the acceptance threshold the detector's ranking is a
    // reasonable ordering hint; fall back to the most requested jobs.
    let candidates: Vec<String> = match detect_with_confidence(text, lexicon, synonyms) {
        Some(d) => std::iter::once(d.primary.canonical_name)
            .chain(d.secondary.into_iter().map(|m| m.canonical_name))
            .take(MAX_FIELD_CANDIDATES)
            .collect(),
        None => ["Serveur/Serveuse", "Agent de sécurité", "Manutentionnaire"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    SuggestionGroup {
        title: "Quel métier recherchez-vous ?".to_string(),
        icon: Some("💼"),
        suggestions: candidates
            .into_iter()
            .map(|name| Suggestion {
                text: name,
                category: SuggestionCategory::Role,
                priority: PRIORITY_MISSING_ROLE,
                description: None,
                is_complete: false,
            })
            .collect(),
    }
}

fn city_suggestions() -> SuggestionGroup {
    SuggestionGroup {
        title: "Dans quelle ville ?".to_string(),
        icon: Some("📍"),
        suggestions: POPULAR_CITIES
            .iter()
            .take(MAX_FIELD_CANDIDATES)
            .map(|city| Suggestion {
                text: format!("à {city}"),
                category: SuggestionCategory::City,
                priority: PRIORITY_MISSING_CITY,
                description: None,
                is_complete: false,
            })
            .collect(),
    }
}

/// The next two calendar offers: tomorrow and the coming Saturday.
fn date_suggestions(today: NaiveDate) -> SuggestionGroup {
    let tomorrow = today.succ_opt().unwrap_or(today);
    let mut saturday = tomorrow;
    while saturday.weekday() != Weekday::Sat || saturday == tomorrow {
        saturday = match saturday.succ_opt() {
            Some(d) => d,
            None => break,
        };
    }

    let suggestions = [("demain", tomorrow), ("samedi", saturday)]
        .into_iter()
        .map(|(label, date)| Suggestion {
            text: label.to_string(),
            category: SuggestionCategory::Date,
            priority: PRIORITY_MISSING_DATE,
            description: Some(format_date_fr(date)),
            is_complete: false,
        })
        .collect();

    SuggestionGroup {
        title: "Pour quelle date ?".to_string(),
        icon: Some("📅"),
        suggestions,
    }
}

fn hour_suggestions(entry: Option<&JobLexiconEntry>) -> SuggestionGroup {
    let windows = entry
        .and_then(|e| {
            HOUR_DEFAULTS
                .iter()
                .find(|(cat, _)| *cat == e.category)
                .map(|(_, w)| *w)
        })
        .unwrap_or(HOUR_FALLBACK);

    SuggestionGroup {
        title: "Sur quel créneau ?".to_string(),
        icon: Some("🕐"),
        suggestions: windows
            .iter()
            .take(MAX_FIELD_CANDIDATES)
            .map(|w| Suggestion {
                text: w.to_string(),
                category: SuggestionCategory::Hours,
                priority: PRIORITY_MISSING_HOURS,
                description: None,
                is_complete: false,
            })
            .collect(),
    }
}

/// Candidate rates, excluding any amount the text already states
/// inside the plausibility band.
fn rate_suggestions(text: &str, entry: Option<&JobLexiconEntry>) -> SuggestionGroup {
    let present: Vec<u32> = AMOUNT_RE
        .captures_iter(&text.to_lowercase())
        .filter_map(|c| c.get(1)?.as_str().parse().ok())
        .filter(|v| (RATE_MIN..=RATE_MAX).contains(v))
        .collect();

    let defaults = entry
        .and_then(|e| {
            RATE_DEFAULTS
                .iter()
                .find(|(cat, _)| *cat == e.category)
                .map(|(_, r)| *r)
        })
        .unwrap_or(RATE_FALLBACK);

    SuggestionGroup {
        title: "À quel tarif ?".to_string(),
        icon: Some("💶"),
        suggestions: defaults
            .iter()
            .filter(|v| !present.contains(v))
            .take(MAX_FIELD_CANDIDATES)
            .map(|v| Suggestion {
                text: format!("{v}€/h"),
                category: SuggestionCategory::Rate,
                priority: PRIORITY_MISSING_RATE,
                description: None,
                is_complete: false,
            })
            .collect(),
    }
}

fn contract_suggestions() -> SuggestionGroup {
    SuggestionGroup {
        title: "Quel type de contrat ?".to_string(),
        icon: Some("📄"),
        suggestions: ["en extra", "en CDD", "en intérim"]
            .iter()
            .map(|c| Suggestion {
                text: c.to_string(),
                category: SuggestionCategory::Contract,
                priority: PRIORITY_MISSING_CONTRACT,
                description: None,
                is_complete: false,
            })
            .collect(),
    }
}

fn skill_suggestions(unmentioned: &[&str]) -> SuggestionGroup {
    SuggestionGroup {
        title: "Compétences attendues".to_string(),
        icon: Some("🛠"),
        suggestions: unmentioned
            .iter()
            .take(MAX_FIELD_CANDIDATES)
            .map(|s| Suggestion {
                text: s.to_string(),
                category: SuggestionCategory::Skills,
                priority: PRIORITY_MISSING_SKILLS,
                description: None,
                is_complete: false,
            })
            .collect(),
    }
}

fn complete_example_group(entry: &JobLexiconEntry, today: NaiveDate) -> SuggestionGroup {
    let saturday = next_saturday(today);
    let rate = RATE_DEFAULTS
        .iter()
        .find(|(cat, _)| *cat == entry.category)
        .and_then(|(_, r)| r.get(1).copied())
        .unwrap_or(14);

    SuggestionGroup {
        title: "Exemple complet".to_string(),
        icon: Some("✨"),
        suggestions: vec![Suggestion {
            text: format!(
                "{} à Paris {} de 18h à 23h, {rate}€/h",
                entry.canonical_name,
                format_date_fr(saturday),
            ),
            category: SuggestionCategory::Complete,
            priority: PRIORITY_COMPLETE_EXAMPLE,
            description: None,
            is_complete: true,
        }],
    }
}

fn similar_job_group(
    result: &crate::interpret::Interpretation,
    lexicon: &Lexicon,
) -> Option<SuggestionGroup> {
    let detection = result.detection.as_ref()?;
    if detection.secondary.is_empty() {
        return None;
    }

    let suggestions = detection
        .secondary
        .iter()
        .filter_map(|m| lexicon.find(&m.job_key))
        .map(|e| Suggestion {
            text: e.canonical_name.to_string(),
            category: SuggestionCategory::Role,
            priority: PRIORITY_SIMILAR_JOB,
            description: Some(e.category.to_string()),
            is_complete: false,
        })
        .collect::<Vec<_>>();
    if suggestions.is_empty() {
        return None;
    }

    Some(SuggestionGroup {
        title: "Métiers proches".to_string(),
        icon: Some("🔄"),
        suggestions,
    })
}

fn next_saturday(today: NaiveDate) -> NaiveDate {
    let mut date = today;
    loop {
        date = match date.succ_opt() {
            Some(d) => d,
            None => return today,
        };
        if date.weekday() == Weekday::Sat {
            return date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Lexicon, SynonymTable) {
        (Lexicon::load().unwrap(), SynonymTable::build())
    }

    fn ctx(hour: u32) -> SuggestContext {
        SuggestContext {
            // Monday 2026-03-02.
            now: NaiveDate::from_ymd_opt(2026, 3, 2)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            last_draft: None,
        }
    }

    #[test]
    fn test_empty_input_always_has_templates() {
        let (lexicon, synonyms) = setup();
        let groups = generate("", &ctx(10), &lexicon, &synonyms);
        assert!(
            groups
                .iter()
                .any(|g| g.suggestions.iter().any(|s| s.is_complete)),
            "ready-made templates must be present on empty input"
        );
    }

    #[test]
    fn test_empty_input_with_history_puts_resume_first() {
        let (lexicon, synonyms) = setup();
        let context = SuggestContext {
            last_draft: Some("Serveur à Lille".to_string()),
            ..ctx(10)
        };
        let groups = generate("", &context, &lexicon, &synonyms);
        assert_eq!(
            groups[0].suggestions[0].category,
            SuggestionCategory::History,
            "resume-last-session outranks everything else"
        );
    }

    #[test]
    fn test_evening_context_suggests_evening_service() {
        let suggestions = contextual_now(ctx(19).now);
        assert!(suggestions[0].text.contains("ce soir"));
    }

    #[test]
    fn test_short_prefix_completes_job_names() {
        let (lexicon, synonyms) = setup();
        let groups = generate("serv", &ctx(10), &lexicon, &synonyms);
        assert_eq!(groups.len(), 1);
        assert!(groups[0]
            .suggestions
            .iter()
            .any(|s| s.text == "Serveur/Serveuse"));
    }

    #[test]
    fn test_short_prefix_matches_synonyms_too() {
        let (lexicon, synonyms) = setup();
        let groups = generate("vigil", &ctx(10), &lexicon, &synonyms);
        assert!(groups[0]
            .suggestions
            .iter()
            .any(|s| s.text == "Agent de sécurité"));
    }

    #[test]
    fn test_checklist_flags_only_missing_fields() {
        let (lexicon, synonyms) = setup();
        let groups = generate(
            "Je cherche un serveur à Lille samedi",
            &ctx(10),
            &lexicon,
            &synonyms,
        );
        let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
        assert!(!titles.contains(&"Quel métier recherchez-vous ?"));
        assert!(!titles.contains(&"Dans quelle ville ?"));
        assert!(titles.contains(&"Sur quel créneau ?"));
        assert!(titles.contains(&"À quel tarif ?"));
    }

    #[test]
    fn test_rate_suggestions_skip_present_amount() {
        let entry = Lexicon::load().unwrap();
        let serveur = entry.find("serveur").unwrap();
        let group = rate_suggestions("serveur payé 14€ la soirée environ", Some(serveur));
        assert!(
            group.suggestions.iter().all(|s| s.text != "14€/h"),
            "an amount already in the text must not be restated"
        );
    }

    #[test]
    fn test_hour_defaults_follow_category() {
        let lexicon = Lexicon::load().unwrap();
        let cariste = lexicon.find("cariste").unwrap();
        let group = hour_suggestions(Some(cariste));
        assert_eq!(group.suggestions[0].text, "6h-14h");
    }

    #[test]
    fn test_groups_sorted_by_descending_priority() {
        let (lexicon, synonyms) = setup();
        let groups = generate(
            "besoin d'un serveur pour samedi soir",
            &ctx(10),
            &lexicon,
            &synonyms,
        );
        let tops: Vec<u8> = groups
            .iter()
            .map(|g| g.suggestions.first().map(|s| s.priority).unwrap_or(0))
            .collect();
        let mut sorted = tops.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(tops, sorted);
        for group in &groups {
            let p: Vec<u8> = group.suggestions.iter().map(|s| s.priority).collect();
            let mut ps = p.clone();
            ps.sort_by(|a, b| b.cmp(a));
            assert_eq!(p, ps, "suggestions inside '{}' unsorted", group.title);
        }
    }

    #[test]
    fn test_date_suggestions_offer_tomorrow_then_saturday() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let group = date_suggestions(today);
        assert_eq!(
            group.suggestions[0].description.as_deref(),
            Some("mardi 3 mars 2026")
        );
        assert_eq!(
            group.suggestions[1].description.as_deref(),
            Some("samedi 7 mars 2026")
        );
    }
}
