//! City extraction — arrondissement patterns, postal-code prefixes, then
//! a plain gazetteer scan. First successful branch wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::{contains_phrase, normalize};

/// Cities whose postal codes encode an arrondissement in the last digits.
const ARRONDISSEMENT_CITIES: &[(&str, &str, u32)] = &[
    // (normalized name, display name, arrondissement count)
    ("paris", "Paris", 20),
    ("lyon", "Lyon", 9),
    ("marseille", "Marseille", 16),
];

/// Fixed gazetteer. Matching is diacritic- and hyphen-tolerant.
const GAZETTEER: &[&str] = &[
    "Paris",
    "Marseille",
    "Lyon",
    "Toulouse",
    "Nice",
    "Nantes",
    "Montpellier",
    "Strasbourg",
    "Bordeaux",
    "Lille",
    "Rennes",
    "Reims",
    "Toulon",
    "Saint-Étienne",
    "Le Havre",
    "Grenoble",
    "Dijon",
    "Angers",
    "Nîmes",
    "Villeurbanne",
    "Clermont-Ferrand",
    "Aix-en-Provence",
    "Brest",
    "Tours",
    "Amiens",
    "Limoges",
    "Annecy",
    "Perpignan",
    "Boulogne-Billancourt",
    "Metz",
    "Besançon",
    "Orléans",
    "Rouen",
    "Mulhouse",
    "Caen",
    "Nancy",
    "Roubaix",
    "Tourcoing",
    "Avignon",
    "Versailles",
    "Cannes",
    "La Rochelle",
    "Pau",
    "Antibes",
];

/// Two-digit postal prefix → city, for departments whose main city is
/// the overwhelmingly likely referent of a short-mission posting.
const POSTAL_PREFIXES: &[(&str, &str)] = &[
    ("06", "Nice"),
    ("21", "Dijon"),
    ("25", "Besançon"),
    ("29", "Brest"),
    ("30", "Nîmes"),
    ("31", "Toulouse"),
    ("33", "Bordeaux"),
    ("34", "Montpellier"),
    ("35", "Rennes"),
    ("37", "Tours"),
    ("38", "Grenoble"),
    ("42", "Saint-Étienne"),
    ("44", "Nantes"),
    ("45", "Orléans"),
    ("49", "Angers"),
    ("51", "Reims"),
    ("54", "Nancy"),
    ("57", "Metz"),
    ("59", "Lille"),
    ("63", "Clermont-Ferrand"),
    ("64", "Pau"),
    ("66", "Perpignan"),
    ("67", "Strasbourg"),
    ("68", "Mulhouse"),
    ("76", "Rouen"),
    ("80", "Amiens"),
    ("83", "Toulon"),
    ("84", "Avignon"),
    ("87", "Limoges"),
];

static ARRONDISSEMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(paris|lyon|marseille)\s+(\d{1,2})\s*(e|er|eme)?\b").unwrap());

static POSTAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{5})\b").unwrap());

/// Extracts a city from free text. Priority: explicit arrondissement,
/// then postal code, then gazetteer. Returns `None` on no match.
pub fn detect_city(text: &str) -> Option<String> {
    // Arrondissement matching keeps punctuation so a trailing "€" or
    // "h" can disqualify a rate mistaken for an arrondissement number.
    let lowered = crate::text::strip_diacritics(&text.to_lowercase());
    if let Some(city) = match_arrondissement(&lowered) {
        return Some(city);
    }

    let normalized = normalize(text);
    if let Some(city) = match_postal_code(&normalized) {
        return Some(city);
    }
    match_gazetteer(&normalized)
}

/// Branch (a): `"<major-city> <n>[e|er|ème]"` → `"<City> <n>e"`.
fn match_arrondissement(lowered: &str) -> Option<String> {
    for caps in ARRONDISSEMENT_RE.captures_iter(lowered) {
        let name = caps.get(1)?.as_str();
        let n: u32 = caps.get(2)?.as_str().parse().ok()?;
        let has_suffix = caps.get(3).is_some();

        // A bare number followed by a rate or hour marker is not an
        // arrondissement ("paris 15€/h", "paris 19h").
        if !has_suffix {
            let rest = &lowered[caps.get(0)?.end()..];
            if matches!(rest.chars().next(), Some('€') | Some('h') | Some('/')) {
                continue;
            }
        }

        let (_, display, max) = ARRONDISSEMENT_CITIES
            .iter()
            .find(|(norm, _, _)| *norm == name)?;
        if n >= 1 && n <= *max {
            return Some(format!("{display} {n}e"));
        }
    }
    None
}

/// Branch (b): five-digit postal code. Paris/Lyon/Marseille codes carry
/// the arrondissement in their last digits; other prefixes map straight
/// to the department's main city.
fn match_postal_code(normalized: &str) -> Option<String> {
    for caps in POSTAL_RE.captures_iter(normalized) {
        let code = caps.get(1).map(|m| m.as_str())?;
        let suffix: u32 = code[2..].parse().ok()?;
        match &code[..2] {
            "75" if (1..=20).contains(&suffix) => return Some(format!("Paris {suffix}e")),
            "69" if (1..=9).contains(&suffix) => return Some(format!("Lyon {suffix}e")),
            "13" if (1..=16).contains(&suffix) => return Some(format!("Marseille {suffix}e")),
            prefix => {
                if let Some((_, city)) = POSTAL_PREFIXES.iter().find(|(p, _)| *p == prefix) {
                    return Some((*city).to_string());
                }
            }
        }
    }
    None
}

/// Branch (c): whole-word gazetteer scan on the normalized text.
fn match_gazetteer(normalized: &str) -> Option<String> {
    GAZETTEER
        .iter()
        .find(|city| contains_phrase(normalized, &normalize(city)))
        .map(|city| (*city).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_gazetteer_city_is_detected() {
        for city in GAZETTEER {
            let text = format!("Mission de vente à {city} ce week-end");
            assert_eq!(
                detect_city(&text).as_deref(),
                Some(*city),
                "gazetteer city {city} not detected"
            );
        }
    }

    #[test]
    fn test_case_and_diacritic_insensitive() {
        assert_eq!(detect_city("extra a SAINT-ETIENNE").as_deref(), Some("Saint-Étienne"));
        assert_eq!(detect_city("mission a nimes").as_deref(), Some("Nîmes"));
    }

    #[test]
    fn test_hyphen_space_tolerant() {
        assert_eq!(
            detect_city("vendeur à Aix en Provence").as_deref(),
            Some("Aix-en-Provence")
        );
    }

    #[test]
    fn test_arrondissement_pattern_wins_over_gazetteer() {
        assert_eq!(detect_city("Serveur Paris 11e").as_deref(), Some("Paris 11e"));
        assert_eq!(detect_city("serveur paris 11ème").as_deref(), Some("Paris 11e"));
        assert_eq!(detect_city("barman lyon 2").as_deref(), Some("Lyon 2e"));
    }

    #[test]
    fn test_arrondissement_out_of_range_falls_back() {
        // Lyon has 9 arrondissements; "lyon 12" is not one.
        assert_eq!(detect_city("déménagement lyon 12").as_deref(), Some("Lyon"));
    }

    #[test]
    fn test_postal_code_plain_prefix() {
        assert_eq!(detect_city("agent de sécurité 59000").as_deref(), Some("Lille"));
        assert_eq!(detect_city("vendeuse 33000 centre").as_deref(), Some("Bordeaux"));
    }

    #[test]
    fn test_postal_code_arrondissement_math() {
        assert_eq!(detect_city("serveur 75011").as_deref(), Some("Paris 11e"));
        assert_eq!(detect_city("extra 69003").as_deref(), Some("Lyon 3e"));
        assert_eq!(detect_city("manutention 13008").as_deref(), Some("Marseille 8e"));
    }

    #[test]
    fn test_word_boundary_prevents_partial_match() {
        // "Tours" must not fire inside "Tourcoing".
        assert_eq!(detect_city("mission à Tourcoing").as_deref(), Some("Tourcoing"));
    }

    #[test]
    fn test_no_city_returns_none() {
        assert_eq!(detect_city("je cherche un serveur pour samedi"), None);
    }
}
