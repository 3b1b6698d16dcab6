//! Contact-block extraction — email, French phone numbers, contact name
//! and employer name.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::city::detect_city;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

/// French mobile/landline shapes, with or without the +33 prefix.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+33\s?|0)[1-9](?:[ .\-]?\d{2}){4}\b").unwrap());

// The leading keyword is case-tolerant but the captured name must start
// with a capital — "(?i)" would defeat that requirement.
static CONTACT_NAME_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"[Cc]ontact\s*:\s*([A-ZÀ-Ü][\p{L}'-]+(?:\s+[A-ZÀ-Ü][\p{L}'-]+)?)",
        r"(?:M\.|Mme|Monsieur|Madame)\s+([A-ZÀ-Ü][\p{L}'-]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static COMPANY_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b[Cc]hez\s+([A-ZÀ-Ü][\p{L}0-9&'’\- ]{1,30})",
        r"\b[Pp]our\s+(?:le |la |l')?(?:[Rr]estaurant|[Bb]ar|[Hh]ôtel|[Hh]otel|[Mm]agasin|[Ss]ociété|[Ss]ociete|[EÉ]tablissement|[Ee]tablissement)\s+([A-ZÀ-Ü][\p{L}0-9&'’\- ]{1,30})",
        r"\b[EÉ]tablissement\s+([A-ZÀ-Ü][\p{L}0-9&'’\- ]{1,30})",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Candidates that look like times, dates or amounts are not companies.
static COMPANY_REJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d|\d{1,2}h|€|\d{1,2}/\d{1,2}").unwrap());

pub fn detect_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn detect_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn detect_contact_name(text: &str) -> Option<String> {
    CONTACT_NAME_RES
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Ordered "chez/pour/établissement X" patterns with a validator that
/// rejects candidates looking like times, dates or known city names.
pub fn detect_company_name(text: &str) -> Option<String> {
    for re in COMPANY_RES.iter() {
        for caps in re.captures_iter(text) {
            if let Some(m) = caps.get(1) {
                let candidate = trim_company(m.as_str());
                if is_plausible_company(&candidate) {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

/// Cuts the capture at the first clause-ending word so "chez Marco pour
/// samedi" keeps only "Marco".
fn trim_company(raw: &str) -> String {
    const CLAUSE_BREAKERS: &[&str] = &[
        "pour", "le", "la", "les", "ce", "cette", "samedi", "dimanche", "lundi", "mardi",
        "mercredi", "jeudi", "vendredi", "de", "à", "a", "au",
    ];
    let mut kept: Vec<&str> = Vec::new();
    for word in raw.split_whitespace() {
        if !kept.is_empty() && CLAUSE_BREAKERS.contains(&word.to_lowercase().as_str()) {
            break;
        }
        kept.push(word);
    }
    kept.join(" ").trim_end_matches([',', '.']).to_string()
}

fn is_plausible_company(candidate: &str) -> bool {
    if candidate.len() < 2 || candidate.len() > 40 {
        return false;
    }
    if COMPANY_REJECT_RE.is_match(&candidate.to_lowercase()) {
        return false;
    }
    // A bare city name after "chez"/"pour" is a location, not an employer.
    if detect_city(candidate)
        .is_some_and(|city| city.to_lowercase() == candidate.to_lowercase())
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_standard_shape() {
        assert_eq!(
            detect_email("écrire à patron@bistrot-marcel.fr svp").as_deref(),
            Some("patron@bistrot-marcel.fr")
        );
        assert_eq!(detect_email("pas d'adresse ici"), None);
    }

    #[test]
    fn test_phone_shapes() {
        assert_eq!(
            detect_phone("appelez le 06 12 34 56 78").as_deref(),
            Some("06 12 34 56 78")
        );
        assert_eq!(
            detect_phone("tel: 0612345678").as_deref(),
            Some("0612345678")
        );
        assert_eq!(
            detect_phone("+33 6 12 34 56 78").map(|p| p.replace(' ', "")),
            Some("+33612345678".to_string())
        );
        assert_eq!(detect_phone("numéro 123"), None);
    }

    #[test]
    fn test_contact_name_prefixes() {
        assert_eq!(
            detect_contact_name("Contact : Marie Dupont").as_deref(),
            Some("Marie Dupont")
        );
        assert_eq!(
            detect_contact_name("voir Mme Lefèvre sur place").as_deref(),
            Some("Lefèvre")
        );
        assert_eq!(detect_contact_name("aucun nom"), None);
    }

    #[test]
    fn test_company_chez_pattern() {
        assert_eq!(
            detect_company_name("serveur chez Marcel samedi soir").as_deref(),
            Some("Marcel")
        );
    }

    #[test]
    fn test_company_etablissement_pattern() {
        assert_eq!(
            detect_company_name("pour le restaurant Chez Paulette").as_deref(),
            Some("Chez Paulette")
        );
    }

    #[test]
    fn test_company_rejects_city_names() {
        assert_eq!(detect_company_name("manutention chez Lille"), None);
    }

    #[test]
    fn test_company_rejects_time_like_candidates() {
        assert_eq!(detect_company_name("rdv chez 19h"), None);
    }
}
