//! Free-text skill extraction — fixed keyword map, labeled sections
//! ("compétences:", "profil:") and bullet-prefixed lines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text::normalize;

const SKILL_MIN_LEN: usize = 3;
const SKILL_MAX_LEN: usize = 50;

/// Substring → canonical skill label. Checked on the normalized text.
const KEYWORD_MAP: &[(&str, &str)] = &[
    ("anglais", "Anglais"),
    ("espagnol", "Espagnol"),
    ("permis b", "Permis B"),
    ("permis", "Permis B"),
    ("caces", "CACES"),
    ("haccp", "Normes HACCP"),
    ("excel", "Excel"),
    ("caisse", "Tenue de caisse"),
    ("cocktail", "Cocktails"),
    ("bafa", "BAFA"),
    ("carte professionnelle", "Carte professionnelle"),
    ("service en salle", "Service en salle"),
    ("port de charges", "Port de charges"),
    ("relation client", "Relation client"),
    ("ponctuel", "Ponctualité"),
];

static SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^.*?(?:compétences|competences|profil)\s*:\s*(.+)$").unwrap());

static BULLET_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*[-*•]\s*(.+)$").unwrap());

/// Tokens that are really dates, amounts or times in disguise.
static NOT_A_SKILL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d|€|\d{1,2}h|\d{1,2}/\d{1,2}").unwrap());

/// Extracts a deduplicated skill list from free text. Empty when the
/// text carries no recognizable skill.
pub fn detect_skills(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let mut skills: Vec<String> = Vec::new();

    // (a) fixed keyword map
    for (keyword, label) in KEYWORD_MAP {
        if normalized.contains(keyword) {
            push_skill(&mut skills, label);
        }
    }

    // (b) labeled sections, split on commas / bullets / newlines
    for caps in SECTION_RE.captures_iter(text) {
        if let Some(tail) = caps.get(1) {
            for part in tail.as_str().split(|c| matches!(c, ',' | ';' | '•' | '\n')) {
                push_skill(&mut skills, part);
            }
        }
    }

    // (c) bullet-prefixed lines
    for caps in BULLET_LINE_RE.captures_iter(text) {
        if let Some(line) = caps.get(1) {
            push_skill(&mut skills, line.as_str());
        }
    }

    skills
}

fn push_skill(skills: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim().trim_end_matches('.');
    if trimmed.len() < SKILL_MIN_LEN || trimmed.len() > SKILL_MAX_LEN {
        return;
    }
    if NOT_A_SKILL_RE.is_match(&trimmed.to_lowercase()) {
        return;
    }
    if skills.iter().any(|s| s.eq_ignore_ascii_case(trimmed)) {
        return;
    }
    skills.push(trimmed.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_map_hits() {
        let skills = detect_skills("serveur avec anglais courant et permis b");
        assert!(skills.contains(&"Anglais".to_string()));
        assert!(skills.contains(&"Permis B".to_string()));
    }

    #[test]
    fn test_labeled_section_split_on_commas() {
        let skills = detect_skills("Profil : rigueur, esprit d'équipe, sens du service");
        assert!(skills.contains(&"rigueur".to_string()));
        assert!(skills.contains(&"esprit d'équipe".to_string()));
        assert!(skills.contains(&"sens du service".to_string()));
    }

    #[test]
    fn test_bullet_lines() {
        let text = "Compétences attendues\n- Dynamisme\n* Sourire\n• Autonomie";
        let skills = detect_skills(text);
        assert!(skills.contains(&"Dynamisme".to_string()));
        assert!(skills.contains(&"Sourire".to_string()));
        assert!(skills.contains(&"Autonomie".to_string()));
    }

    #[test]
    fn test_dedup_is_case_insensitive() {
        let skills = detect_skills("Profil : anglais\n- Anglais");
        let count = skills
            .iter()
            .filter(|s| s.eq_ignore_ascii_case("anglais"))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_dates_amounts_and_times_filtered() {
        let skills = detect_skills("Profil : 15€/h, 19h-23h, 07/03, motivation");
        assert_eq!(skills, vec!["motivation".to_string()]);
    }

    #[test]
    fn test_length_bounds() {
        let long = "a".repeat(60);
        let skills = detect_skills(&format!("Profil : ok, {long}"));
        assert!(!skills.iter().any(|s| s.len() > SKILL_MAX_LEN));
        assert!(!skills.contains(&"ok".to_string()), "too short");
    }

    #[test]
    fn test_no_skills_is_empty() {
        assert!(detect_skills("samedi 7 mars").is_empty());
    }
}
