//! Contract, mission-type, experience, urgency, language and
//! availability markers — keyword scans over the normalized text.

use crate::models::Urgency;
use crate::text::{contains_phrase, normalize};

const CONTRACT_MARKERS: &[(&str, &str)] = &[
    ("cdi", "CDI"),
    ("cdd", "CDD"),
    ("interim", "Intérim"),
    ("extra", "Extra"),
    ("saisonnier", "Saisonnier"),
    ("freelance", "Freelance"),
    ("auto entrepreneur", "Freelance"),
    ("temps plein", "Temps plein"),
    ("temps partiel", "Temps partiel"),
];

const MISSION_MARKERS: &[(&str, &str)] = &[
    ("mission ponctuelle", "Mission ponctuelle"),
    ("mission recurrente", "Mission récurrente"),
    ("remplacement", "Remplacement"),
    ("renfort", "Renfort"),
    ("saison", "Saison"),
];

const EXPERIENCE_MARKERS: &[(&str, &str)] = &[
    ("debutant accepte", "débutant"),
    ("sans experience", "débutant"),
    ("premiere experience", "débutant"),
    ("experimente", "expérimenté"),
    ("confirme", "expérimenté"),
    ("expert", "expert"),
];

const LANGUAGES: &[(&str, &str)] = &[
    ("anglais", "Anglais"),
    ("espagnol", "Espagnol"),
    ("allemand", "Allemand"),
    ("italien", "Italien"),
    ("portugais", "Portugais"),
    ("arabe", "Arabe"),
    ("chinois", "Chinois"),
];

const AVAILABILITY_MARKERS: &[(&str, &str)] = &[
    ("week end", "week-end"),
    ("en soiree", "soirée"),
    ("le soir", "soirée"),
    ("en journee", "journée"),
    ("vacances scolaires", "vacances scolaires"),
];

fn scan(normalized: &str, table: &[(&str, &str)]) -> Option<String> {
    table
        .iter()
        .find(|(marker, _)| contains_phrase(normalized, marker))
        .map(|(_, label)| (*label).to_string())
}

pub fn detect_contract_type(text: &str) -> Option<String> {
    scan(&normalize(text), CONTRACT_MARKERS)
}

pub fn detect_mission_type(text: &str) -> Option<String> {
    scan(&normalize(text), MISSION_MARKERS)
}

pub fn detect_experience(text: &str) -> Option<String> {
    scan(&normalize(text), EXPERIENCE_MARKERS)
}

/// "très urgent"-class phrases outrank plain "urgent".
pub fn detect_urgency(text: &str) -> Option<Urgency> {
    let normalized = normalize(text);
    if contains_phrase(&normalized, "tres urgent")
        || contains_phrase(&normalized, "au plus vite")
        || normalized.contains("immediatement")
    {
        return Some(Urgency::TresUrgent);
    }
    if contains_phrase(&normalized, "urgent")
        || contains_phrase(&normalized, "des que possible")
        || contains_phrase(&normalized, "asap")
    {
        return Some(Urgency::Urgent);
    }
    None
}

pub fn detect_languages(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    LANGUAGES
        .iter()
        .filter(|(marker, _)| contains_phrase(&normalized, marker))
        .map(|(_, label)| (*label).to_string())
        .collect()
}

pub fn detect_availability(text: &str) -> Option<String> {
    scan(&normalize(text), AVAILABILITY_MARKERS)
}
