//! Intent classification — is the writer hiring, or offering themselves?
//!
//! Downstream contract: callers must not auto-generate an announcement
//! on `PersonalSearch`, and must ask for confirmation on `Ambiguous`.

use serde::{Deserialize, Serialize};

use crate::text::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// The writer needs a worker — proceed.
    NeedExternal,
    /// The writer is a worker describing themselves — block auto-flow.
    PersonalSearch,
    /// Unclear — require explicit confirmation.
    Ambiguous,
}

/// Phrases signalling "I need someone".
const NEED_MARKERS: &[&str] = &[
    "je cherche un",
    "je cherche une",
    "je recherche un",
    "je recherche une",
    "nous recherchons",
    "on recherche",
    "on cherche un",
    "on cherche une",
    "besoin d un",
    "besoin d une",
    "besoin de quelqu un",
    "il me faut",
    "recrute",
    "recrutons",
];

/// Self-referential phrases signalling "I am the worker".
const SELF_MARKERS: &[&str] = &[
    "je suis",
    "disponible",
    "etudiant",
    "etudiante",
    "je propose mes services",
    "cherche un emploi",
    "cherche du travail",
    "mon cv",
    "motivee",
    "motive",
    "serieuse et",
    "serieux et",
];

/// Classifies the writer's intent from keyword presence alone.
pub fn classify(text: &str) -> Intent {
    let normalized = normalize(text);

    let has_need = NEED_MARKERS.iter().any(|m| normalized.contains(m));
    let has_self = SELF_MARKERS.iter().any(|m| normalized.contains(m));

    match (has_need, has_self) {
        (true, false) => Intent::NeedExternal,
        (false, true) => Intent::PersonalSearch,
        _ => Intent::Ambiguous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hiring_phrasing_is_need_external() {
        assert_eq!(
            classify("Je cherche un serveur à Lille ce samedi soir"),
            Intent::NeedExternal
        );
        assert_eq!(
            classify("Besoin d'un agent de sécurité au plus vite"),
            Intent::NeedExternal
        );
        assert_eq!(classify("Nous recherchons une vendeuse"), Intent::NeedExternal);
    }

    #[test]
    fn test_self_description_is_personal_search() {
        assert_eq!(
            classify("Étudiante disponible week-end pour extras en restauration à Paris"),
            Intent::PersonalSearch
        );
        assert_eq!(
            classify("Je suis serveur avec 3 ans d'expérience"),
            Intent::PersonalSearch
        );
    }

    #[test]
    fn test_mixed_markers_are_ambiguous() {
        // Hiring phrasing plus self-description in one message.
        assert_eq!(
            classify("Je cherche un extra, je suis gérant disponible au 06"),
            Intent::Ambiguous
        );
    }

    #[test]
    fn test_bare_job_noun_is_ambiguous() {
        assert_eq!(classify("serveur samedi soir Lille"), Intent::Ambiguous);
        assert_eq!(classify(""), Intent::Ambiguous);
    }
}
