//! Job lexicon — the static catalog every other component resolves against.
//!
//! Loaded once at startup. Malformed catalog data (duplicate ids, empty
//! names, jobs without a category) aborts startup rather than letting a
//! half-formed table degrade detection silently.

pub mod synonyms;

use serde::Serialize;
use thiserror::Error;

use crate::models::ExperienceLevel;

/// One job type in the static catalog.
#[derive(Debug, Clone, Serialize)]
pub struct JobLexiconEntry {
    pub id: &'static str,
    pub canonical_name: &'static str,
    pub category: &'static str,
    pub skills: &'static [&'static str],
    pub experience_level: ExperienceLevel,
    /// Contexts in which this job tends to be requested at short notice.
    pub urgency_tags: &'static [&'static str],
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("duplicate lexicon id '{0}'")]
    DuplicateId(&'static str),
    #[error("lexicon entry '{0}' has an empty required field")]
    EmptyField(&'static str),
}

/// The loaded, validated catalog. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<JobLexiconEntry>,
}

impl Lexicon {
    /// Loads and validates the static catalog. Fails fast on malformed
    /// data — every downstream component depends on this table.
    pub fn load() -> Result<Self, LexiconError> {
        let entries: Vec<JobLexiconEntry> = CATALOG.to_vec();

        let mut seen = std::collections::HashSet::new();
        for entry in &entries {
            if entry.id.is_empty() || entry.canonical_name.is_empty() || entry.category.is_empty()
            {
                return Err(LexiconError::EmptyField(entry.id));
            }
            if !seen.insert(entry.id) {
                return Err(LexiconError::DuplicateId(entry.id));
            }
        }

        Ok(Lexicon { entries })
    }

    pub fn entries(&self) -> &[JobLexiconEntry] {
        &self.entries
    }

    /// Looks up an entry by id or canonical name (case-insensitive).
    pub fn find(&self, key: &str) -> Option<&JobLexiconEntry> {
        self.entries.iter().find(|e| {
            e.id.eq_ignore_ascii_case(key) || e.canonical_name.to_lowercase() == key.to_lowercase()
        })
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a JobLexiconEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static catalog
// ────────────────────────────────────────────────────────────────────────────

const CATALOG: &[JobLexiconEntry] = &[
    JobLexiconEntry {
        id: "serveur",
        canonical_name: "Serveur/Serveuse",
        category: "restauration",
        skills: &["Service en salle", "Prise de commandes", "Encaissement"],
        experience_level: ExperienceLevel::Debutant,
        urgency_tags: &["service du soir", "week-end"],
    },
    JobLexiconEntry {
        id: "cuisinier",
        canonical_name: "Cuisinier/Cuisinière",
        category: "restauration",
        skills: &["Normes HACCP", "Préparation culinaire", "Gestion des stocks"],
        experience_level: ExperienceLevel::Intermediaire,
        urgency_tags: &["service du midi", "service du soir"],
    },
    JobLexiconEntry {
        id: "commis",
        canonical_name: "Commis de cuisine",
        category: "restauration",
        skills: &["Mise en place", "Épluchage", "Normes HACCP"],
        experience_level: ExperienceLevel::Debutant,
        urgency_tags: &["service du midi"],
    },
    JobLexiconEntry {
        id: "barman",
        canonical_name: "Barman/Barmaid",
        category: "restauration",
        skills: &["Cocktails", "Service au comptoir", "Encaissement"],
        experience_level: ExperienceLevel::Intermediaire,
        urgency_tags: &["soirée", "week-end"],
    },
    JobLexiconEntry {
        id: "plongeur",
        canonical_name: "Plongeur/Plongeuse",
        category: "restauration",
        skills: &["Plonge", "Entretien de la cuisine"],
        experience_level: ExperienceLevel::Debutant,
        urgency_tags: &["service du soir"],
    },
    JobLexiconEntry {
        id: "equipier",
        canonical_name: "Équipier polyvalent",
        category: "restauration",
        skills: &["Préparation rapide", "Encaissement", "Travail en équipe"],
        experience_level: ExperienceLevel::Debutant,
        urgency_tags: &["rush du midi"],
    },
    JobLexiconEntry {
        id: "agent-securite",
        canonical_name: "Agent de sécurité",
        category: "sécurité",
        skills: &["Carte professionnelle", "Surveillance", "Gestion de conflits"],
        experience_level: ExperienceLevel::Intermediaire,
        urgency_tags: &["soirée", "événement"],
    },
    JobLexiconEntry {
        id: "manutentionnaire",
        canonical_name: "Manutentionnaire",
        category: "logistique",
        skills: &["Port de charges", "Préparation de commandes"],
        experience_level: ExperienceLevel::Debutant,
        urgency_tags: &["inventaire", "déchargement"],
    },
    JobLexiconEntry {
        id: "cariste",
        canonical_name: "Cariste",
        category: "logistique",
        skills: &["CACES", "Conduite de chariot", "Gestion de stock"],
        experience_level: ExperienceLevel::Intermediaire,
        urgency_tags: &["inventaire"],
    },
    JobLexiconEntry {
        id: "livreur",
        canonical_name: "Livreur/Livreuse",
        category: "transport",
        skills: &["Permis B", "Sens de l'orientation", "Ponctualité"],
        experience_level: ExperienceLevel::Debutant,
        urgency_tags: &["rush du soir"],
    },
    JobLexiconEntry {
        id: "chauffeur",
        canonical_name: "Chauffeur/Chauffeuse",
        category: "transport",
        skills: &["Permis B", "Ponctualité", "Présentation"],
        experience_level: ExperienceLevel::Intermediaire,
        urgency_tags: &["événement"],
    },
    JobLexiconEntry {
        id: "vendeur",
        canonical_name: "Vendeur/Vendeuse",
        category: "vente",
        skills: &["Conseil client", "Encaissement", "Merchandising"],
        experience_level: ExperienceLevel::Debutant,
        urgency_tags: &["soldes", "week-end"],
    },
    JobLexiconEntry {
        id: "caissier",
        canonical_name: "Caissier/Caissière",
        category: "vente",
        skills: &["Tenue de caisse", "Relation client"],
        experience_level: ExperienceLevel::Debutant,
        urgency_tags: &["week-end"],
    },
    JobLexiconEntry {
        id: "hote-accueil",
        canonical_name: "Hôte/Hôtesse d'accueil",
        category: "événementiel",
        skills: &["Accueil du public", "Présentation", "Anglais"],
        experience_level: ExperienceLevel::Debutant,
        urgency_tags: &["salon", "événement"],
    },
    JobLexiconEntry {
        id: "animateur",
        canonical_name: "Animateur/Animatrice",
        category: "événementiel",
        skills: &["BAFA", "Animation de groupe", "Créativité"],
        experience_level: ExperienceLevel::Intermediaire,
        urgency_tags: &["vacances scolaires", "week-end"],
    },
    JobLexiconEntry {
        id: "agent-entretien",
        canonical_name: "Agent d'entretien",
        category: "nettoyage",
        skills: &["Protocoles de nettoyage", "Autonomie"],
        experience_level: ExperienceLevel::Debutant,
        urgency_tags: &["fin de chantier"],
    },
    JobLexiconEntry {
        id: "baby-sitter",
        canonical_name: "Baby-sitter",
        category: "garde d'enfants",
        skills: &["Garde d'enfants", "Aide aux devoirs", "Ponctualité"],
        experience_level: ExperienceLevel::Debutant,
        urgency_tags: &["soirée", "sortie d'école"],
    },
    JobLexiconEntry {
        id: "macon",
        canonical_name: "Maçon",
        category: "bâtiment",
        skills: &["Lecture de plans", "Coffrage", "Maçonnerie traditionnelle"],
        experience_level: ExperienceLevel::Expert,
        urgency_tags: &["chantier"],
    },
    JobLexiconEntry {
        id: "electricien",
        canonical_name: "Électricien",
        category: "bâtiment",
        skills: &["Habilitation électrique", "Câblage", "Mise aux normes"],
        experience_level: ExperienceLevel::Expert,
        urgency_tags: &["dépannage"],
    },
    JobLexiconEntry {
        id: "plombier",
        canonical_name: "Plombier",
        category: "bâtiment",
        skills: &["Dépannage", "Soudure", "Installation sanitaire"],
        experience_level: ExperienceLevel::Expert,
        urgency_tags: &["dépannage", "urgence fuite"],
    },
    JobLexiconEntry {
        id: "peintre",
        canonical_name: "Peintre en bâtiment",
        category: "bâtiment",
        skills: &["Préparation des surfaces", "Finitions"],
        experience_level: ExperienceLevel::Intermediaire,
        urgency_tags: &["fin de chantier"],
    },
    JobLexiconEntry {
        id: "agent-immobilier",
        canonical_name: "Agent immobilier",
        category: "immobilier",
        skills: &["Prospection", "Visites", "Négociation"],
        experience_level: ExperienceLevel::Intermediaire,
        urgency_tags: &["week-end"],
    },
];
