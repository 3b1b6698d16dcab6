//! Synonym graph — colloquial terms and variants mapped to canonical job
//! keys, each key carrying a relative detection weight.
//!
//! Two source tables are merged at build time: a hand-written base table
//! and an extended variant table. A later table may only *extend* the
//! synonym list of a key the base already declares — it never replaces
//! the list or the weight.

use std::collections::HashMap;

/// Synonyms and detection weight for one canonical job key.
#[derive(Debug, Clone)]
pub struct SynonymEntry {
    pub synonyms: Vec<&'static str>,
    /// Multiplies detector confidence. 1.0 is neutral; higher wins ties.
    pub weight: f64,
}

/// The merged, read-only synonym table, keyed by lexicon entry id.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    entries: HashMap<&'static str, SynonymEntry>,
}

type SynonymRow = (&'static str, f64, &'static [&'static str]);

/// Hand-written base table. Weights above 1.0 mark jobs that colloquial
/// speech requests far more often than their token overlap suggests.
const BASE_TABLE: &[SynonymRow] = &[
    ("serveur", 1.3, &["serveuse", "serveur en salle", "chef de rang", "runner"]),
    ("cuisinier", 1.2, &["cuistot", "chef de partie", "second de cuisine"]),
    ("commis", 1.0, &["commis de cuisine", "aide de cuisine", "aide cuisinier"]),
    ("barman", 1.1, &["barmaid", "bartender", "barman cocktails"]),
    ("plongeur", 1.0, &["plongeuse", "plonge restaurant"]),
    ("equipier", 1.0, &["équipier polyvalent", "employé polyvalent", "crew"]),
    ("agent-securite", 1.2, &["agent de sécurité", "vigile", "agent de surveillance", "maître-chien"]),
    ("manutentionnaire", 1.0, &["manutention", "agent de quai", "préparateur de commandes"]),
    ("cariste", 1.0, &["conducteur de chariot", "cariste caces"]),
    ("livreur", 1.1, &["livreuse", "coursier", "livreur à vélo"]),
    ("chauffeur", 1.0, &["chauffeur vtc", "conducteur", "chauffeur livreur"]),
    ("vendeur", 1.1, &["vendeuse", "conseiller de vente", "conseillère de vente"]),
    ("caissier", 1.0, &["caissière", "hôte de caisse", "hôtesse de caisse"]),
    ("hote-accueil", 1.0, &["hôtesse d'accueil", "hôte d'accueil", "agent d'accueil"]),
    ("animateur", 1.0, &["animatrice", "animateur bafa", "animateur d'événement"]),
    ("agent-entretien", 1.0, &["agent d'entretien", "femme de ménage", "homme de ménage", "agent de propreté"]),
    ("baby-sitter", 1.1, &["babysitter", "baby sitter", "garde d'enfants", "nounou"]),
    ("macon", 1.0, &["maçon", "maçonnerie"]),
    ("electricien", 1.0, &["électricien", "électricienne"]),
    ("plombier", 1.0, &["plombier chauffagiste", "dépanneur plomberie"]),
    ("peintre", 1.0, &["peintre en bâtiment", "peintre décorateur"]),
    ("agent-immobilier", 1.0, &["agent immobilier", "négociateur immobilier", "conseiller immobilier"]),
];

/// Extended variant table. Entries here only extend base keys; a key
/// present here but absent from the base is added with neutral weight.
const EXTENDED_TABLE: &[SynonymRow] = &[
    ("serveur", 1.0, &["extra en salle", "extra restauration", "serveur banquet"]),
    ("cuisinier", 1.0, &["extra en cuisine", "cuisinier traiteur"]),
    ("agent-securite", 1.0, &["agent ssiap", "rondier", "sécurité événementielle"]),
    ("manutentionnaire", 1.0, &["déménageur", "porteur"]),
    ("livreur", 1.0, &["livraison de repas", "chauffeur-livreur"]),
    ("vendeur", 1.0, &["vendeur prêt-à-porter", "employé de rayon"]),
    ("baby-sitter", 1.0, &["sortie d'école", "garde périscolaire"]),
    ("hote-accueil", 1.0, &["hôtesse événementiel", "hôtesse salon"]),
];

impl SynonymTable {
    /// Builds the merged table. Deterministic given the static sources.
    pub fn build() -> Self {
        let mut entries: HashMap<&'static str, SynonymEntry> = HashMap::new();

        for (key, weight, synonyms) in BASE_TABLE {
            entries.insert(
                key,
                SynonymEntry {
                    synonyms: synonyms.to_vec(),
                    weight: *weight,
                },
            );
        }

        for (key, weight, synonyms) in EXTENDED_TABLE {
            match entries.get_mut(key) {
                Some(existing) => {
                    // Extend, never overwrite: keep the base weight and
                    // append only synonyms the base did not declare.
                    for syn in *synonyms {
                        if !existing.synonyms.iter().any(|s| s.eq_ignore_ascii_case(syn)) {
                            existing.synonyms.push(syn);
                        }
                    }
                }
                None => {
                    entries.insert(
                        key,
                        SynonymEntry {
                            synonyms: synonyms.to_vec(),
                            weight: *weight,
                        },
                    );
                }
            }
        }

        SynonymTable { entries }
    }

    pub fn get(&self, key: &str) -> Option<&SynonymEntry> {
        self.entries.get(key)
    }

    /// Detection weight for a job key. Unknown keys get the neutral 1.0
    /// multiplier — never zero, so valid low-frequency jobs are not
    /// silently discarded.
    pub fn weight_for(&self, key: &str) -> f64 {
        self.entries.get(key).map(|e| e.weight).unwrap_or(1.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&&'static str, &SynonymEntry)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_merges_extended_into_base() {
        let table = SynonymTable::build();
        let serveur = table.get("serveur").expect("serveur must exist");
        assert!(serveur.synonyms.contains(&"chef de rang"), "base synonym kept");
        assert!(
            serveur.synonyms.contains(&"extra en salle"),
            "extended synonym appended"
        );
    }

    #[test]
    fn test_extended_table_never_overwrites_weight() {
        let table = SynonymTable::build();
        // Base weight 1.3 must survive the extended row's neutral 1.0.
        assert!((table.weight_for("serveur") - 1.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_key_gets_neutral_weight() {
        let table = SynonymTable::build();
        assert!((table.weight_for("astronaute") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_duplicate_synonyms_after_merge() {
        let table = SynonymTable::build();
        for (key, entry) in table.iter() {
            let mut lowered: Vec<String> =
                entry.synonyms.iter().map(|s| s.to_lowercase()).collect();
            lowered.sort();
            let before = lowered.len();
            lowered.dedup();
            assert_eq!(before, lowered.len(), "duplicate synonym under key {key}");
        }
    }

    #[test]
    fn test_every_base_key_exists_in_lexicon() {
        let lexicon = crate::lexicon::Lexicon::load().unwrap();
        let table = SynonymTable::build();
        for (key, _) in table.iter() {
            assert!(
                lexicon.find(key).is_some(),
                "synonym key {key} missing from lexicon"
            );
        }
    }
}
