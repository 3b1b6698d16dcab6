//! Job detection — layered resolution of a canonical job from free text.
//!
//! Naive substring matching misses compound titles ("agent immobilier")
//! and naive token overlap over-triggers on generic words ("agent"), so
//! detection is layered: exact multi-word synonym containment, then
//! bigram containment, then weighted token-overlap scoring. The first
//! layer that produces a match wins.

use serde::Serialize;

use crate::lexicon::synonyms::SynonymTable;
use crate::lexicon::{JobLexiconEntry, Lexicon};
use crate::text::{contains_phrase, normalize, tokenize};

// Scoring constants. The bonus values and acceptance thresholds are
// tuned heuristics — compatibility constants, not semantic guarantees.
const CONTIGUOUS_BONUS: f64 = 0.30;
const FIRST_TOKEN_BONUS: f64 = 0.20;
const LAST_TOKEN_BONUS: f64 = 0.15;
const SUBSTRING_BONUS: f64 = 0.25;
const BIGRAM_BONUS: f64 = 0.20;

/// Acceptance threshold for jobs whose name has several tokens.
pub const ACCEPT_MULTI: f64 = 0.25;
/// Single-token names over-trigger more easily and need a higher bar.
pub const ACCEPT_SINGLE: f64 = 0.30;

const MAX_SECONDARY: usize = 3;

/// One detected job with its relative confidence in [0,1].
#[derive(Debug, Clone, Serialize)]
pub struct JobMatch {
    pub job_key: String,
    pub canonical_name: String,
    /// Relative ranking score, clamped to [0,1]. Not a probability.
    pub confidence: f64,
}

/// Primary match plus lower-ranked alternatives.
#[derive(Debug, Clone, Serialize)]
pub struct JobDetectionResult {
    pub primary: JobMatch,
    pub secondary: Vec<JobMatch>,
}

struct Candidate<'a> {
    entry: &'a JobLexiconEntry,
    score: f64,
    token_count: usize,
}

/// Resolves the canonical job name, or `None` below threshold.
pub fn detect(text: &str, lexicon: &Lexicon, synonyms: &SynonymTable) -> Option<String> {
    detect_with_confidence(text, lexicon, synonyms).map(|r| r.primary.canonical_name)
}

/// Full dual-result detection: primary match plus secondary candidates.
pub fn detect_with_confidence(
    text: &str,
    lexicon: &Lexicon,
    synonyms: &SynonymTable,
) -> Option<JobDetectionResult> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return None;
    }
    let tokens = tokenize(text);
    let input_bigrams: Vec<(&str, &str)> = tokens
        .windows(2)
        .map(|w| (w[0].as_str(), w[1].as_str()))
        .collect();

    // Layer 2: exact multi-word phrase containment, all entries.
    let mut candidates = exact_phrase_candidates(&normalized, lexicon, synonyms);

    // Layer 3: bigram containment for compound titles the phrase check
    // missed (stopword-elided forms like "agent sécurité").
    if candidates.is_empty() {
        candidates = bigram_candidates(&input_bigrams, lexicon, synonyms);
    }

    // Layer 4: scored token-overlap fallback.
    if candidates.is_empty() {
        candidates = scored_candidates(&normalized, &tokens, &input_bigrams, lexicon, synonyms);
    }

    rank(candidates)
}

fn exact_phrase_candidates<'a>(
    normalized: &str,
    lexicon: &'a Lexicon,
    synonyms: &SynonymTable,
) -> Vec<Candidate<'a>> {
    let mut out = Vec::new();
    for entry in lexicon.entries() {
        let weight = synonyms.weight_for(entry.id);
        let best_phrase_len = candidate_phrases(entry, synonyms)
            .into_iter()
            .filter(|p| p.contains(' ') && contains_phrase(normalized, p))
            .map(|p| p.len())
            .max();
        if let Some(len) = best_phrase_len {
            // Longer matched phrases are more specific; fold the length
            // in below the weight so weight still dominates ties.
            out.push(Candidate {
                entry,
                score: (1.0 + len as f64 / 100.0) * weight,
                token_count: tokenize(entry.canonical_name).len(),
            });
        }
    }
    out
}

fn bigram_candidates<'a>(
    input_bigrams: &[(&str, &str)],
    lexicon: &'a Lexicon,
    synonyms: &SynonymTable,
) -> Vec<Candidate<'a>> {
    let mut out = Vec::new();
    for entry in lexicon.entries() {
        let weight = synonyms.weight_for(entry.id);
        let entry_tokens = tokenize(entry.canonical_name);
        let matched = entry_tokens
            .windows(2)
            .any(|w| input_bigrams.contains(&(w[0].as_str(), w[1].as_str())))
            || synonym_bigram_hit(entry, synonyms, input_bigrams);
        if matched {
            out.push(Candidate {
                entry,
                score: 0.9 * weight,
                token_count: entry_tokens.len(),
            });
        }
    }
    out
}

fn synonym_bigram_hit(
    entry: &JobLexiconEntry,
    synonyms: &SynonymTable,
    input_bigrams: &[(&str, &str)],
) -> bool {
    let Some(syn_entry) = synonyms.get(entry.id) else {
        return false;
    };
    syn_entry.synonyms.iter().any(|syn| {
        let syn_tokens = tokenize(syn);
        syn_tokens
            .windows(2)
            .any(|w| input_bigrams.contains(&(w[0].as_str(), w[1].as_str())))
    })
}

fn scored_candidates<'a>(
    normalized: &str,
    tokens: &[String],
    input_bigrams: &[(&str, &str)],
    lexicon: &'a Lexicon,
    synonyms: &SynonymTable,
) -> Vec<Candidate<'a>> {
    let mut out = Vec::new();
    for entry in lexicon.entries() {
        let entry_tokens = tokenize(entry.canonical_name);
        if entry_tokens.is_empty() {
            continue;
        }

        let matched = entry_tokens
            .iter()
            .filter(|t| tokens.contains(t))
            .count();
        let syn_hit = single_word_synonym_hit(entry, synonyms, tokens);
        if matched == 0 && !syn_hit {
            continue;
        }

        let mut score = matched as f64 / entry_tokens.len() as f64;
        let sequence = entry_tokens.join(" ");

        if matched == entry_tokens.len() && contains_phrase(normalized, &sequence) {
            score += CONTIGUOUS_BONUS;
        }
        if tokens.contains(&entry_tokens[0]) {
            score += FIRST_TOKEN_BONUS;
        }
        if entry_tokens.len() > 1 && tokens.contains(entry_tokens.last().unwrap()) {
            // Trailing token is the domain qualifier ("… immobilier").
            score += LAST_TOKEN_BONUS;
        }
        if normalized.contains(&sequence) {
            score += SUBSTRING_BONUS;
        }
        if entry_tokens
            .windows(2)
            .any(|w| input_bigrams.contains(&(w[0].as_str(), w[1].as_str())))
        {
            score += BIGRAM_BONUS;
        }

        if syn_hit {
            // A colloquial one-word synonym ("vigile", "nounou") is as
            // strong a signal as the full canonical name.
            score = score.max(1.0 + SUBSTRING_BONUS);
        }

        score *= synonyms.weight_for(entry.id);

        let threshold = if entry_tokens.len() > 1 {
            ACCEPT_MULTI
        } else {
            ACCEPT_SINGLE
        };
        if score >= threshold {
            out.push(Candidate {
                entry,
                score,
                token_count: entry_tokens.len(),
            });
        }
    }
    out
}

/// Highest score first; ties prefer fewer tokens (more specific), then
/// the shorter normalized name.
fn rank(mut candidates: Vec<Candidate<'_>>) -> Option<JobDetectionResult> {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.token_count.cmp(&b.token_count))
            .then(
                normalize(a.entry.canonical_name)
                    .len()
                    .cmp(&normalize(b.entry.canonical_name).len()),
            )
    });

    let mut iter = candidates.into_iter();
    let primary = iter.next()?;
    let secondary = iter
        .take(MAX_SECONDARY)
        .map(|c| to_match(&c))
        .collect();

    Some(JobDetectionResult {
        primary: to_match(&primary),
        secondary,
    })
}

fn to_match(candidate: &Candidate<'_>) -> JobMatch {
    JobMatch {
        job_key: candidate.entry.id.to_string(),
        canonical_name: candidate.entry.canonical_name.to_string(),
        confidence: candidate.score.clamp(0.0, 1.0),
    }
}

fn single_word_synonym_hit(
    entry: &JobLexiconEntry,
    synonyms: &SynonymTable,
    tokens: &[String],
) -> bool {
    let Some(syn_entry) = synonyms.get(entry.id) else {
        return false;
    };
    syn_entry.synonyms.iter().any(|syn| {
        let normalized = normalize(syn);
        !normalized.contains(' ') && tokens.iter().any(|t| *t == normalized)
    })
}

fn candidate_phrases(entry: &JobLexiconEntry, synonyms: &SynonymTable) -> Vec<String> {
    let mut phrases = vec![normalize(entry.canonical_name), normalize(entry.id)];
    if let Some(syn_entry) = synonyms.get(entry.id) {
        phrases.extend(syn_entry.synonyms.iter().map(|s| normalize(s)));
    }
    phrases
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Lexicon, SynonymTable) {
        (Lexicon::load().unwrap(), SynonymTable::build())
    }

    #[test]
    fn test_simple_job_name() {
        let (lexicon, synonyms) = setup();
        assert_eq!(
            detect("Je cherche un serveur à Lille", &lexicon, &synonyms).as_deref(),
            Some("Serveur/Serveuse")
        );
    }

    #[test]
    fn test_compound_title_beats_generic_word() {
        let (lexicon, synonyms) = setup();
        // "agent" alone is ambiguous; the qualifier must decide.
        assert_eq!(
            detect("besoin d'un agent immobilier ce week-end", &lexicon, &synonyms).as_deref(),
            Some("Agent immobilier")
        );
        assert_eq!(
            detect("agent de sécurité pour samedi soir", &lexicon, &synonyms).as_deref(),
            Some("Agent de sécurité")
        );
        assert_eq!(
            detect("un agent d'entretien pour les bureaux", &lexicon, &synonyms).as_deref(),
            Some("Agent d'entretien")
        );
    }

    #[test]
    fn test_colloquial_synonym_resolves() {
        let (lexicon, synonyms) = setup();
        assert_eq!(
            detect("on cherche un vigile pour la soirée", &lexicon, &synonyms).as_deref(),
            Some("Agent de sécurité")
        );
        assert_eq!(
            detect("besoin d'une nounou jeudi", &lexicon, &synonyms).as_deref(),
            Some("Baby-sitter")
        );
        assert_eq!(
            detect("recherche cuistot en extra", &lexicon, &synonyms).as_deref(),
            Some("Cuisinier/Cuisinière")
        );
    }

    #[test]
    fn test_diacritic_and_case_insensitive() {
        let (lexicon, synonyms) = setup();
        assert_eq!(
            detect("AGENT DE SECURITE disponible ?", &lexicon, &synonyms).as_deref(),
            Some("Agent de sécurité")
        );
    }

    #[test]
    fn test_result_always_in_lexicon() {
        let (lexicon, synonyms) = setup();
        for text in [
            "serveur samedi",
            "vigile",
            "électricien dépannage",
            "un maçon pour un chantier",
            "hôtesse d'accueil salon",
        ] {
            let name = detect(text, &lexicon, &synonyms)
                .unwrap_or_else(|| panic!("no detection for {text}"));
            assert!(
                lexicon.find(&name).is_some(),
                "detected name {name} not in lexicon"
            );
        }
    }

    #[test]
    fn test_unrelated_text_returns_none() {
        let (lexicon, synonyms) = setup();
        assert_eq!(detect("bonjour comment ça va", &lexicon, &synonyms), None);
        assert_eq!(detect("", &lexicon, &synonyms), None);
    }

    #[test]
    fn test_confidence_clamped_to_unit_interval() {
        let (lexicon, synonyms) = setup();
        let result =
            detect_with_confidence("serveur en salle expérimenté", &lexicon, &synonyms).unwrap();
        assert!(result.primary.confidence > 0.0 && result.primary.confidence <= 1.0);
        for m in &result.secondary {
            assert!(m.confidence >= 0.0 && m.confidence <= 1.0);
        }
    }

    #[test]
    fn test_secondary_candidates_for_shared_tokens() {
        let (lexicon, synonyms) = setup();
        // "commis de cuisine" shares "cuisine" with other kitchen jobs.
        let result =
            detect_with_confidence("commis de cuisine pour le service", &lexicon, &synonyms)
                .unwrap();
        assert_eq!(result.primary.job_key, "commis");
    }

    #[test]
    fn test_stopword_elided_compound_matches_via_bigram() {
        let (lexicon, synonyms) = setup();
        // "agent sécurité" without the "de" still resolves.
        assert_eq!(
            detect("agent sécurité samedi", &lexicon, &synonyms).as_deref(),
            Some("Agent de sécurité")
        );
    }

    #[test]
    fn test_primary_outranks_secondary() {
        let (lexicon, synonyms) = setup();
        let result = detect_with_confidence("serveur ou barman ce soir", &lexicon, &synonyms)
            .unwrap();
        for m in &result.secondary {
            assert!(m.confidence <= result.primary.confidence);
        }
    }
}
