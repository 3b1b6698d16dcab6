//! Text normalization shared by the detector and several extractors.
//!
//! Normalization is deliberately shallow: case fold, diacritic strip,
//! punctuation to spaces, whitespace collapse. No tokenizer or grammar
//! beyond that.

/// Tokens ignored during tokenization. Short French function words that
/// carry no job signal but inflate overlap scores.
pub const STOPWORDS: &[&str] = &[
    "les", "des", "une", "pour", "avec", "dans", "sur", "est", "mon", "mes", "ton", "son", "ses",
    "nous", "vous", "ils", "elle", "elles", "que", "qui", "pas", "par", "aux", "ces", "cette",
];

/// Minimum token length kept by [`tokenize`].
pub const MIN_TOKEN_LEN: usize = 3;

/// Replaces French diacritics with their base letter. Everything else
/// passes through unchanged.
pub fn strip_diacritics(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' | 'á' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' | 'í' => 'i',
            'ô' | 'ö' | 'ó' => 'o',
            'ù' | 'û' | 'ü' | 'ú' => 'u',
            'ç' => 'c',
            'À' | 'Â' | 'Ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Î' | 'Ï' => 'I',
            'Ô' | 'Ö' => 'O',
            'Ù' | 'Û' | 'Ü' => 'U',
            'Ç' => 'C',
            _ => c,
        })
        .collect()
}

/// Case-folds, strips diacritics, turns punctuation into spaces and
/// collapses runs of whitespace into a single space.
pub fn normalize(input: &str) -> String {
    let lowered = strip_diacritics(&input.to_lowercase());
    let mut out = String::with_capacity(lowered.len());
    let mut last_was_space = true;
    for c in lowered.chars() {
        let mapped = if c.is_alphanumeric() { c } else { ' ' };
        if mapped == ' ' {
            if !last_was_space {
                out.push(' ');
                last_was_space = true;
            }
        } else {
            out.push(mapped);
            last_was_space = false;
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Normalizes then splits into tokens, dropping stopwords and tokens
/// shorter than [`MIN_TOKEN_LEN`].
pub fn tokenize(input: &str) -> Vec<String> {
    normalize(input)
        .split(' ')
        .filter(|t| t.len() >= MIN_TOKEN_LEN && !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// True when `needle` (already normalized) occurs as a whole-word
/// sequence inside `haystack` (already normalized).
pub fn contains_phrase(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let padded = format!(" {haystack} ");
    padded.contains(&format!(" {needle} "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_diacritics_french_letters() {
        assert_eq!(strip_diacritics("sécurité"), "securite");
        assert_eq!(strip_diacritics("Électricien"), "Electricien");
        assert_eq!(strip_diacritics("maçon"), "macon");
    }

    #[test]
    fn test_normalize_collapses_punctuation_and_case() {
        assert_eq!(
            normalize("Agent de sécurité, à Lille !"),
            "agent de securite a lille"
        );
    }

    #[test]
    fn test_normalize_splits_apostrophes() {
        assert_eq!(normalize("aujourd'hui"), "aujourd hui");
    }

    #[test]
    fn test_tokenize_drops_short_tokens_and_stopwords() {
        let tokens = tokenize("Je cherche un serveur pour les soirs");
        assert!(tokens.contains(&"cherche".to_string()));
        assert!(tokens.contains(&"serveur".to_string()));
        assert!(!tokens.contains(&"je".to_string()), "len < 3 dropped");
        assert!(!tokens.contains(&"pour".to_string()), "stopword dropped");
    }

    #[test]
    fn test_contains_phrase_whole_words_only() {
        let text = normalize("Je cherche un agent immobilier à Lyon");
        assert!(contains_phrase(&text, "agent immobilier"));
        assert!(!contains_phrase(&text, "agent immo"));
        assert!(!contains_phrase(&text, ""));
    }
}
