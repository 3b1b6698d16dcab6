//! Final text polish applied to every rendered announcement: a fixed
//! typo-correction table and bullet-line normalization.

use once_cell::sync::Lazy;
use regex::Regex;

/// Common misspellings seen in hastily typed requests. Whole-word,
/// case-preserving on the first letter.
const TYPO_TABLE: &[(&str, &str)] = &[
    ("experiance", "expérience"),
    ("experience", "expérience"),
    ("competance", "compétence"),
    ("competances", "compétences"),
    ("remuneration", "rémunération"),
    ("horraires", "horaires"),
    ("restaurent", "restaurant"),
    ("vehicule", "véhicule"),
    ("securite", "sécurité"),
    ("batiment", "bâtiment"),
];

static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(\s*)[-*•]\s*").unwrap());

static WORD_RES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    TYPO_TABLE
        .iter()
        .map(|(wrong, right)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(wrong));
            (Regex::new(&pattern).unwrap(), *right)
        })
        .collect()
});

/// Applies the typo table then unifies bullet markers to `•`.
pub fn polish(text: &str) -> String {
    let mut out = text.to_string();

    for (re, right) in WORD_RES.iter() {
        out = re
            .replace_all(&out, |caps: &regex::Captures| {
                preserve_case(caps.get(0).map(|m| m.as_str()).unwrap_or(""), right)
            })
            .into_owned();
    }

    BULLET_RE.replace_all(&out, "${1}• ").into_owned()
}

/// A correction keeps the original's leading capital.
fn preserve_case(original: &str, replacement: &str) -> String {
    let starts_upper = original.chars().next().map_or(false, |c| c.is_uppercase());
    if starts_upper {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}
