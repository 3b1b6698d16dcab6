//! Announcement generator — turns extracted fields into a publishable
//! title and body, plus a set of stylistic variants.
//!
//! Everything here is a deterministic function of the fields: the same
//! input always yields the same drafts, so callers can regenerate
//! freely as the user types.

pub mod formatter;

use serde::Serialize;

use crate::extract::date::format_date_fr;
use crate::lexicon::{JobLexiconEntry, Lexicon};
use crate::models::{ExperienceLevel, ExtractedFields};

#[derive(Debug, Clone, Serialize)]
pub struct Announcement {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementVariant {
    pub style: &'static str,
    pub title: String,
    pub body: String,
}

/// Tone-parameterized styles appended after the three base variants.
/// Order is part of the contract: `style_count` takes a prefix.
const STYLE_PALETTE: &[&str] = &["premium", "convivial", "sobre", "urgence"];

/// Per-category intro lines. Falls back to a generic opener.
const CATEGORY_INTROS: &[(&str, &str)] = &[
    (
        "restauration",
        "Notre établissement renforce son équipe de salle et de cuisine.",
    ),
    (
        "sécurité",
        "Nous recherchons un renfort pour assurer la sécurité de notre site.",
    ),
    (
        "logistique",
        "Notre entrepôt recherche un renfort pour faire face à un pic d'activité.",
    ),
    (
        "bâtiment",
        "Chantier en cours : nous cherchons un professionnel qualifié en renfort.",
    ),
    (
        "vente",
        "Notre boutique recherche un renfort pour accompagner sa clientèle.",
    ),
    (
        "garde d'enfants",
        "Famille recherche une personne de confiance pour la garde d'enfants.",
    ),
];
const GENERIC_INTRO: &str = "Nous recherchons un renfort ponctuel pour une mission courte.";

/// Template rate used in Conditions when the text gave none.
const RATE_TEMPLATE_DEFAULTS: &[(&str, u32)] = &[
    ("restauration", 14),
    ("sécurité", 16),
    ("bâtiment", 18),
    ("logistique", 13),
    ("garde d'enfants", 12),
];
const RATE_GENERIC_DEFAULT: u32 = 14;

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Renders the full (detailed) announcement.
pub fn render(fields: &ExtractedFields, lexicon: &Lexicon) -> Announcement {
    let entry = fields.role.as_deref().and_then(|r| lexicon.find(r));

    let title = build_title(fields);
    let mut sections = vec![intro_line(entry).to_string()];

    if let Some(mission) = mission_section(fields) {
        sections.push(mission);
    }
    sections.push(profile_section(fields, entry));
    sections.push(conditions_section(fields, entry));
    if let Some(benefits) = benefits_section(fields) {
        sections.push(benefits);
    }

    Announcement {
        title: formatter::polish(&title),
        body: formatter::polish(&sections.join("\n\n")),
    }
}

/// Renders the base variants (courte, dynamique, détaillée) followed by
/// the first `style_count` palette styles.
pub fn render_variants(
    fields: &ExtractedFields,
    lexicon: &Lexicon,
    style_count: usize,
) -> Vec<AnnouncementVariant> {
    let entry = fields.role.as_deref().and_then(|r| lexicon.find(r));
    let detailed = render(fields, lexicon);

    let mut variants = vec![
        AnnouncementVariant {
            style: "courte",
            title: detailed.title.clone(),
            body: formatter::polish(&short_body(fields, entry)),
        },
        AnnouncementVariant {
            style: "dynamique",
            title: format!("🔥 {}", detailed.title),
            body: formatter::polish(&dynamic_body(fields, entry)),
        },
        AnnouncementVariant {
            style: "détaillée",
            title: detailed.title.clone(),
            body: detailed.body.clone(),
        },
    ];

    for style in STYLE_PALETTE.iter().take(style_count) {
        variants.push(AnnouncementVariant {
            style,
            title: detailed.title.clone(),
            body: formatter::polish(&styled_body(style, fields, entry)),
        });
    }

    variants
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn build_title(fields: &ExtractedFields) -> String {
    let mut title = capitalize(fields.role.as_deref().unwrap_or("Mission ponctuelle"));
    if let Some(city) = &fields.city {
        title.push_str(&format!(" - {city}"));
    }
    if let Some(date) = fields.date {
        title.push_str(&format!(" - {}", format_date_fr(date)));
    }
    title
}

fn intro_line(entry: Option<&JobLexiconEntry>) -> &'static str {
    entry
        .and_then(|e| {
            CATEGORY_INTROS
                .iter()
                .find(|(cat, _)| *cat == e.category)
                .map(|(_, intro)| *intro)
        })
        .unwrap_or(GENERIC_INTRO)
}

/// Hours and date. Omitted entirely when neither is known.
fn mission_section(fields: &ExtractedFields) -> Option<String> {
    let mut lines = Vec::new();
    if let Some(date) = fields.date {
        lines.push(format!("• Date : {}", format_date_fr(date)));
    }
    if let Some(range) = fields.time_range {
        lines.push(format!("• Horaires : {range}"));
    }
    if let Some(duration) = &fields.duration {
        lines.push(format!("• Durée : {duration}"));
    }
    if lines.is_empty() {
        return None;
    }
    Some(format!("Mission :\n{}", lines.join("\n")))
}

fn profile_section(fields: &ExtractedFields, entry: Option<&JobLexiconEntry>) -> String {
    let mut lines = Vec::new();

    let experience = fields
        .experience_label
        .clone()
        .or_else(|| entry.map(|e| format!("niveau {}", e.experience_level.label())));
    if let Some(exp) = experience {
        lines.push(format!("• Expérience : {exp}"));
    }

    for skill in merged_skills(fields, entry) {
        lines.push(format!("• {skill}"));
    }

    for language in &fields.languages {
        lines.push(format!("• {language} apprécié"));
    }

    format!("Profil recherché :\n{}", lines.join("\n"))
}

/// User skills first, then the job's critical skills, deduplicated
/// case-insensitively and capped by experience level.
fn merged_skills(fields: &ExtractedFields, entry: Option<&JobLexiconEntry>) -> Vec<String> {
    let cap = match entry.map(|e| e.experience_level) {
        Some(ExperienceLevel::Expert) => 8,
        Some(ExperienceLevel::Intermediaire) => 6,
        _ => 5,
    };

    let mut out: Vec<String> = Vec::new();
    let mut push = |skill: &str| {
        if out.len() < cap && !out.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
            out.push(skill.to_string());
        }
    };

    for skill in &fields.skills {
        push(skill);
    }
    if let Some(e) = entry {
        for skill in e.skills {
            push(skill);
        }
    }
    out
}

fn conditions_section(fields: &ExtractedFields, entry: Option<&JobLexiconEntry>) -> String {
    let mut lines = Vec::new();

    if let Some(contract) = &fields.contract_type {
        lines.push(format!("• Contrat : {contract}"));
    } else if let Some(mission) = &fields.mission_type {
        lines.push(format!("• Type : {mission}"));
    }

    let rate = fields
        .hourly_rate
        .clone()
        .unwrap_or_else(|| format!("{}€/h", default_rate(entry)));
    lines.push(format!("• Rémunération : {rate}"));

    if let Some(city) = &fields.city {
        lines.push(format!("• Lieu : {city}"));
    }
    if let Some(date) = fields.date {
        lines.push(format!("• Prise de poste : {}", format_date_fr(date)));
    }

    format!("Conditions :\n{}", lines.join("\n"))
}

/// Only long-term engagements advertise benefits.
fn benefits_section(fields: &ExtractedFields) -> Option<String> {
    let contract = fields.contract_type.as_deref()?;
    if !matches!(contract, "CDI" | "Temps plein") {
        return None;
    }
    Some(
        "Avantages :\n• Mutuelle d'entreprise\n• Primes sur objectifs\n• Évolution possible"
            .to_string(),
    )
}

fn default_rate(entry: Option<&JobLexiconEntry>) -> u32 {
    entry
        .and_then(|e| {
            RATE_TEMPLATE_DEFAULTS
                .iter()
                .find(|(cat, _)| *cat == e.category)
                .map(|(_, r)| *r)
        })
        .unwrap_or(RATE_GENERIC_DEFAULT)
}

// ────────────────────────────────────────────────────────────────────────────
// Variant bodies
// ────────────────────────────────────────────────────────────────────────────

fn short_body(fields: &ExtractedFields, entry: Option<&JobLexiconEntry>) -> String {
    let role = fields.role.as_deref().unwrap_or("Renfort");
    let mut parts = vec![role.to_string()];
    if let Some(city) = &fields.city {
        parts.push(format!("à {city}"));
    }
    if let Some(date) = fields.date {
        parts.push(format_date_fr(date));
    }
    if let Some(range) = fields.time_range {
        parts.push(range.to_string());
    }
    let rate = fields
        .hourly_rate
        .clone()
        .unwrap_or_else(|| format!("{}€/h", default_rate(entry)));
    parts.push(rate);
    format!("{}. Contact rapide souhaité.", parts.join(", "))
}

fn dynamic_body(fields: &ExtractedFields, entry: Option<&JobLexiconEntry>) -> String {
    let role = fields.role.as_deref().unwrap_or("notre prochain renfort");
    let mut body = format!("🚀 Nous cherchons {role} !\n\n");
    if let Some(mission) = mission_section(fields) {
        body.push_str(&format!("📅 {mission}\n\n"));
    }
    body.push_str(&format!(
        "💶 Rémunération : {}\n\n",
        fields
            .hourly_rate
            .clone()
            .unwrap_or_else(|| format!("{}€/h", default_rate(entry)))
    ));
    body.push_str("Intéressé(e) ? Répondez vite, le poste part toujours en premier ! 💪");
    body
}

fn styled_body(style: &str, fields: &ExtractedFields, entry: Option<&JobLexiconEntry>) -> String {
    match style {
        "premium" => format!(
            "{}\n\nUne maison exigeante, une équipe soudée, une mission valorisante.\n\n{}",
            intro_line(entry),
            conditions_section(fields, entry)
        ),
        "convivial" => format!(
            "On cherche un coup de main ! {}\n\n{}\n\nAmbiance garantie, on vous attend.",
            intro_line(entry),
            conditions_section(fields, entry)
        ),
        "urgence" => format!(
            "⚡ Besoin immédiat !\n\n{}\n\n{}\n\nPremière réponse sérieuse retenue.",
            mission_section(fields).unwrap_or_else(|| "Mission : à convenir".to_string()),
            conditions_section(fields, entry)
        ),
        // "sobre" and anything unknown fall back to the factual form.
        _ => format!(
            "{}\n\n{}",
            mission_section(fields).unwrap_or_else(|| "Mission : à convenir".to_string()),
            conditions_section(fields, entry)
        ),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
