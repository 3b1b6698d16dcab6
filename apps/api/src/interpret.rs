//! Interpretation pipeline — runs the detector, the classifier and all
//! extractors over one text and merges the results into a single record.
//!
//! Flow: detect job → classify intent → run field extractors →
//!       assemble `ExtractedFields` → return to caller.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::detect::{detect_with_confidence, JobDetectionResult};
use crate::extract::{city, contact, date, markers, rate, skills, time_range};
use crate::intent::{classify, Intent};
use crate::lexicon::synonyms::SynonymTable;
use crate::lexicon::Lexicon;
use crate::models::ExtractedFields;

/// Full result of one interpretation pass.
#[derive(Debug, Clone, Serialize)]
pub struct Interpretation {
    pub fields: ExtractedFields,
    pub detection: Option<JobDetectionResult>,
    pub intent: Intent,
}

/// Interprets a free-form job request. Pure given (`text`, `today`).
pub fn interpret(
    text: &str,
    today: NaiveDate,
    lexicon: &Lexicon,
    synonyms: &SynonymTable,
) -> Interpretation {
    let detection = detect_with_confidence(text, lexicon, synonyms);
    let intent = classify(text);

    let time = time_range::detect_time_range(text);
    let fields = ExtractedFields {
        role: detection.as_ref().map(|d| d.primary.canonical_name.clone()),
        city: city::detect_city(text),
        date: date::detect_date(text, today),
        duration: time.map(|t| format!("{}h", t.end - t.start)),
        hourly_rate: rate::detect_hourly_rate(text),
        contract_type: markers::detect_contract_type(text),
        mission_type: markers::detect_mission_type(text),
        experience_label: markers::detect_experience(text),
        skills: skills::detect_skills(text),
        contact_name: contact::detect_contact_name(text),
        contact_email: contact::detect_email(text),
        contact_phone: contact::detect_phone(text),
        company_name: contact::detect_company_name(text),
        time_range: time,
        urgency: markers::detect_urgency(text),
        languages: markers::detect_languages(text),
        availability: markers::detect_availability(text),
    };

    debug!(
        role = fields.role.as_deref(),
        city = fields.city.as_deref(),
        intent = ?intent,
        "interpreted request"
    );

    Interpretation {
        fields,
        detection,
        intent,
    }
}
