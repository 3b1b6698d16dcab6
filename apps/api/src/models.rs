//! Shared data models — the structured record every extractor feeds into.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Experience level attached to a lexicon entry or extracted from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Debutant,
    Intermediaire,
    Expert,
}

impl ExperienceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Debutant => "débutant",
            ExperienceLevel::Intermediaire => "intermédiaire",
            ExperienceLevel::Expert => "expert",
        }
    }
}

/// Urgency marker extracted from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Normal,
    Urgent,
    TresUrgent,
}

impl Urgency {
    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::Urgent => "urgent",
            Urgency::TresUrgent => "très urgent",
        }
    }
}

/// A validated time window. Invariant: `start < end`, both in 0..=23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h–{}h", self.start, self.end)
    }
}

/// Mutable accumulator for one interpretation pass.
///
/// Every field is optional; absence is the normal state before
/// completion. Merge policy is first-non-empty-wins — see
/// [`ExtractedFields::merge_missing`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub role: Option<String>,
    pub city: Option<String>,
    pub date: Option<NaiveDate>,
    pub duration: Option<String>,
    pub hourly_rate: Option<String>,
    pub contract_type: Option<String>,
    pub mission_type: Option<String>,
    pub experience_label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub company_name: Option<String>,
    pub time_range: Option<TimeRange>,
    pub urgency: Option<Urgency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    pub availability: Option<String>,
}

impl ExtractedFields {
    /// Fills every empty field of `self` from `other`.
    ///
    /// A field set by an earlier (higher-confidence) extractor is never
    /// overwritten by a later one within the same pass.
    pub fn merge_missing(&mut self, other: ExtractedFields) {
        fn take<T>(dst: &mut Option<T>, src: Option<T>) {
            if dst.is_none() {
                *dst = src;
            }
        }

        take(&mut self.role, other.role);
        take(&mut self.city, other.city);
        take(&mut self.date, other.date);
        take(&mut self.duration, other.duration);
        take(&mut self.hourly_rate, other.hourly_rate);
        take(&mut self.contract_type, other.contract_type);
        take(&mut self.mission_type, other.mission_type);
        take(&mut self.experience_label, other.experience_label);
        take(&mut self.contact_name, other.contact_name);
        take(&mut self.contact_email, other.contact_email);
        take(&mut self.contact_phone, other.contact_phone);
        take(&mut self.company_name, other.company_name);
        take(&mut self.time_range, other.time_range);
        take(&mut self.urgency, other.urgency);
        take(&mut self.availability, other.availability);
        if self.skills.is_empty() {
            self.skills = other.skills;
        }
        if self.languages.is_empty() {
            self.languages = other.languages;
        }
    }
}
