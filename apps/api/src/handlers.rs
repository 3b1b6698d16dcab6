use axum::{extract::State, Json};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::announce::{render, render_variants, Announcement, AnnouncementVariant};
use crate::errors::AppError;
use crate::intent::Intent;
use crate::interpret::{interpret, Interpretation};
use crate::models::ExtractedFields;
use crate::state::AppState;
use crate::suggest::{generate, SuggestContext, SuggestionGroup};

/// Requests past this length are rejected rather than truncated.
const MAX_INPUT_LEN: usize = 5_000;

fn check_length(text: &str) -> Result<(), AppError> {
    if text.chars().count() > MAX_INPUT_LEN {
        return Err(AppError::Validation(format!(
            "Input exceeds the {MAX_INPUT_LEN} character limit"
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Interpret
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct InterpretRequest {
    pub text: String,
    /// Client origin for city pre-fill. Optional and best-effort.
    #[serde(default)]
    pub client_ip: Option<String>,
}

/// POST /api/v1/interpret
pub async fn handle_interpret(
    State(state): State<AppState>,
    Json(req): Json<InterpretRequest>,
) -> Result<Json<Interpretation>, AppError> {
    check_length(&req.text)?;

    let today = Local::now().date_naive();
    let mut result = interpret(&req.text, today, &state.lexicon, &state.synonyms);

    // A city the user typed always wins; geo only fills the gap.
    if result.fields.city.is_none() {
        if let Some(ip) = req.client_ip.as_deref() {
            let prefill = ExtractedFields {
                city: state.geo.city_for(ip).await,
                ..Default::default()
            };
            result.fields.merge_missing(prefill);
        }
    }

    Ok(Json(result))
}

// ────────────────────────────────────────────────────────────────────────────
// Suggest
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub text: String,
    /// The caller's previous unfinished draft, if it kept one.
    #[serde(default)]
    pub last_draft: Option<String>,
}

#[derive(Serialize)]
pub struct SuggestResponse {
    pub groups: Vec<SuggestionGroup>,
}

/// POST /api/v1/suggest
pub async fn handle_suggest(
    State(state): State<AppState>,
    Json(req): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, AppError> {
    check_length(&req.text)?;

    let context = SuggestContext {
        now: Local::now().naive_local(),
        last_draft: req.last_draft,
    };
    let groups = generate(&req.text, &context, &state.lexicon, &state.synonyms);
    Ok(Json(SuggestResponse { groups }))
}

// ────────────────────────────────────────────────────────────────────────────
// Announce
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AnnounceRequest {
    pub text: String,
    /// Must be set when the classifier judged the text ambiguous.
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Serialize)]
pub struct AnnounceResponse {
    pub intent: Intent,
    pub fields: ExtractedFields,
    pub announcement: Announcement,
    pub variants: Vec<AnnouncementVariant>,
}

/// POST /api/v1/announce
///
/// Intent-gated: a worker describing themselves never gets an
/// auto-generated posting, and an ambiguous text needs explicit
/// confirmation first.
pub async fn handle_announce(
    State(state): State<AppState>,
    Json(req): Json<AnnounceRequest>,
) -> Result<Json<AnnounceResponse>, AppError> {
    check_length(&req.text)?;
    if req.text.trim().is_empty() {
        return Err(AppError::Validation(
            "Cannot generate an announcement from empty text".to_string(),
        ));
    }

    let today = Local::now().date_naive();
    let result = interpret(&req.text, today, &state.lexicon, &state.synonyms);

    match result.intent {
        Intent::PersonalSearch => {
            return Err(AppError::UnprocessableEntity(
                "This text reads as a job seeker's profile, not a staffing request".to_string(),
            ));
        }
        Intent::Ambiguous if !req.confirmed => {
            return Err(AppError::UnprocessableEntity(
                "Intent is ambiguous; resend with confirmed=true to generate anyway".to_string(),
            ));
        }
        _ => {}
    }

    let announcement = render(&result.fields, &state.lexicon);
    let variants = render_variants(
        &result.fields,
        &state.lexicon,
        state.config.announce_style_count,
    );

    info!(
        title = %announcement.title,
        variants = variants.len(),
        "announcement generated"
    );

    Ok(Json(AnnounceResponse {
        intent: result.intent,
        fields: result.fields,
        announcement,
        variants,
    }))
}
