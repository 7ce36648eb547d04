//! Stateless bulk screening endpoint.

use std::collections::BTreeSet;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::triage::matcher;
use crate::triage::messages::MessageTemplates;
use crate::triage::types::MatchResult;

#[derive(Deserialize)]
pub struct ScreenRequest {
    pub symptoms: Vec<String>,
}

#[derive(Serialize)]
pub struct ScreenResponse {
    pub exact: Vec<MatchResult>,
    pub partial: Vec<MatchResult>,
    /// Patient-facing rendering of the result.
    pub summary: String,
}

/// `POST /api/screen` — score the whole catalog against declared symptoms.
///
/// Symptoms outside the catalog vocabulary are rejected here; the matcher
/// itself accepts any set and free-text validation belongs to the transport.
pub async fn screen(
    State(ctx): State<ApiContext>,
    Json(req): Json<ScreenRequest>,
) -> Result<Json<ScreenResponse>, ApiError> {
    let vocabulary = ctx.catalog.symptom_vocabulary();
    let unknown: Vec<&str> = req
        .symptoms
        .iter()
        .filter(|s| !vocabulary.contains(*s))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Unknown symptoms: {}",
            unknown.join(", ")
        )));
    }

    let confirmed: BTreeSet<String> = req.symptoms.into_iter().collect();
    let report = matcher::screen(&confirmed, &ctx.catalog);
    let summary = MessageTemplates::screening_result(&report, &ctx.catalog);

    Ok(Json(ScreenResponse {
        exact: report.exact,
        partial: report.partial,
        summary,
    }))
}
