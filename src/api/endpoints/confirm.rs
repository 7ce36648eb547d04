//! Stateless single-disease confirmation endpoint.
//!
//! The interactive version of this flow lives in the chat sessions; this
//! endpoint takes all answers up front. Clarifying answers are consumed per
//! symptom in question order, and any missing answer counts as no.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::enums::ConfirmationOutcome;
use crate::triage::escalation::confirm_with;
use crate::triage::messages::MessageTemplates;
use crate::triage::types::{ConfirmationReport, TriageError};

#[derive(Deserialize)]
pub struct ConfirmRequest {
    pub disease: String,
    /// Initial yes/no per symptom. Missing symptoms count as no.
    #[serde(default)]
    pub symptoms: HashMap<String, bool>,
    /// Answers to clarifying questions, per symptom, in question order.
    #[serde(default)]
    pub clarifications: HashMap<String, Vec<bool>>,
}

#[derive(Serialize)]
pub struct ConfirmResponse {
    #[serde(flatten)]
    pub report: ConfirmationReport,
    /// Present only when the disease is fully confirmed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
    /// Patient-facing rendering of the result.
    pub summary: String,
}

/// `POST /api/confirm` — confirm one suspected disease from batch answers.
pub async fn confirm(
    State(ctx): State<ApiContext>,
    Json(req): Json<ConfirmRequest>,
) -> Result<Json<ConfirmResponse>, ApiError> {
    let disease = ctx
        .catalog
        .get(&req.disease)
        .ok_or(TriageError::UnknownDisease(req.disease.clone()))?;

    for symptom in req.symptoms.keys().chain(req.clarifications.keys()) {
        if !disease.has_symptom(symptom) {
            return Err(ApiError::BadRequest(format!(
                "'{}' is not a symptom of {}",
                symptom, disease.name
            )));
        }
    }

    let mut cursors: HashMap<String, usize> = HashMap::new();
    let report = confirm_with(disease, &req.symptoms, |symptom, _question| {
        let cursor = cursors.entry(symptom.to_string()).or_insert(0);
        let answer = req
            .clarifications
            .get(symptom)
            .and_then(|answers| answers.get(*cursor))
            .copied()
            .unwrap_or(false);
        *cursor += 1;
        answer
    });

    let treatment = (report.outcome == ConfirmationOutcome::Confirmed)
        .then(|| disease.treatment.clone());
    let summary = MessageTemplates::confirmation_result(&report, treatment.as_deref());

    Ok(Json(ConfirmResponse {
        report,
        treatment,
        summary,
    }))
}
