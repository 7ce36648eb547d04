//! Disease catalog endpoints.
//!
//! - `GET /api/diseases` — catalog listing plus the symptom vocabulary
//! - `GET /api/diseases/:name` — one disease in full (clarifying questions
//!   included)

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::Disease;
use crate::triage::types::TriageError;

#[derive(Serialize)]
pub struct DiseaseSummary {
    pub name: String,
    pub symptoms: Vec<String>,
    pub treatment: String,
}

#[derive(Serialize)]
pub struct DiseasesResponse {
    pub diseases: Vec<DiseaseSummary>,
    pub symptom_vocabulary: Vec<String>,
}

/// `GET /api/diseases` — list the catalog in definition order.
pub async fn list(State(ctx): State<ApiContext>) -> Json<DiseasesResponse> {
    let diseases = ctx
        .catalog
        .all()
        .iter()
        .map(|d| DiseaseSummary {
            name: d.name.clone(),
            symptoms: d.symptoms.clone(),
            treatment: d.treatment.clone(),
        })
        .collect();

    Json(DiseasesResponse {
        diseases,
        symptom_vocabulary: ctx.catalog.symptom_vocabulary(),
    })
}

/// `GET /api/diseases/:name` — full catalog entry for one disease.
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(name): Path<String>,
) -> Result<Json<Disease>, ApiError> {
    let disease = ctx
        .catalog
        .get(&name)
        .ok_or(TriageError::UnknownDisease(name))?;
    Ok(Json(disease.clone()))
}
