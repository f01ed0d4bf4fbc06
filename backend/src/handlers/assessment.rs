//! HTTP handlers for risk assessment endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use shared::{CropBatch, PortfolioSummary, RiskAssessment};

use crate::error::AppResult;
use crate::services::AssessmentService;
use crate::AppState;

/// Request body for a portfolio assessment
#[derive(Debug, Deserialize)]
pub struct AssessPortfolioRequest {
    pub batches: Vec<CropBatch>,
}

/// Response body for a portfolio assessment
///
/// `summary` is null when the farmer has no active batches
#[derive(Debug, Serialize)]
pub struct AssessPortfolioResponse {
    pub summary: Option<PortfolioSummary>,
}

fn assessment_service(state: &AppState) -> AssessmentService {
    match &state.advisory {
        Some(advisory) => {
            AssessmentService::with_advisory(state.environment_cache.clone(), advisory.clone())
        }
        None => AssessmentService::new(state.environment_cache.clone()),
    }
}

/// Assess a single batch
pub async fn assess_batch(
    State(state): State<AppState>,
    Json(batch): Json<CropBatch>,
) -> AppResult<Json<RiskAssessment>> {
    let service = assessment_service(&state);
    let assessment = service.assess_batch(&batch).await?;
    Ok(Json(assessment))
}

/// Assess a farmer's portfolio of batches
pub async fn assess_portfolio(
    State(state): State<AppState>,
    Json(request): Json<AssessPortfolioRequest>,
) -> AppResult<Json<AssessPortfolioResponse>> {
    let service = assessment_service(&state);
    let summary = service.assess_portfolio(&request.batches).await?;
    Ok(Json(AssessPortfolioResponse { summary }))
}
