//! Quote handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::info;

use crate::dto::quote::{InstitutionsResponse, Quote, QuoteRequest};
use crate::{error::ApiError, AppState};

/// Quotes with the adapter's own institution
pub async fn create_quote(
    State(state): State<AppState>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<Quote>, ApiError> {
    let Json(request) = payload?;
    let provider = state
        .registry
        .default_provider()
        .ok_or_else(|| ApiError::Internal("No institution registered".to_string()))?;

    let quote = provider.quote(&request)?;
    info!(institution = %quote.institution, amount = request.amount, "Quote issued");
    Ok(Json(quote))
}

/// Quotes with a named institution
pub async fn create_institution_quote(
    State(state): State<AppState>,
    Path(institution): Path<String>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> Result<Json<Quote>, ApiError> {
    let Json(request) = payload?;
    let provider = state.registry.get(&institution)?;

    let quote = provider.quote(&request)?;
    info!(institution = %quote.institution, amount = request.amount, "Quote issued");
    Ok(Json(quote))
}

pub async fn list_institutions(State(state): State<AppState>) -> Json<InstitutionsResponse> {
    Json(InstitutionsResponse {
        institutions: state.registry.codes(),
        default_institution: state
            .registry
            .default_provider()
            .map(|provider| provider.code().to_string()),
    })
}
