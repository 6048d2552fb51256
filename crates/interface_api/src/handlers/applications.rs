//! Application tracking handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use core_kernel::ApplicationId;
use domain_application::ApplicationStatus;

use crate::dto::application::{
    ApplicationResponse, CountResponse, CreateApplicationRequest, UpdateStatusRequest,
};
use crate::{error::ApiError, AppState};

// Unparseable ids cannot name a stored application.
fn parse_id(raw: &str) -> Result<ApplicationId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("Application {raw} not found")))
}

fn to_responses(applications: Vec<domain_application::Application>) -> Json<Vec<ApplicationResponse>> {
    Json(applications.into_iter().map(ApplicationResponse::from).collect())
}

pub async fn list_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    Ok(to_responses(state.applications.get_all_applications().await?))
}

pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let id = parse_id(&id)?;
    state
        .applications
        .get_application_by_id(id)
        .await?
        .map(|application| Json(application.into()))
        .ok_or_else(|| ApiError::NotFound(format!("Application {id} not found")))
}

pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    Ok(to_responses(state.applications.get_applications_by_user_id(&user_id).await?))
}

pub async fn count_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state.applications.get_application_count_by_user_id(&user_id).await?;
    Ok(Json(CountResponse { count }))
}

pub async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    let status: ApplicationStatus = status.parse()?;
    Ok(to_responses(state.applications.get_applications_by_status(status).await?))
}

pub async fn create_application(
    State(state): State<AppState>,
    payload: Result<Json<CreateApplicationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApplicationResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let (Some(user_id), Some(amount)) = (request.user_id, request.amount) else {
        return Err(ApiError::validation("userId and amount are required", Vec::new()));
    };

    let created = state.applications.create_application(&user_id, amount).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let id = parse_id(&id)?;
    let status: ApplicationStatus = request
        .status
        .as_deref()
        .unwrap_or_default()
        .parse()?;

    state
        .applications
        .update_application_status(id, status, request.notes)
        .await?
        .map(|application| Json(application.into()))
        .ok_or_else(|| ApiError::NotFound(format!("Application {id} not found")))
}

pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.applications.delete_application(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Application {id} not found")))
    }
}
