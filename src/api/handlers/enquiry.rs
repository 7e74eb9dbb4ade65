use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::CreateEnquiryRequest;
use crate::domain::models::enquiry::{Enquiry, NewEnquiryParams};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_enquiry(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEnquiryRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() || payload.message.trim().is_empty() {
        return Err(AppError::Validation("Missing required fields".into()));
    }

    let enquiry = Enquiry::new(NewEnquiryParams {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
        message: payload.message,
        treatment: payload.treatment,
        source: payload.source.unwrap_or_else(|| "unknown".to_string()),
    });

    state.enquiry_repo.create(&enquiry).await?;
    info!("Enquiry received from {}", enquiry.email);
    Ok(Json(serde_json::json!({"ok": true})))
}

pub async fn list_enquiries(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let enquiries = state.enquiry_repo.list().await?;
    Ok(Json(enquiries))
}
