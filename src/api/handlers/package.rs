use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreatePackageRequest, UpdatePackageRequest};
use crate::api::dtos::responses::PackageResponse;
use crate::domain::models::package::{NewPackageParams, Package};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_packages(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let mut packages = state.package_repo.list().await?;
    packages.sort_by(|a, b| {
        a.tier_rank()
            .cmp(&b.tier_rank())
            .then(a.price_cents.cmp(&b.price_cents))
    });

    let response: Vec<PackageResponse> = packages.iter().map(PackageResponse::from).collect();
    Ok(Json(response))
}

pub async fn get_package(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let package = state.package_repo.find_by_slug(&slug).await?
        .ok_or_else(|| AppError::NotFound(format!("Package '{}' not found", slug)))?;

    Ok(Json(PackageResponse::from(&package)))
}

pub async fn create_package(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePackageRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.title.trim().is_empty() || payload.slug.trim().is_empty() || payload.description.trim().is_empty() {
        return Err(AppError::Validation("Missing required fields".into()));
    }
    if payload.duration_min <= 0 {
        return Err(AppError::Validation("duration_min must be positive".into()));
    }

    let package = Package::new(NewPackageParams {
        title: payload.title,
        slug: payload.slug,
        description: payload.description,
        features: payload.features.unwrap_or_default(),
        price_cents: payload.price_cents,
        duration_min: payload.duration_min,
        tier: payload.tier,
        image_url: payload.image_url,
    });

    let created = state.package_repo.create(&package).await?;
    info!("Package created: {}", created.slug);
    Ok(Json(created))
}

pub async fn update_package(
    State(state): State<Arc<AppState>>,
    Path(package_id): Path<String>,
    Json(payload): Json<UpdatePackageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut package = state.package_repo.find_by_id(&package_id).await?
        .ok_or(AppError::NotFound("Package not found".into()))?;

    if let Some(title) = payload.title { package.title = title; }
    if let Some(slug) = payload.slug { package.slug = slug; }
    if let Some(description) = payload.description { package.description = description; }
    if let Some(features) = payload.features {
        package.features_json = serde_json::to_string(&features).map_err(|_| AppError::Internal)?;
    }
    if let Some(price_cents) = payload.price_cents { package.price_cents = price_cents; }
    if let Some(duration_min) = payload.duration_min {
        if duration_min <= 0 {
            return Err(AppError::Validation("duration_min must be positive".into()));
        }
        // Duration changes apply to future bookings only; booked end times
        // are already persisted.
        package.duration_min = duration_min;
    }
    if let Some(tier) = payload.tier { package.tier = Some(tier); }
    if let Some(image_url) = payload.image_url { package.image_url = Some(image_url); }
    package.updated_at = Utc::now();

    let updated = state.package_repo.update(&package).await?;
    info!("Package updated: {}", updated.slug);
    Ok(Json(updated))
}

pub async fn delete_package(
    State(state): State<Arc<AppState>>,
    Path(package_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.package_repo.delete(&package_id).await?;
    info!("Package deleted: {}", package_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
