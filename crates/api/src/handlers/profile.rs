use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use slotbook_core::{
    errors::{BookingError, BookingResult},
    models::profile::{
        ClinicAssignmentRequest, ClinicAssignmentResponse, CreateProfileRequest,
        DeleteProfileResponse, Profile, UpdateProfileRequest,
    },
    validation::{slugify, validate_create_profile, validate_profile},
};
use slotbook_db::models::DbProfile;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_profile(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<String>,
    Json(payload): Json<CreateProfileRequest>,
) -> Result<(StatusCode, Json<Profile>), AppError> {
    // Validate the template before touching the database
    validate_create_profile(&payload)?;

    // Profile names are unique per doctor
    let existing = slotbook_db::repositories::profile::get_profile_by_name(
        &state.db_pool,
        &doctor_id,
        &payload.profile_name,
    )
    .await
    .map_err(BookingError::Database)?;
    if existing.is_some() {
        return Err(AppError(BookingError::Validation(
            "profile already exists".to_string(),
        )));
    }

    let slug = slugify(&payload.profile_name);
    let db_profile = slotbook_db::repositories::profile::create_profile(
        &state.db_pool,
        &doctor_id,
        &slug,
        &payload,
    )
    .await
    .map_err(BookingError::Database)?;

    Ok((StatusCode::CREATED, Json(Profile::try_from(db_profile)?)))
}

#[axum::debug_handler]
pub async fn list_doctor_profiles(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Vec<Profile>>, AppError> {
    let rows = slotbook_db::repositories::profile::get_profiles_by_doctor(&state.db_pool, &doctor_id)
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(doctor_profiles(&doctor_id, rows)?))
}

/// Converts a doctor's profile rows, treating an empty list as not found.
pub fn doctor_profiles(doctor_id: &str, rows: Vec<DbProfile>) -> BookingResult<Vec<Profile>> {
    if rows.is_empty() {
        return Err(BookingError::NotFound(format!(
            "There are no profiles associated with doctor {}",
            doctor_id
        )));
    }

    Ok(rows
        .into_iter()
        .map(Profile::try_from)
        .collect::<eyre::Result<Vec<_>>>()?)
}

#[axum::debug_handler]
pub async fn list_profiles(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Profile>>, AppError> {
    let rows = slotbook_db::repositories::profile::get_all_profiles(&state.db_pool)
        .await
        .map_err(BookingError::Database)?;

    let profiles = rows
        .into_iter()
        .map(Profile::try_from)
        .collect::<eyre::Result<Vec<_>>>()?;
    Ok(Json(profiles))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<Arc<ApiState>>,
    Path((doctor_id, profile_id)): Path<(String, Uuid)>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    let mut profile = load_owned_profile(&state.db_pool, &doctor_id, profile_id).await?;

    // Renaming must not collide with another profile of the same doctor
    if let Some(name) = payload.profile_name.as_deref().filter(|name| *name != profile.profile_name) {
        let existing = slotbook_db::repositories::profile::get_profile_by_name(
            &state.db_pool,
            &doctor_id,
            name,
        )
        .await
        .map_err(BookingError::Database)?;
        if existing.is_some() {
            return Err(AppError(BookingError::Validation(
                "profile already exists".to_string(),
            )));
        }
    }

    profile.apply_update(payload);
    profile.slug = slugify(&profile.profile_name);
    validate_profile(&profile)?;

    let db_profile = slotbook_db::repositories::profile::update_profile(&state.db_pool, &profile)
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(Profile::try_from(db_profile)?))
}

#[axum::debug_handler]
pub async fn delete_profile(
    State(state): State<Arc<ApiState>>,
    Path((doctor_id, profile_id)): Path<(String, Uuid)>,
) -> Result<Json<DeleteProfileResponse>, AppError> {
    let profile = load_owned_profile(&state.db_pool, &doctor_id, profile_id).await?;

    if !profile.clinic_ids.is_empty() {
        return Err(AppError(BookingError::Validation(format!(
            "profile is being used by clinics: {}",
            profile.clinic_ids.join(", ")
        ))));
    }

    slotbook_db::repositories::profile::delete_profile(&state.db_pool, profile_id)
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(DeleteProfileResponse {
        message: format!("{} has been deleted successfully", profile.profile_name),
    }))
}

#[axum::debug_handler]
pub async fn assign_profile(
    State(state): State<Arc<ApiState>>,
    Path((doctor_id, profile_id)): Path<(String, Uuid)>,
    Json(payload): Json<ClinicAssignmentRequest>,
) -> Result<Json<ClinicAssignmentResponse>, AppError> {
    let mut profile = load_owned_profile(&state.db_pool, &doctor_id, profile_id).await?;

    let added = profile.assign_clinics(&payload.clinic_ids)?;
    tracing::debug!("Assigning profile {} to clinics {:?}", profile_id, added);

    save_assignment(&state.db_pool, &profile).await
}

#[axum::debug_handler]
pub async fn unassign_profile(
    State(state): State<Arc<ApiState>>,
    Path((doctor_id, profile_id)): Path<(String, Uuid)>,
    Json(payload): Json<ClinicAssignmentRequest>,
) -> Result<Json<ClinicAssignmentResponse>, AppError> {
    let mut profile = load_owned_profile(&state.db_pool, &doctor_id, profile_id).await?;

    profile.unassign_clinics(&payload.clinic_ids)?;

    save_assignment(&state.db_pool, &profile).await
}

async fn save_assignment(
    pool: &PgPool,
    profile: &Profile,
) -> Result<Json<ClinicAssignmentResponse>, AppError> {
    let db_profile = slotbook_db::repositories::profile::update_profile(pool, profile)
        .await
        .map_err(BookingError::Database)?;

    Ok(Json(ClinicAssignmentResponse {
        profile_id: db_profile.id,
        clinic_ids: db_profile.clinic_ids,
        active: db_profile.active,
    }))
}

/// Loads a profile and checks that `doctor_id` owns it.
async fn load_owned_profile(pool: &PgPool, doctor_id: &str, profile_id: Uuid) -> BookingResult<Profile> {
    let row = slotbook_db::repositories::profile::get_profile_by_id(pool, profile_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Profile with ID {} not found", profile_id)))?;

    if row.doctor_id != doctor_id {
        return Err(BookingError::Authorization(
            "you don't have permission to access this profile".to_string(),
        ));
    }

    Ok(Profile::try_from(row)?)
}
