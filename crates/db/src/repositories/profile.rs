use crate::models::DbProfile;
use chrono::Utc;
use eyre::Result;
use slotbook_core::models::profile::{CreateProfileRequest, Profile};
use sqlx::{Pool, Postgres, types::Json};
use uuid::Uuid;

const PROFILE_COLUMNS: &str = r#"
    id, profile_name, slug, doctor_id, clinic_ids, clinic_work_period,
    appointments_per_slot, sub_slot_count, expires_at, cancel_period,
    slots, active, created_at, updated_at
"#;

pub async fn create_profile(
    pool: &Pool<Postgres>,
    doctor_id: &str,
    slug: &str,
    request: &CreateProfileRequest,
) -> Result<DbProfile> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating profile: id={}, doctor_id={}, name={}, slots={}",
        id, doctor_id, request.profile_name, request.slots.len()
    );

    let profile = sqlx::query_as::<_, DbProfile>(&format!(
        r#"
        INSERT INTO profiles (
            id, profile_name, slug, doctor_id, clinic_ids, clinic_work_period,
            appointments_per_slot, sub_slot_count, expires_at, cancel_period,
            slots, active, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&request.profile_name)
    .bind(slug)
    .bind(doctor_id)
    .bind(&request.clinic_ids)
    .bind(Json(request.clinic_work_period))
    .bind(i32::try_from(request.appointments_per_slot)?)
    .bind(i32::try_from(request.sub_slot_count)?)
    .bind(request.expires_at)
    .bind(request.cancel_period)
    .bind(Json(&request.slots))
    .bind(!request.clinic_ids.is_empty())
    .bind(now)
    .fetch_one(pool)
    .await?;

    tracing::debug!("Profile created successfully: id={}", id);
    Ok(profile)
}

pub async fn get_profile_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbProfile>> {
    tracing::debug!("Getting profile by id: {}", id);

    let profile = sqlx::query_as::<_, DbProfile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

pub async fn get_profile_by_name(
    pool: &Pool<Postgres>,
    doctor_id: &str,
    profile_name: &str,
) -> Result<Option<DbProfile>> {
    tracing::debug!("Getting profile by name: doctor_id={}, name={}", doctor_id, profile_name);

    let profile = sqlx::query_as::<_, DbProfile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE doctor_id = $1 AND profile_name = $2"
    ))
    .bind(doctor_id)
    .bind(profile_name)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

pub async fn get_profiles_by_doctor(pool: &Pool<Postgres>, doctor_id: &str) -> Result<Vec<DbProfile>> {
    tracing::debug!("Getting profiles for doctor: {}", doctor_id);

    let profiles = sqlx::query_as::<_, DbProfile>(&format!(
        r#"
        SELECT {PROFILE_COLUMNS}
        FROM profiles
        WHERE doctor_id = $1
        ORDER BY created_at ASC
        "#
    ))
    .bind(doctor_id)
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}

pub async fn get_all_profiles(pool: &Pool<Postgres>) -> Result<Vec<DbProfile>> {
    tracing::debug!("Getting all profiles");

    let profiles = sqlx::query_as::<_, DbProfile>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}

/// The most recently updated active profile of a doctor.
pub async fn get_active_profile_for_doctor(
    pool: &Pool<Postgres>,
    doctor_id: &str,
) -> Result<Option<DbProfile>> {
    tracing::debug!("Getting active profile for doctor: {}", doctor_id);

    let profile = sqlx::query_as::<_, DbProfile>(&format!(
        r#"
        SELECT {PROFILE_COLUMNS}
        FROM profiles
        WHERE doctor_id = $1 AND active
        ORDER BY updated_at DESC
        LIMIT 1
        "#
    ))
    .bind(doctor_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

/// Writes every mutable column of `profile` back to its row.
pub async fn update_profile(pool: &Pool<Postgres>, profile: &Profile) -> Result<DbProfile> {
    tracing::debug!("Updating profile: id={}", profile.id);

    let updated = sqlx::query_as::<_, DbProfile>(&format!(
        r#"
        UPDATE profiles
        SET profile_name = $2, slug = $3, clinic_ids = $4, clinic_work_period = $5,
            appointments_per_slot = $6, sub_slot_count = $7, cancel_period = $8,
            slots = $9, active = $10, updated_at = $11
        WHERE id = $1
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(profile.id)
    .bind(&profile.profile_name)
    .bind(&profile.slug)
    .bind(&profile.clinic_ids)
    .bind(Json(profile.clinic_work_period))
    .bind(i32::try_from(profile.appointments_per_slot)?)
    .bind(i32::try_from(profile.sub_slot_count)?)
    .bind(profile.cancel_period)
    .bind(Json(&profile.slots))
    .bind(profile.active)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(updated)
}

pub async fn delete_profile(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    tracing::debug!("Deleting profile: id={}", id);

    let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
