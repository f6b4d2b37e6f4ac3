use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create profiles table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            profile_name VARCHAR(255) NOT NULL,
            slug VARCHAR(255) NOT NULL,
            doctor_id VARCHAR(255) NOT NULL,
            clinic_ids TEXT[] NOT NULL DEFAULT '{}',
            clinic_work_period JSONB NOT NULL,
            appointments_per_slot INTEGER NOT NULL CHECK (appointments_per_slot >= 1),
            sub_slot_count INTEGER NOT NULL CHECK (sub_slot_count >= 1),
            expires_at TIMESTAMP WITH TIME ZONE NOT NULL,
            cancel_period INTEGER NOT NULL,
            slots JSONB NOT NULL DEFAULT '[]',
            active BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT unique_profile_name_per_doctor UNIQUE (doctor_id, profile_name)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            profile_id UUID NOT NULL REFERENCES profiles(id),
            doctor_id VARCHAR(255) NOT NULL,
            clinic_id VARCHAR(255) NOT NULL,
            patient_id VARCHAR(255) NOT NULL,
            appointment_start TIMESTAMP WITH TIME ZONE NOT NULL,
            appointment_end TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'confirmed', 'cancelled')),
            reason TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_appointment_range CHECK (appointment_end > appointment_start)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_profiles_doctor_id ON profiles(doctor_id)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_doctor_start ON appointments(doctor_id, appointment_start)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_patient_start ON appointments(patient_id, appointment_start)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_profile_id ON appointments(profile_id)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
