// file: src/database/profiles.rs
use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::UserProfile;

const PROFILE_COLUMNS: &str = "uid, display_name, onboarding_complete, cluster, risk_score, updated_at";

/// Creates the initial record for a new account: onboarding pending, no cluster.
pub async fn create(pool: &SqlitePool, uid: &str, display_name: Option<&str>) -> Result<()> {
    let now = Utc::now();
    sqlx::query(
        "INSERT INTO profiles (uid, display_name, onboarding_complete, cluster, created_at, updated_at) VALUES (?, ?, 0, NULL, ?, ?)",
    )
    .bind(uid)
    .bind(display_name)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to create profile {}", uid))?;

    Ok(())
}

pub async fn get(pool: &SqlitePool, uid: &str) -> Result<Option<UserProfile>> {
    let profile = sqlx::query_as::<_, UserProfile>(&format!(
        "SELECT {} FROM profiles WHERE uid = ?",
        PROFILE_COLUMNS
    ))
    .bind(uid)
    .fetch_optional(pool)
    .await
    .context("Failed to fetch profile")?;

    Ok(profile)
}

/// Stores the predicted cluster and completes onboarding, keeping any other
/// profile fields.
pub async fn save_onboarding(pool: &SqlitePool, uid: &str, cluster: Option<i64>) -> Result<()> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO profiles (uid, onboarding_complete, cluster, created_at, updated_at)
        VALUES (?, 1, ?, ?, ?)
        ON CONFLICT(uid) DO UPDATE SET
            onboarding_complete = 1,
            cluster = excluded.cluster,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(uid)
    .bind(cluster)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to save onboarding for {}", uid))?;

    Ok(())
}

pub async fn update_risk_score(pool: &SqlitePool, uid: &str, risk_score: f64) -> Result<()> {
    let result = sqlx::query("UPDATE profiles SET risk_score = ?, updated_at = ? WHERE uid = ?")
        .bind(risk_score)
        .bind(Utc::now())
        .bind(uid)
        .execute(pool)
        .await
        .context("Failed to update risk score")?;

    if result.rows_affected() == 0 {
        return Err(anyhow::anyhow!("Profile not found: {}", uid));
    }

    Ok(())
}

pub async fn get_onboarded(pool: &SqlitePool) -> Result<Vec<UserProfile>> {
    let profiles = sqlx::query_as::<_, UserProfile>(&format!(
        "SELECT {} FROM profiles WHERE onboarding_complete = 1 ORDER BY uid ASC",
        PROFILE_COLUMNS
    ))
    .fetch_all(pool)
    .await
    .context("Failed to fetch onboarded profiles")?;

    Ok(profiles)
}
