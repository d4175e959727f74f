// file: src/database/alerts.rs
use std::time::Instant;

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::models::{AlertKind, PersistedAlert};
use crate::utils::logging::log_database_operation;

const ALERT_COLUMNS: &str = "id, user_id, text, kind, viewed, created_at";

pub async fn insert(pool: &SqlitePool, alert: &PersistedAlert) -> Result<()> {
    sqlx::query(
        "INSERT INTO recommendations (id, user_id, text, kind, viewed, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&alert.id)
    .bind(&alert.user_id)
    .bind(&alert.text)
    .bind(&alert.kind)
    .bind(alert.viewed)
    .bind(alert.created_at)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to insert alert {}", alert.id))?;

    Ok(())
}

/// Pending alerts, oldest first. Ties on `created_at` keep insertion order.
pub async fn get_unviewed(pool: &SqlitePool, user_id: &str) -> Result<Vec<PersistedAlert>> {
    let started = Instant::now();
    let alerts = sqlx::query_as::<_, PersistedAlert>(&format!(
        "SELECT {} FROM recommendations WHERE user_id = ? AND viewed = 0 ORDER BY created_at ASC, rowid ASC",
        ALERT_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
    .context("Failed to fetch unviewed alerts")?;

    log_database_operation("select unviewed", "recommendations", started.elapsed().as_millis() as u64);
    Ok(alerts)
}

pub async fn get_all(pool: &SqlitePool, user_id: &str) -> Result<Vec<PersistedAlert>> {
    let alerts = sqlx::query_as::<_, PersistedAlert>(&format!(
        "SELECT {} FROM recommendations WHERE user_id = ? ORDER BY created_at ASC, rowid ASC",
        ALERT_COLUMNS
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
    .context("Failed to fetch alerts")?;

    Ok(alerts)
}

pub async fn has_unviewed_of_kind(pool: &SqlitePool, user_id: &str, kind: AlertKind) -> Result<bool> {
    let pending: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM recommendations WHERE user_id = ? AND kind = ? AND viewed = 0",
    )
    .bind(user_id)
    .bind(kind.as_str())
    .fetch_one(pool)
    .await
    .context("Failed to count pending alerts")?;

    Ok(pending > 0)
}

pub async fn mark_viewed(pool: &SqlitePool, user_id: &str, alert_id: &str) -> Result<()> {
    // Updating 0 rows (unknown or foreign alert) is not an error.
    sqlx::query("UPDATE recommendations SET viewed = 1 WHERE id = ? AND user_id = ?")
        .bind(alert_id)
        .bind(user_id)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to mark alert {} as viewed", alert_id))?;

    Ok(())
}
