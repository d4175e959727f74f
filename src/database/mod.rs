// file: src/database/mod.rs

use anyhow::{Context, Result};
use log::info;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, Row, Sqlite};

use crate::models::{AlertKind, PersistedAlert, UserProfile};

// Declare submodules
pub mod alerts;
pub mod profiles;

#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn connect(db_url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        let db_exists = Sqlite::database_exists(db_url)
            .await
            .context("Failed to check if database exists")?;
        if !db_exists {
            info!("Creating database");
            Sqlite::create_database(db_url)
                .await
                .context("Failed to create database")?;
        }

        let pool = SqlitePool::connect(db_url)
            .await
            .context("Failed to connect to database")?;

        let db = Database { pool };
        db.init_schema().await?;

        info!("Database initialized successfully");

        Ok(db)
    }

    /// Applies the schema and column migrations. Safe to run repeatedly.
    pub async fn init_schema(&self) -> Result<()> {
        run_schema(&self.pool).await.context("Failed to run database schema")?;
        ensure_migrations(&self.pool).await.context("Failed to ensure migrations")?;
        Ok(())
    }

    // --- Alert Delegates ---

    pub async fn add_alert(&self, alert: &PersistedAlert) -> Result<()> {
        alerts::insert(&self.pool, alert).await
    }

    pub async fn get_unviewed_alerts(&self, user_id: &str) -> Result<Vec<PersistedAlert>> {
        alerts::get_unviewed(&self.pool, user_id).await
    }

    pub async fn get_alerts(&self, user_id: &str) -> Result<Vec<PersistedAlert>> {
        alerts::get_all(&self.pool, user_id).await
    }

    pub async fn has_unviewed_alert(&self, user_id: &str, kind: AlertKind) -> Result<bool> {
        alerts::has_unviewed_of_kind(&self.pool, user_id, kind).await
    }

    pub async fn mark_alert_viewed(&self, user_id: &str, alert_id: &str) -> Result<()> {
        alerts::mark_viewed(&self.pool, user_id, alert_id).await
    }

    // --- Profile Delegates ---

    pub async fn create_profile(&self, uid: &str, display_name: Option<&str>) -> Result<()> {
        profiles::create(&self.pool, uid, display_name).await
    }

    pub async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>> {
        profiles::get(&self.pool, uid).await
    }

    pub async fn save_onboarding(&self, uid: &str, cluster: Option<i64>) -> Result<()> {
        profiles::save_onboarding(&self.pool, uid, cluster).await
    }

    pub async fn update_risk_score(&self, uid: &str, risk_score: f64) -> Result<()> {
        profiles::update_risk_score(&self.pool, uid, risk_score).await
    }

    pub async fn get_onboarded_profiles(&self) -> Result<Vec<UserProfile>> {
        profiles::get_onboarded(&self.pool).await
    }
}

pub(crate) async fn run_schema(pool: &SqlitePool) -> Result<()> {
    let schema = include_str!("schema.sql");

    let mut current_statement = String::new();
    let mut in_trigger = false;

    for line in schema.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") || trimmed.is_empty() {
            continue;
        }

        if trimmed.to_uppercase().starts_with("CREATE TRIGGER") {
            in_trigger = true;
        }

        current_statement.push_str(line);
        current_statement.push('\n');

        if trimmed.ends_with(';') {
            if in_trigger {
                if trimmed.to_uppercase() == "END;" {
                    in_trigger = false;
                    sqlx::query(&current_statement).execute(pool).await?;
                    current_statement.clear();
                }
            } else {
                sqlx::query(&current_statement).execute(pool).await?;
                current_statement.clear();
            }
        }
    }
    Ok(())
}

async fn table_columns(pool: &SqlitePool, table: &str) -> Result<Vec<String>> {
    let rows = sqlx::query(&format!("PRAGMA table_info({})", table))
        .fetch_all(pool)
        .await
        .context("Failed to fetch table info")?;

    Ok(rows.iter().map(|row| row.get::<String, _>("name")).collect())
}

async fn ensure_migrations(pool: &SqlitePool) -> Result<()> {
    let columns = table_columns(pool, "recommendations").await?;

    if !columns.contains(&"kind".to_string()) {
        info!("Migrating: Adding kind column to recommendations table");
        sqlx::query("ALTER TABLE recommendations ADD COLUMN kind TEXT NOT NULL DEFAULT 'risk_alert'")
            .execute(pool)
            .await
            .context("Failed to add kind column")?;
    }

    let columns = table_columns(pool, "profiles").await?;

    if !columns.contains(&"risk_score".to_string()) {
        info!("Migrating: Adding risk_score column to profiles table");
        sqlx::query("ALTER TABLE profiles ADD COLUMN risk_score REAL NOT NULL DEFAULT 0.3")
            .execute(pool)
            .await
            .context("Failed to add risk_score column")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    async fn create_test_database() -> Database {
        let temp_file = NamedTempFile::new().unwrap();
        let (_, path) = temp_file.keep().unwrap();
        let db_path = format!("sqlite:{}", path.to_str().unwrap());

        let pool = SqlitePool::connect(&db_path).await.unwrap();
        let db = Database { pool };
        db.init_schema().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_connect_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = format!("sqlite:{}", dir.path().join("agenda.db").to_str().unwrap());

        let db = Database::connect(&db_path).await.unwrap();
        assert!(!db.pool.is_closed());
        assert!(dir.path().join("agenda.db").exists());
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let db = create_test_database().await;
        tokio_test::assert_ok!(db.init_schema().await);
        tokio_test::assert_ok!(db.init_schema().await);
    }

    #[tokio::test]
    async fn test_migration_adds_missing_columns() {
        let temp_file = NamedTempFile::new().unwrap();
        let (_, path) = temp_file.keep().unwrap();
        let pool = SqlitePool::connect(&format!("sqlite:{}", path.to_str().unwrap()))
            .await
            .unwrap();

        // Tables as created before kind/risk_score existed
        sqlx::query(
            "CREATE TABLE recommendations (id TEXT PRIMARY KEY, user_id TEXT NOT NULL, text TEXT NOT NULL, viewed BOOLEAN NOT NULL DEFAULT 0, created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "CREATE TABLE profiles (uid TEXT PRIMARY KEY, display_name TEXT, onboarding_complete BOOLEAN NOT NULL DEFAULT 0, cluster INTEGER, created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP, updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let db = Database { pool };
        db.init_schema().await.unwrap();

        assert!(table_columns(&db.pool, "recommendations").await.unwrap().contains(&"kind".to_string()));
        assert!(table_columns(&db.pool, "profiles").await.unwrap().contains(&"risk_score".to_string()));
    }

    #[tokio::test]
    async fn test_alert_roundtrip_through_delegates() {
        let db = create_test_database().await;
        let alert = PersistedAlert::new("u1", "Risk!", AlertKind::RiskAlert);
        db.add_alert(&alert).await.unwrap();

        let pending = db.get_unviewed_alerts("u1").await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, alert.id);
        assert_eq!(pending[0].kind().unwrap(), AlertKind::RiskAlert);
        assert!(db.has_unviewed_alert("u1", AlertKind::RiskAlert).await.unwrap());

        db.mark_alert_viewed("u1", &alert.id).await.unwrap();
        assert!(db.get_unviewed_alerts("u1").await.unwrap().is_empty());
        assert!(!db.has_unviewed_alert("u1", AlertKind::RiskAlert).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_unviewed_alerts_empty() {
        let db = create_test_database().await;
        let alerts = db.get_unviewed_alerts("u1").await.unwrap();
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn test_profile_delegates() {
        let db = create_test_database().await;
        db.create_profile("u1", Some("Ana")).await.unwrap();
        db.save_onboarding("u1", Some(3)).await.unwrap();
        db.update_risk_score("u1", 0.9).await.unwrap();

        let profile = db.get_profile("u1").await.unwrap().unwrap();
        assert_eq!(profile.cluster, Some(3));
        assert_eq!(profile.risk_score, 0.9);
        assert_eq!(db.get_onboarded_profiles().await.unwrap().len(), 1);
    }
}
