use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Error: {0}")]
    Anyhow(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn backend_unavailable<S: Into<String>>(msg: S) -> Self {
        Self::BackendUnavailable(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Failures of the alert/profile backends. These are logged and
    /// swallowed by the orchestrator, never shown to the user.
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::BackendUnavailable(_) | Self::Anyhow(_) | Self::Io(_)
        )
    }

    pub fn is_pii_safe(&self) -> bool {
        match self {
            Self::Database(_) | Self::Anyhow(_) | Self::Io(_) | Self::Serialization(_) => false,
            Self::NotAuthenticated | Self::BackendUnavailable(_) | Self::Config(_) => true,
        }
    }

    pub fn to_safe_string(&self) -> String {
        if self.is_pii_safe() {
            self.to_string()
        } else {
            match self {
                Self::Database(_) => "Database operation failed".to_string(),
                Self::Anyhow(_) => "Operation failed".to_string(),
                Self::Io(_) => "I/O operation failed".to_string(),
                Self::Serialization(_) => "Malformed data".to_string(),
                _ => self.to_string(),
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_failures_are_classified() {
        assert!(AppError::backend_unavailable("offline").is_backend_failure());
        assert!(AppError::Database(sqlx::Error::PoolClosed).is_backend_failure());
        assert!(!AppError::NotAuthenticated.is_backend_failure());
        assert!(!AppError::config("empty list").is_backend_failure());
    }

    #[test]
    fn test_safe_string_hides_database_details() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.to_safe_string(), "Database operation failed");

        let err = AppError::config("catalog list for cluster 2 is empty");
        assert_eq!(err.to_safe_string(), "Configuration error: catalog list for cluster 2 is empty");

        assert_eq!(AppError::NotAuthenticated.to_safe_string(), "Not authenticated");
    }
}
