//! Error types for the currency converter.

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Missing required fields: sourceCurrency, targetCurrency, amount")]
    MissingFields,

    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Amount is too large to convert")]
    AmountOverflow,

    #[error("Exchange rate must be a positive number, got {0}")]
    InvalidRate(f64),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Entity not found")]
    NotFound,
}

/// Generic message for server faults with no more specific context.
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Application-level errors (for HTTP responses).
///
/// `Internal` carries two texts: `message` is safe to show a client,
/// `detail` is for server logs only.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Duplicate entry: {0}")]
    DuplicateKey(String),

    #[error("Invalid token")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
}

impl AppError {
    /// Builds an internal error with a client-facing message and a logged detail.
    pub fn internal(message: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        AppError::Internal {
            message: message.into(),
            detail: detail.to_string(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidRate(_) => AppError::internal(INTERNAL_MESSAGE, err),
            e => AppError::Validation(e.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(e) => AppError::DuplicateKey(e),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Database(e) => AppError::internal(INTERNAL_MESSAGE, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_map_to_validation() {
        let err: AppError = DomainError::MissingFields.into();
        assert!(matches!(err, AppError::Validation(ref m) if m.starts_with("Missing required fields")));

        let err: AppError = DomainError::InvalidAmount.into();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Amount must be a positive number"));
    }

    #[test]
    fn test_invalid_rate_is_internal() {
        let err: AppError = DomainError::InvalidRate(-1.0).into();
        assert!(matches!(err, AppError::Internal { ref message, .. } if message == INTERNAL_MESSAGE));
    }

    #[test]
    fn test_repo_errors_map() {
        assert!(matches!(
            AppError::from(RepoError::Duplicate("id".into())),
            AppError::DuplicateKey(_)
        ));
        assert!(matches!(
            AppError::from(RepoError::NotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(RepoError::Database("locked".into())),
            AppError::Internal { ref detail, .. } if detail == "locked"
        ));
    }
}
