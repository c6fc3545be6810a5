// CashCard Service - Error Types
//
// One error enum for the library. Binaries wrap it in anyhow.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CashCardError {
    /// JSON input missing `id`/`amount`, wrong types, or values that
    /// break the record invariants
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("cash card {0} not found")]
    NotFound(i64),

    /// Backing store failed (SQLite error, poisoned lock)
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for CashCardError {
    fn from(err: serde_json::Error) -> Self {
        CashCardError::MalformedInput(err.to_string())
    }
}

impl From<rusqlite::Error> for CashCardError {
    fn from(err: rusqlite::Error) -> Self {
        CashCardError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CashCardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CashCardError::NotFound(7).to_string(),
            "cash card 7 not found"
        );
        assert_eq!(
            CashCardError::MalformedInput("missing field `id`".to_string()).to_string(),
            "malformed input: missing field `id`"
        );
    }

    #[test]
    fn test_json_error_is_malformed_input() {
        let err: CashCardError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, CashCardError::MalformedInput(_)));
    }
}
