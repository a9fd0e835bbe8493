/// Error types for card-ledger
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for card-ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// I/O errors (reading or rewriting the backing file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding/decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// User-supplied input that can't be applied (bad count, empty name)
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Backing file header doesn't carry the columns we need
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// A data row in the backing file couldn't be parsed
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for card-ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

impl LedgerError {
    /// True for errors caused by what the user typed.
    ///
    /// These are recovered at the shell boundary; nothing was changed.
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }

    /// Convert LedgerError to a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            LedgerError::Io(e) => {
                format!("Could not read or write the card list. Check permissions. Details: {}", e)
            }
            LedgerError::Csv(e) => {
                format!("The card list file could not be processed. Details: {}", e)
            }
            LedgerError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            LedgerError::Validation(msg) => msg.clone(),
            LedgerError::MalformedHeader(msg) => {
                format!("The card list file has an unexpected header: {}", msg)
            }
            LedgerError::MalformedRow { line, reason } => {
                format!("The card list file is broken at line {}: {}", line, reason)
            }
            LedgerError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = LedgerError::Validation("Please enter a valid count.".to_string());
        assert_eq!(err.user_message(), "Please enter a valid count.");

        let err = LedgerError::MalformedRow {
            line: 4,
            reason: "count is not an integer".to_string(),
        };
        assert!(err.user_message().contains("line 4"));
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::MalformedHeader("missing column 'Count'".to_string());
        let display = format!("{}", err);
        assert!(display.contains("Malformed header"));
    }

    #[test]
    fn test_is_validation() {
        assert!(LedgerError::Validation("x".to_string()).is_validation());

        let io = LedgerError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(!io.is_validation());
    }
}
