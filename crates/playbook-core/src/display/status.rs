//! Status and confirmation message types for operation feedback.

use std::fmt;

use crate::error::PlaybookError;

/// Wrapper type for displaying operation confirmation messages.
///
/// Failures may carry a hint pointing the user somewhere useful, such as
/// the move list after a lookup by an unknown id.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
    pub hint: Option<String>,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
            hint: None,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
            hint: None,
        }
    }

    /// Attach a follow-up hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Failure status for an error, with `not_found_hint` attached when the
    /// error means the addressed resource does not exist.
    pub fn from_error(error: &PlaybookError, not_found_hint: &str) -> Self {
        let status = Self::failure(error.to_string());
        if error.is_not_found() {
            status.with_hint(not_found_hint)
        } else {
            status
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            if self.success { "Success:" } else { "Error:" },
            self.message
        )?;
        if let Some(hint) = &self.hint {
            writeln!(f, "Hint: {hint}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Move deleted".to_string());
        assert_eq!(success.to_string(), "Success: Move deleted\n");

        let failure = OperationStatus::failure("Operation failed".to_string());
        assert!(failure.to_string().starts_with("Error:"));
    }

    #[test]
    fn test_not_found_error_gets_hint() {
        let status = OperationStatus::from_error(
            &PlaybookError::MoveNotFound { id: 9 },
            "run `pb move list` to see your moves",
        );
        assert_eq!(
            status.to_string(),
            "Error: Move with ID 9 not found\nHint: run `pb move list` to see your moves\n"
        );

        let status = OperationStatus::from_error(
            &PlaybookError::MoveCompleted { id: 9 },
            "run `pb move list` to see your moves",
        );
        assert!(status.hint.is_none());
    }
}
