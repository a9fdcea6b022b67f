// ⚠️ Domain Errors - the two failure kinds every page can raise
// Both are recoverable: they surface as an inline notification and the
// offending input stays in place for correction.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HubError {
    /// Missing or out-of-range input, caught before any computation runs
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// Upload rejected by its MIME type / extension check
    #[error("{file_name}: unsupported file type (expected {expected})")]
    UnsupportedFileType { file_name: String, expected: String },
}

impl HubError {
    pub fn validation(field: &str, message: &str) -> Self {
        HubError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn unsupported(file_name: &str, expected: &str) -> Self {
        HubError::UnsupportedFileType {
            file_name: file_name.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Field that caused the failure, if the error is tied to a form field
    pub fn field(&self) -> Option<&str> {
        match self {
            HubError::Validation { field, .. } => Some(field),
            HubError::UnsupportedFileType { .. } => None,
        }
    }

    /// Short title used when the error is shown to the user
    pub fn title(&self) -> &'static str {
        match self {
            HubError::Validation { .. } => "Invalid Input",
            HubError::UnsupportedFileType { .. } => "Invalid File Type",
        }
    }

    /// Stable machine-readable code (used by the JSON API)
    pub fn code(&self) -> &'static str {
        match self {
            HubError::Validation { .. } => "VALIDATION_ERROR",
            HubError::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
        }
    }
}

pub type Result<T> = std::result::Result<T, HubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_and_field() {
        let err = HubError::validation("amount", "must be greater than 0");
        assert_eq!(err.to_string(), "amount: must be greater than 0");
        assert_eq!(err.field(), Some("amount"));
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_unsupported_file_type_has_no_field() {
        let err = HubError::unsupported("notes.txt", "application/pdf");
        assert_eq!(err.field(), None);
        assert_eq!(err.title(), "Invalid File Type");
        assert!(err.to_string().contains("notes.txt"));
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let err = HubError::validation("rate", "must be a number");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "validation");
        assert_eq!(json["field"], "rate");
    }
}
