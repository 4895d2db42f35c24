//! Error response body returned with non-2xx statuses.

use serde::{Deserialize, Serialize};

/// The JSON body the network sends alongside an error status.
///
/// ```json
/// { "success": false, "error": "Invalid name", "hint": "Name must be 2-32 characters" }
/// ```
///
/// Only `error` is required for a body to count as an error envelope; a
/// body without it is reported by the client as a raw status failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Human-readable description of the problem.
    pub error: String,

    /// Optional remediation advice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_envelope_with_extra_fields() {
        let json = r#"{"success":false,"error":"Rate limit exceeded","hint":"2 per day"}"#;
        let e: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(e, ErrorResponse::new("Rate limit exceeded").with_hint("2 per day"));
    }

    #[test]
    fn body_without_error_field_is_not_an_envelope() {
        assert!(serde_json::from_str::<ErrorResponse>(r#"{"success":false}"#).is_err());
    }

    #[test]
    fn hint_omitted_when_absent() {
        let json = serde_json::to_string(&ErrorResponse::new("not found")).unwrap();
        assert_eq!(json, r#"{"error":"not found"}"#);
    }
}
