//! Outcome of one conversion pass

use serde::Serialize;

/// Result of converting a document: the Markdown, or the message of the
/// error that aborted the pass. Partial output is never returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ConversionPayload")]
pub enum ConversionResult {
    Success(String),
    Failure(String),
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionResult::Success(_))
    }

    pub fn markdown(&self) -> Option<&str> {
        match self {
            ConversionResult::Success(markdown) => Some(markdown),
            ConversionResult::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> Result<String, String> {
        self.into()
    }
}

impl<E: std::fmt::Display> From<Result<String, E>> for ConversionResult {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(markdown) => ConversionResult::Success(markdown),
            Err(err) => ConversionResult::Failure(err.to_string()),
        }
    }
}

impl From<ConversionResult> for Result<String, String> {
    fn from(result: ConversionResult) -> Self {
        match result {
            ConversionResult::Success(markdown) => Ok(markdown),
            ConversionResult::Failure(message) => Err(message),
        }
    }
}

/// Wire shape: `{ "success": true, "markdown": ".." }` or
/// `{ "success": false, "error": ".." }`
#[derive(Serialize)]
struct ConversionPayload {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<ConversionResult> for ConversionPayload {
    fn from(result: ConversionResult) -> Self {
        match result {
            ConversionResult::Success(markdown) => Self {
                success: true,
                markdown: Some(markdown),
                error: None,
            },
            ConversionResult::Failure(message) => Self {
                success: false,
                markdown: None,
                error: Some(message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok: Result<String, std::fmt::Error> = Ok("# T".to_string());
        assert_eq!(ConversionResult::from(ok), ConversionResult::Success("# T".to_string()));

        let err: Result<String, std::fmt::Error> = Err(std::fmt::Error);
        assert!(!ConversionResult::from(err).is_success());
    }

    #[test]
    fn test_payload_shape() {
        let success = serde_json::to_string(&ConversionResult::Success("hi".into())).unwrap();
        assert_eq!(success, r#"{"success":true,"markdown":"hi"}"#);

        let failure = serde_json::to_string(&ConversionResult::Failure("boom".into())).unwrap();
        assert_eq!(failure, r#"{"success":false,"error":"boom"}"#);
    }
}
