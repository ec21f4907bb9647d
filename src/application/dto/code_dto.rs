//! Code assistance DTOs.
//!
//! Field names follow the service's camelCase JSON. Request fields are
//! forwarded exactly as given; nothing is defaulted or trimmed here.

use serde::{Deserialize, Serialize};

/// Body of a code generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodeRequest {
    /// What the code should do.
    pub prompt: String,
    /// Target language.
    pub language: String,
    /// Whether the generated code should be commented.
    pub include_comments: bool,
}

/// Body of a SQL generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSqlRequest {
    /// What the query should do.
    pub prompt: String,
    /// Database engine, e.g. `mysql`.
    pub database_type: String,
}

/// Body of a debug call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugCodeRequest {
    /// Code to inspect.
    pub code: String,
    /// Language of the code.
    pub language: String,
    /// Error output the code produced, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Body of an explain call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplainCodeRequest {
    /// Code to explain.
    pub code: String,
    /// Language of the code.
    pub language: String,
}

/// Generated source, also used for generated SQL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedCode {
    /// Generated text.
    pub code: String,
}

/// Diagnosis of broken code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DebugReport {
    /// Findings and fixed code, as text.
    pub result: String,
}

/// Explanation of a piece of code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodeExplanation {
    /// Explanation text.
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_request_wire_names() {
        let request = GenerateCodeRequest {
            prompt: "sum of evens".into(),
            language: "python".into(),
            include_comments: true,
        };

        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({ "prompt": "sum of evens", "language": "python", "includeComments": true })
        );
    }

    #[test]
    fn test_debug_request_keeps_empty_error_text() {
        let request = DebugCodeRequest {
            code: "x = 1/0".into(),
            language: "python".into(),
            error_message: Some(String::new()),
        };

        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({ "code": "x = 1/0", "language": "python", "errorMessage": "" })
        );
    }
}
