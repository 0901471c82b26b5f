//! The uniform response envelope returned by every data tool.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

/// `{success, data|error}` wrapper.
///
/// A successful envelope carries `data` and no `error`; a failed one carries
/// `error` and no `data`. The absent key is omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Wrap a serializable payload
    pub fn ok<T: Serialize>(data: T) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(e) => Self::error(format!("Failed to serialize response: {}", e)),
        }
    }

    /// Build a failed envelope
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Convert any result into an envelope, stringifying the error
    pub fn from_result<T: Serialize, E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::error(e.to_string()),
        }
    }

    /// Render as a JSON value for the MCP layer
    pub fn into_value(self) -> Value {
        // Envelope only holds JSON-native fields.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_omits_error() {
        let value = Envelope::ok(json!({"total": 3})).into_value();
        assert_eq!(value, json!({"success": true, "data": {"total": 3}}));
    }

    #[test]
    fn test_error_omits_data() {
        let value = Envelope::error("boom").into_value();
        assert_eq!(value, json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn test_from_result() {
        let ok: Result<u32, String> = Ok(7);
        assert_eq!(Envelope::from_result(ok).data, Some(json!(7)));

        let err: Result<u32, String> = Err("nope".to_string());
        let envelope = Envelope::from_result(err);
        assert!(!envelope.success);
        assert_eq!(envelope.error.as_deref(), Some("nope"));
    }
}
