//! DTOs for decoding backend error replies.

use serde::Deserialize;
use serde_json::Value;

/// Error reply shape shared by every backend resource: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    error: Option<Value>,
}

impl ErrorBody {
    /// Usable message in `error`: a non-blank string or a non-zero number.
    pub(super) fn message(self) -> Option<String> {
        match self.error? {
            Value::String(text) if !text.trim().is_empty() => Some(text),
            Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
            _ => None,
        }
    }
}
