use clampsite_models::contact::RawContactSubmission;
use serde::Serialize;
use serde_json::Value;

/// Contact form body after the single decoding step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedSubmission {
    Decoded(RawContactSubmission),
    /// Not a JSON object, not even after unwrapping a JSON encoded string.
    Malformed,
}

impl DecodedSubmission {
    /// Accepts a JSON object, or a JSON string holding an encoded JSON
    /// object. The `Content-Type` header is not consulted.
    pub fn decode(body: &[u8]) -> Self {
        let value = match serde_json::from_slice(body) {
            Ok(Value::String(text)) => serde_json::from_str(&text),
            value => value,
        };

        match value {
            Ok(value @ Value::Object(_)) => {
                serde_json::from_value(value).map_or(Self::Malformed, Self::Decoded)
            }
            _ => Self::Malformed,
        }
    }

    /// Malformed bodies are validated like a submission without any field.
    pub fn into_raw(self) -> RawContactSubmission {
        match self {
            Self::Decoded(raw) => raw,
            Self::Malformed => RawContactSubmission::default(),
        }
    }
}

#[derive(Serialize)]
pub struct ApiContactResponse {
    pub ok: bool,
}
