use serde::de::DeserializeOwned;

/// The outcome of strictly deserializing a model response.
///
/// A malformed response is a value, not an error: whether it should degrade
/// the cycle or stop it is decided by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed<T> {
    Valid(T),
    Malformed { reason: String },
}

/// Deserialize a structured model response into `T`.
///
/// Tolerates a surrounding Markdown code fence; nothing else is forgiven.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> Parsed<T> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return Parsed::Malformed {
            reason: "empty response".to_string(),
        };
    }

    match serde_json::from_str(body) {
        Ok(value) => Parsed::Valid(value),
        Err(e) => Parsed::Malformed {
            reason: e.to_string(),
        },
    }
}

fn strip_code_fence(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
