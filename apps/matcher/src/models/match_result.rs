use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Score response from the scoring service.
///
/// `score` must be numeric; the term lists are optional. Unknown fields are
/// not typed but survive in `raw`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlap: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gaps: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    /// The body exactly as the service sent it. Null unless built by `from_body`.
    #[serde(skip)]
    pub raw: Value,
}

impl MatchResult {
    /// Parses a response body, keeping the untouched JSON next to the typed fields.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        let raw: Value = serde_json::from_str(body)?;
        let mut result: MatchResult = serde_json::from_value(raw.clone())?;
        result.raw = raw;
        Ok(result)
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
}
