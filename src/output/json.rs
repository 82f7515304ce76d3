//! JSON serialization of draw summaries.

use crate::result::DrawSummary;

/// Serialize a DrawSummary to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for DrawSummary).
pub fn to_json(summary: &DrawSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string(summary)
}

/// Serialize a DrawSummary to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for DrawSummary).
pub fn to_json_pretty(summary: &DrawSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}
