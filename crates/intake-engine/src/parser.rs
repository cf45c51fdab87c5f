// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tolerant extraction of a ticket suggestion from raw language-model text.
//!
//! Models wrap JSON in markdown fences, prepend chatter, or append a closing
//! remark. The parser strips all of that, reads whichever of the accepted keys
//! are present, and fills the rest with defaults. It never fails: unusable
//! output yields the default suggestion and a `warn` log line.

use intake_core::{PriorityScale, SuggestionResult};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Characters of the problem description used as a fallback subject.
pub const SUBJECT_FALLBACK_CHARS: usize = 60;

const FENCE: &str = "```";

/// Parse raw model output into a suggestion, applying defaults for anything missing.
pub fn parse_suggestion(raw: &str, problem: &str, scale: PriorityScale) -> SuggestionResult {
    match extract_object(raw) {
        Some(object) => from_object(&object, problem, scale),
        None => {
            warn!(
                response_len = raw.len(),
                "model response held no JSON object, using default suggestion"
            );
            default_suggestion(problem, scale)
        }
    }
}

/// The suggestion used when the model is unavailable or its output is unusable.
pub fn default_suggestion(problem: &str, scale: PriorityScale) -> SuggestionResult {
    SuggestionResult {
        subject: fallback_subject(problem),
        description: None,
        priority: scale.midpoint(),
    }
}

fn fallback_subject(problem: &str) -> String {
    problem.trim().chars().take(SUBJECT_FALLBACK_CHARS).collect()
}

/// Strips fences and surrounding prose, then parses the outermost `{...}` span.
fn extract_object(raw: &str) -> Option<Map<String, Value>> {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        // Language tag directly after the opening fence (```json).
        text = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }

    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        Ok(other) => {
            debug!(kind = json_kind(&other), "model JSON was not an object");
            None
        }
        Err(e) => {
            debug!(error = %e, "model JSON did not parse");
            None
        }
    }
}

fn from_object(object: &Map<String, Value>, problem: &str, scale: PriorityScale) -> SuggestionResult {
    let subject = first_text(object, &["subject", "title"]).unwrap_or_else(|| fallback_subject(problem));
    let description = first_text(object, &["description", "message"]);
    let priority = match object.get("priority").and_then(priority_value) {
        Some(p) => scale.clamp(p),
        None => {
            debug!("model JSON had no usable priority, using midpoint");
            scale.midpoint()
        }
    };

    SuggestionResult {
        subject,
        description,
        priority,
    }
}

/// First key in `keys` holding a non-empty string.
fn first_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| object.get(*k))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Integer, float (rounded) or numeric string.
fn priority_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.round() as i64)
            })
        }
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
