//! Turn a model reply into a well-formed [`AnalysisResult`].
//!
//! Two steps:
//!
//! 1. [`parse_reply`] strips the wrapping models like to add (BOM, Markdown
//!    code fences, chatter around the object) and parses the JSON.
//! 2. [`normalize_reply`] coerces the parsed object field by field into the
//!    typed result, substituting defaults for anything missing or mistyped.

use std::collections::HashSet;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::analysis::{AnalysisResult, Clause, Issue, ScoreLabel};
use crate::config::ScorePolicy;
use crate::rubric::{clamp_score, label_for_score};

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("model reply is empty")]
    Empty,
    #[error("model reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("model reply is a JSON {0}, expected an object")]
    NotAnObject(&'static str),
}

/// Parse the raw reply text into JSON.
///
/// The text is tried as-is first, then with a Markdown fence removed, then as
/// the span between the first `{` and the last `}`. The error from the
/// untouched text is reported when nothing parses.
pub fn parse_reply(raw: &str) -> Result<Value, NormalizeError> {
    let text = raw.trim().trim_start_matches('\u{feff}').trim();
    if text.is_empty() {
        return Err(NormalizeError::Empty);
    }

    let first_err = match serde_json::from_str::<Value>(text) {
        Ok(v) => return Ok(v),
        Err(e) => e,
    };

    if let Some(inner) = strip_code_fence(text)
        && let Ok(v) = serde_json::from_str::<Value>(inner)
    {
        debug!("parsed model reply after removing code fence");
        return Ok(v);
    }

    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}'))
        && start < end
        && let Ok(v) = serde_json::from_str::<Value>(&text[start..=end])
    {
        debug!("parsed model reply from embedded object");
        return Ok(v);
    }

    Err(NormalizeError::InvalidJson(first_err))
}

/// Body of a ```` ```json ```` or bare ```` ``` ```` fenced block.
fn strip_code_fence(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    // Skip the info string ("json", "JSON", ...) up to the end of the line.
    let body_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

/// Coerce a parsed reply into an [`AnalysisResult`].
pub fn normalize_reply(reply: &Value, policy: ScorePolicy) -> Result<AnalysisResult, NormalizeError> {
    let obj = reply
        .as_object()
        .ok_or_else(|| NormalizeError::NotAnObject(json_kind(reply)))?;

    let score = obj.get("score").and_then(Value::as_f64).map(clamp_score).unwrap_or(0);

    let score_label = match policy {
        ScorePolicy::Trust => obj
            .get("scoreLabel")
            .and_then(Value::as_str)
            .map(ScoreLabel::parse_lenient)
            .unwrap_or(ScoreLabel::Unknown),
        ScorePolicy::Enforce => label_for_score(score),
    };

    let summary = string_field(obj, "summary");

    let highlights = array_field(obj, "highlights")
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();

    let issues = normalize_issues(array_field(obj, "issues").filter_map(Value::as_object));

    let clauses = array_field(obj, "clauses")
        .filter_map(Value::as_object)
        .map(|clause| Clause {
            title: string_field(clause, "title"),
            text: string_field(clause, "text"),
        })
        .collect();

    Ok(AnalysisResult {
        score,
        score_label,
        summary,
        highlights,
        issues,
        clauses,
    })
}

/// Build issues with ids that are unique within the list.
///
/// The first issue to claim a valid id keeps it. Issues with a missing,
/// invalid, or repeated id get the smallest positive id nobody has claimed,
/// so a reply without ids is numbered 1, 2, 3, ...
fn normalize_issues<'a, I>(items: I) -> Vec<Issue>
where
    I: Iterator<Item = &'a Map<String, Value>>,
{
    let items: Vec<_> = items.collect();
    let claimed: HashSet<u64> = items
        .iter()
        .filter_map(|issue| issue.get("id").and_then(as_id))
        .collect();

    let mut used = HashSet::with_capacity(items.len());
    let mut next_fallback = 1u64;
    items
        .into_iter()
        .map(|issue| {
            let id = match issue.get("id").and_then(as_id) {
                Some(id) if used.insert(id) => id,
                _ => {
                    while claimed.contains(&next_fallback) || used.contains(&next_fallback) {
                        next_fallback += 1;
                    }
                    used.insert(next_fallback);
                    next_fallback
                }
            };
            Issue {
                id,
                title: string_field(issue, "title"),
                description: string_field(issue, "description"),
            }
        })
        .collect()
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn array_field<'a>(obj: &'a Map<String, Value>, key: &str) -> impl Iterator<Item = &'a Value> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| items.as_slice())
        .unwrap_or_default()
        .iter()
}

/// Non-negative integral ids only; `2.0` counts, `2.5` does not.
fn as_id(v: &Value) -> Option<u64> {
    v.as_u64().or_else(|| {
        v.as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
