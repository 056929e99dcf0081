//! Prompt construction and reply parsing.

use crate::error::{Result, SegmentError};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Write;
use straits_extract::CanonicalRecord;

/// First `max_chars` characters of a summary, on one line.
pub fn summary_snippet(summary: &str, max_chars: usize) -> String {
    summary
        .chars()
        .take(max_chars)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

/// Prompt asking for the business segments of every record in `batch`.
pub fn build_prompt(batch: &[&CanonicalRecord], summary_chars: usize) -> String {
    let mut input = String::new();
    for record in batch {
        let _ = write!(
            input,
            "Code: {}\nSummary: {}...\n---\n",
            record.code,
            summary_snippet(&record.business_summary, summary_chars)
        );
    }

    format!(
        "You are a financial analyst. Below are business summaries for several companies.\n\
         Identify the main business segments of EACH company from its summary.\n\
         \n\
         # Input Data\n\
         {input}\n\
         # Output Rules\n\
         - Return ONLY a valid JSON object.\n\
         - Keys are the stock codes exactly as given.\n\
         - Values are the business segments as one concise, comma separated string.\n\
         - If no segments are stated, describe the main business areas in 3-4 words.\n\
         - Example: {{\"4863.KL\": \"Telecommunication Services, Digital Solutions\", \
         \"0021.KL\": \"Payment Services, Solution Services\"}}\n"
    )
}

/// Remove a Markdown code fence around the reply, if any.
///
/// A ```` ```json ```` fence takes precedence over a bare ```` ``` ```` one.
/// Text without a fence is returned trimmed.
pub fn strip_fence(reply: &str) -> &str {
    let reply = reply.trim();
    let inner = if let Some((_, rest)) = reply.split_once("```json") {
        rest
    } else if let Some((_, rest)) = reply.split_once("```") {
        rest
    } else {
        return reply;
    };
    inner.split("```").next().unwrap_or(inner).trim()
}

/// Parse a reply into `code -> segments`.
///
/// String values are kept as-is, arrays of strings are joined with `", "`.
/// Other value types are dropped.
///
/// # Errors
///
/// Returns an error if the reply is not a JSON object.
pub fn parse_segment_response(reply: &str) -> Result<HashMap<String, String>> {
    let value: Value = serde_json::from_str(strip_fence(reply))?;
    let Value::Object(entries) = value else {
        return Err(SegmentError::InvalidResponse(
            "expected a JSON object keyed by code".to_string(),
        ));
    };

    Ok(entries
        .into_iter()
        .filter_map(|(code, value)| {
            let segments = match value {
                Value::String(s) => s,
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
                _ => return None,
            };
            Some((code, segments))
        })
        .collect())
}
