//! Parses the model's free-text reply into a list of job ids.
//!
//! Fallback chain: fence-strip → brace-bounded JSON → `matches` schema check →
//! id scan over the whole raw reply. Every input yields some (possibly empty) list.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::llm_client::extract_json_object;

lazy_static! {
    // UUIDs and other hex-ish identifiers: 8+ hex digits or hyphens.
    static ref ID_LIKE_REGEX: Regex = Regex::new(r"[0-9a-fA-F-]{8,}").unwrap();
}

/// How the id list was recovered from the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMethod {
    Json,
    IdScan,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMatches {
    pub ids: Vec<String>,
    pub method: ParseMethod,
}

#[derive(Debug, Deserialize)]
struct MatchesPayload {
    matches: Vec<Value>,
}

pub fn parse_match_response(raw: &str) -> ParsedMatches {
    if let Some(ids) = parse_json_matches(raw) {
        debug!("Parsed AI matches from JSON: {ids:?}");
        return ParsedMatches {
            ids,
            method: ParseMethod::Json,
        };
    }

    let ids = scan_ids(raw);
    debug!("Falling back to id scan, found: {ids:?}");
    ParsedMatches {
        ids,
        method: ParseMethod::IdScan,
    }
}

/// Returns `None` when there is no parseable object or it lacks a `matches` array.
fn parse_json_matches(raw: &str) -> Option<Vec<String>> {
    let json_text = extract_json_object(raw)?;
    match serde_json::from_str::<MatchesPayload>(json_text) {
        Ok(payload) => Some(
            payload
                .matches
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
        ),
        Err(e) => {
            warn!("AI match response JSON parse error: {e}");
            None
        }
    }
}

fn scan_ids(raw: &str) -> Vec<String> {
    ID_LIKE_REGEX
        .find_iter(raw)
        .map(|m| m.as_str().to_string())
        .collect()
}
