//! AI reconciliation: asks the text generator for its preferred job ids and merges
//! them into the local result.
//!
//! The local qualifying list is authoritative for membership. The AI reply can only
//! change the order: ids it invents are dropped, qualifying ids it omits are kept.

use std::collections::HashSet;

use tracing::debug;

use crate::llm_client::{LlmError, TextGenerator};
use crate::matching::models::{CandidateProfile, JobPosting};
use crate::matching::prompts::{build_match_prompt, prompt_candidate};
use crate::matching::response::{parse_match_response, ParsedMatches};

/// Single-shot AI call; any failure is returned to the caller to degrade on.
pub async fn request_ai_matches(
    generator: &dyn TextGenerator,
    profile: Option<&CandidateProfile>,
    extracted_text: Option<&str>,
    jobs: &[JobPosting],
) -> Result<ParsedMatches, LlmError> {
    let candidate = prompt_candidate(profile, extracted_text)?;
    let prompt = build_match_prompt(&candidate, jobs)?;
    let reply = generator.generate(&prompt).await?;
    debug!("AI match response: {reply}");
    Ok(parse_match_response(&reply))
}

/// Orders `local` by the AI's preference: ids from `preferred` that are in `local`
/// come first in AI order, then the remaining `local` ids in their original order.
pub fn reorder_by_preference(local: &[String], preferred: &[String]) -> Vec<String> {
    let allowed: HashSet<&str> = local.iter().map(String::as_str).collect();
    let mut emitted: HashSet<&str> = HashSet::new();
    let mut ordered = Vec::with_capacity(local.len());

    for id in preferred.iter().chain(local) {
        if allowed.contains(id.as_str()) && emitted.insert(id.as_str()) {
            ordered.push(id.clone());
        }
    }
    ordered
}
