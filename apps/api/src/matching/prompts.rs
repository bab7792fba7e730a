// Prompt construction for AI-assisted job matching.

use serde::Serialize;
use serde_json::{json, Value};

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::matching::models::{CandidateProfile, JobPosting, TextField};

/// Job matching prompt template.
/// Replace: {candidate_json}, {jobs_json}, {json_only}
pub const MATCH_PROMPT_TEMPLATE: &str = r#"You are a job-matching assistant for an internship board.
Given a candidate CV (JSON) and a list of jobs (id + fields), return JSON: {"matches": ["job-id-1", ...]}
A job matches if at least 30% of its (required_skills + eligibility) appear in the candidate's skills or experience.
List the best matches first.

Candidate:
{candidate_json}

Jobs:
{jobs_json}

Only return valid JSON with {"matches":[...]}. {json_only}"#;

/// Reduced job view sent to the model. Description, tags and company fields are
/// left out to keep the prompt small.
#[derive(Debug, Serialize)]
struct PromptJob<'a> {
    id: &'a str,
    title: Option<&'a TextField>,
    required_skills: TextField,
    eligibility: TextField,
    role_overview: TextField,
}

impl<'a> From<&'a JobPosting> for PromptJob<'a> {
    fn from(job: &'a JobPosting) -> Self {
        let or_empty =
            |field: &Option<TextField>| field.clone().unwrap_or_else(TextField::empty_list);
        Self {
            id: &job.id,
            title: job.title.as_ref(),
            required_skills: or_empty(&job.required_skills),
            eligibility: or_empty(&job.eligibility),
            role_overview: or_empty(&job.role_overview),
        }
    }
}

/// The candidate as the model sees it: the profile when given, otherwise the
/// extracted CV text wrapped as `{"extracted_text": ...}`.
pub fn prompt_candidate(
    profile: Option<&CandidateProfile>,
    extracted_text: Option<&str>,
) -> Result<Value, serde_json::Error> {
    match profile {
        Some(profile) => serde_json::to_value(profile),
        None => Ok(json!({ "extracted_text": extracted_text.unwrap_or_default() })),
    }
}

pub fn build_match_prompt(candidate: &Value, jobs: &[JobPosting]) -> Result<String, serde_json::Error> {
    let prompt_jobs: Vec<PromptJob> = jobs.iter().map(PromptJob::from).collect();
    Ok(MATCH_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{jobs_json}", &serde_json::to_string_pretty(&prompt_jobs)?)
        .replace("{candidate_json}", &serde_json::to_string_pretty(candidate)?))
}
