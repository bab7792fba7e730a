use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A text-bearing field that callers send either as one string or as a list of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    Text(String),
    List(Vec<Option<String>>),
}

impl TextField {
    /// Flattens the field into its string values, skipping nulls.
    pub fn values(&self) -> Vec<&str> {
        match self {
            TextField::Text(s) => vec![s.as_str()],
            TextField::List(items) => items.iter().flatten().map(String::as_str).collect(),
        }
    }

    pub fn empty_list() -> Self {
        TextField::List(Vec::new())
    }
}

impl From<&str> for TextField {
    fn from(s: &str) -> Self {
        TextField::Text(s.to_string())
    }
}

impl From<Vec<&str>> for TextField {
    fn from(items: Vec<&str>) -> Self {
        TextField::List(items.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

/// A job posting as read from the job board. Read-only input to matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: Option<TextField>,
    pub role_overview: Option<TextField>,
    pub required_skills: Option<TextField>,
    pub eligibility: Option<TextField>,
    pub tags: Option<TextField>,
    pub company_description: Option<TextField>,
}

/// Pre-structured CV data. Fields not modelled here are kept in `extra`
/// so the AI prompt sees the profile exactly as the caller sent it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<TextField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<TextField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<TextField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<TextField>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Input to `JobMatcher::match_jobs`.
///
/// `jobs` is optional at the type level so that a missing list is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default)]
    pub jobs: Option<Vec<JobPosting>>,
    #[serde(default, alias = "parsed_cv")]
    pub parsed_cv: Option<CandidateProfile>,
    #[serde(default, alias = "cv_url")]
    pub cv_url: Option<String>,
}

/// Local relevance of one job: fraction of its keywords found in the candidate tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub id: String,
    pub score: f64,
}

/// Where the ordering of `MatchResult::matches` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchSource {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "ai-reordered")]
    AiReordered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub matches: Vec<String>,
    pub scores: Vec<MatchScore>,
    pub source: MatchSource,
    /// Set when the AI call failed and the result fell back to local ordering.
    #[serde(
        default,
        rename = "geminiError",
        skip_serializing_if = "Option::is_none"
    )]
    pub ai_error: Option<String>,
}
