//! CV Feedback: AI review of an applicant's CV with a fixed fallback when the
//! model's reply cannot be parsed.
//!
//! Unlike matching there is no local result to fall back on, so an unconfigured or
//! failing generator is reported to the caller.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cv_source::{try_extract_text, CvTextSource};
use crate::errors::AppError;
use crate::feedback::prompts::{CV_FEEDBACK_PROMPT_TEMPLATE, NOT_PROVIDED, NO_CV_TEXT};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{extract_json_object, TextGenerator};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantInfo {
    #[serde(default, alias = "full_name")]
    pub full_name: Option<String>,
    #[serde(default, alias = "university_name")]
    pub university_name: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default, alias = "student_email")]
    pub student_email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[serde(default, alias = "cv_url")]
    pub cv_url: Option<String>,
    #[serde(default)]
    pub applicant: ApplicantInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityImprovement {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub issue: String,
    #[serde(default)]
    pub suggestion: String,
    #[serde(default)]
    pub impact: String,
}

/// Structured suggestions. `overall_score` is kept as raw JSON since models return
/// it as either a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvSuggestions {
    #[serde(default)]
    pub overall_score: Value,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub priority_improvements: Vec<PriorityImprovement>,
    #[serde(default)]
    pub quick_wins: Vec<String>,
    #[serde(default)]
    pub advanced_tips: Vec<String>,
    #[serde(default)]
    pub sector_specific: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub suggestions: CvSuggestions,
    pub has_cv: bool,
    pub cv_length: usize,
    pub applicant: ApplicantInfo,
}

pub async fn generate_feedback(
    generator: &dyn TextGenerator,
    cv_source: &dyn CvTextSource,
    request: FeedbackRequest,
) -> Result<FeedbackResponse, AppError> {
    let cv_url = request
        .cv_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());

    let cv_text = match cv_url {
        Some(url) => try_extract_text(cv_source, url).await.unwrap_or_default(),
        None => String::new(),
    };

    let prompt = build_feedback_prompt(&request.applicant, &cv_text);
    let reply = generator
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("CV feedback failed: {e}")))?;
    info!("CV feedback response length: {}", reply.len());

    let suggestions = parse_suggestions(&reply)
        .unwrap_or_else(|| fallback_suggestions(request.applicant.major.as_deref()));

    Ok(FeedbackResponse {
        suggestions,
        has_cv: cv_url.is_some(),
        cv_length: cv_text.chars().count(),
        applicant: request.applicant,
    })
}

/// The value, or "Not provided" when absent or blank.
pub(crate) fn or_not_provided(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_PROVIDED)
}

pub fn build_feedback_prompt(applicant: &ApplicantInfo, cv_text: &str) -> String {
    let cv_text = if cv_text.trim().is_empty() {
        NO_CV_TEXT
    } else {
        cv_text
    };
    CV_FEEDBACK_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{full_name}", or_not_provided(&applicant.full_name))
        .replace("{university}", or_not_provided(&applicant.university_name))
        .replace("{major}", or_not_provided(&applicant.major))
        .replace("{email}", or_not_provided(&applicant.student_email))
        .replace("{cv_text}", cv_text)
}

/// Fence-strip and brace-bound the reply, then deserialize. `None` on any failure.
pub fn parse_suggestions(reply: &str) -> Option<CvSuggestions> {
    let Some(json_text) = extract_json_object(reply) else {
        warn!("CV feedback reply contained no JSON object");
        return None;
    };
    match serde_json::from_str(json_text) {
        Ok(suggestions) => Some(suggestions),
        Err(e) => {
            warn!("Failed to parse CV feedback JSON: {e}");
            debug!("Unparsed CV feedback reply: {reply}");
            None
        }
    }
}

/// Generic advice returned when the model's reply is unusable.
pub fn fallback_suggestions(major: Option<&str>) -> CvSuggestions {
    let field = major
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or("your field");
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    CvSuggestions {
        overall_score: Value::String("7".to_string()),
        strengths: strings(&[
            "CV uploaded and accessible",
            "Student profile information available",
        ]),
        priority_improvements: vec![PriorityImprovement {
            category: "Content Analysis".to_string(),
            issue: "Unable to parse detailed CV structure".to_string(),
            suggestion: "Ensure the CV has clear sections: Contact, Education, Experience, Skills, Projects"
                .to_string(),
            impact: "Clear organization helps recruiters find key information quickly".to_string(),
        }],
        quick_wins: strings(&[
            "Add clear section headers",
            "Use consistent formatting",
            "Include contact information",
        ]),
        advanced_tips: strings(&[
            "Quantify achievements with numbers",
            "Tailor the CV for each application",
            "Add relevant projects",
        ]),
        sector_specific: format!(
            "For {field}, emphasize technical skills and relevant coursework"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingGenerator, FakeGenerator, StaticCvSource};

    fn applicant() -> ApplicantInfo {
        ApplicantInfo {
            full_name: Some("Ada Lovelace".to_string()),
            university_name: Some("University of London".to_string()),
            major: Some("Mathematics".to_string()),
            student_email: None,
        }
    }

    const GOOD_REPLY: &str = r#"```json
{
  "overall_score": 8,
  "strengths": ["Strong projects"],
  "priority_improvements": [
    {"category": "Skills", "issue": "No tools listed", "suggestion": "List tools", "impact": "ATS hits"}
  ],
  "quick_wins": ["Add GitHub link"],
  "advanced_tips": [],
  "sector_specific": "Highlight proofs"
}
```"#;

    #[test]
    fn test_parse_suggestions_from_fenced_reply() {
        let suggestions = parse_suggestions(GOOD_REPLY).unwrap();
        assert_eq!(suggestions.overall_score, serde_json::json!(8));
        assert_eq!(suggestions.strengths, vec!["Strong projects"]);
        assert_eq!(suggestions.priority_improvements[0].category, "Skills");
        assert!(suggestions.advanced_tips.is_empty());
    }

    #[test]
    fn test_parse_suggestions_rejects_prose() {
        assert!(parse_suggestions("I think the CV looks fine.").is_none());
        assert!(parse_suggestions("{not json}").is_none());
    }

    #[test]
    fn test_fallback_mentions_major() {
        let suggestions = fallback_suggestions(Some("Biology"));
        assert!(suggestions.sector_specific.contains("Biology"));
        assert!(fallback_suggestions(None).sector_specific.contains("your field"));
        assert!(fallback_suggestions(Some("  ")).sector_specific.contains("your field"));
    }

    #[test]
    fn test_prompt_fills_placeholders() {
        let prompt = build_feedback_prompt(&applicant(), "");
        assert!(prompt.contains("Name: Ada Lovelace"));
        assert!(prompt.contains("Email: Not provided"));
        assert!(prompt.contains(NO_CV_TEXT));
        assert!(!prompt.contains("{major}"));
    }

    #[tokio::test]
    async fn test_generate_feedback_with_cv() {
        let generator = FakeGenerator::replying(GOOD_REPLY);
        let source = StaticCvSource::with_text("Ada Lovelace - Analytical Engine notes");
        let response = generate_feedback(
            &generator,
            &source,
            FeedbackRequest {
                cv_url: Some("https://cdn.example.com/ada.pdf".to_string()),
                applicant: applicant(),
            },
        )
        .await
        .unwrap();

        assert!(response.has_cv);
        assert_eq!(response.cv_length, "Ada Lovelace - Analytical Engine notes".chars().count());
        assert_eq!(response.suggestions.sector_specific, "Highlight proofs");
        assert!(generator.prompts()[0].contains("Analytical Engine notes"));
    }

    #[tokio::test]
    async fn test_generate_feedback_unparseable_reply_uses_fallback() {
        let generator = FakeGenerator::replying("Looks great, keep it up!");
        let source = StaticCvSource::failing();
        let response = generate_feedback(
            &generator,
            &source,
            FeedbackRequest {
                cv_url: None,
                applicant: applicant(),
            },
        )
        .await
        .unwrap();

        assert!(!response.has_cv);
        assert_eq!(response.cv_length, 0);
        assert_eq!(response.suggestions, fallback_suggestions(Some("Mathematics")));
    }

    #[tokio::test]
    async fn test_generate_feedback_generator_failure_is_error() {
        let source = StaticCvSource::failing();
        let result = generate_feedback(&FailingGenerator, &source, FeedbackRequest::default()).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
