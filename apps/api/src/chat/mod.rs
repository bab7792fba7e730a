//! Career-advisor chat: free-form questions answered by the text generator, with the
//! applicant's profile and the most recent conversation turns as context.
//!
//! Like CV feedback there is no local answer, so an unconfigured or failing generator
//! is reported to the caller.

pub mod handlers;
pub mod prompts;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chat::prompts::{APPLICANT_CONTEXT_TEMPLATE, CHAT_PROMPT_TEMPLATE, CONVERSATION_HEADER};
use crate::errors::AppError;
use crate::feedback::{or_not_provided, ApplicantInfo};
use crate::llm_client::TextGenerator;

/// Number of prior turns included in the prompt.
pub const MAX_HISTORY_TURNS: usize = 6;

lazy_static! {
    static ref CODE_BLOCK_REGEX: Regex = Regex::new(r"(?s)```.*?```").unwrap();
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatTurn {
    /// `"user"` for the student; anything else is rendered as the assistant.
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub applicant: Option<ApplicantInfo>,
    #[serde(default, alias = "cv_url")]
    pub cv_url: Option<String>,
    #[serde(default, alias = "conversation_history")]
    pub conversation_history: Vec<ChatTurn>,
}

impl ChatRequest {
    /// The trimmed message, or a validation error when it is missing or blank.
    pub fn message_text(&self) -> Result<&str, AppError> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| AppError::Validation("Message is required".to_string()))
    }

    fn has_cv(&self) -> bool {
        self.cv_url.as_deref().is_some_and(|u| !u.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

pub async fn generate_reply(
    generator: &dyn TextGenerator,
    request: ChatRequest,
) -> Result<ChatResponse, AppError> {
    let prompt = build_chat_prompt(&request)?;
    debug!(
        "Chat prompt built with {} history turns",
        recent_turns(&request.conversation_history).len()
    );

    let reply = generator
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Chat failed: {e}")))?;
    info!("Chat response length: {}", reply.len());

    Ok(ChatResponse {
        response: clean_reply(&reply),
        timestamp: Utc::now(),
    })
}

/// The last `MAX_HISTORY_TURNS` turns, oldest first.
pub fn recent_turns(history: &[ChatTurn]) -> &[ChatTurn] {
    &history[history.len().saturating_sub(MAX_HISTORY_TURNS)..]
}

fn applicant_context(request: &ChatRequest) -> String {
    let Some(applicant) = &request.applicant else {
        return String::new();
    };
    APPLICANT_CONTEXT_TEMPLATE
        .replace("{full_name}", or_not_provided(&applicant.full_name))
        .replace("{university}", or_not_provided(&applicant.university_name))
        .replace("{major}", or_not_provided(&applicant.major))
        .replace("{has_cv}", if request.has_cv() { "Yes" } else { "No" })
}

fn conversation_context(history: &[ChatTurn]) -> String {
    let turns = recent_turns(history);
    if turns.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = turns
        .iter()
        .map(|turn| {
            let speaker = if turn.role == "user" { "Student" } else { "Assistant" };
            format!("{speaker}: {}", turn.content)
        })
        .collect();
    format!("{CONVERSATION_HEADER}\n{}", lines.join("\n"))
}

pub fn build_chat_prompt(request: &ChatRequest) -> Result<String, AppError> {
    let message = request.message_text()?;
    Ok(CHAT_PROMPT_TEMPLATE
        .replace("{applicant_context}", &applicant_context(request))
        .replace(
            "{conversation_context}",
            &conversation_context(&request.conversation_history),
        )
        .replace("{message}", message))
}

/// Drops fenced code blocks and a bold marker wrapping the whole reply.
pub fn clean_reply(reply: &str) -> String {
    let without_code = CODE_BLOCK_REGEX.replace_all(reply.trim(), "");
    let text = without_code.as_ref();
    let text = text.strip_prefix("**").unwrap_or(text);
    let text = text.strip_suffix("**").unwrap_or(text);
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingGenerator, FakeGenerator};

    fn asking(message: &str) -> ChatRequest {
        ChatRequest {
            message: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn history(count: usize) -> Vec<ChatTurn> {
        (1..=count)
            .map(|i| ChatTurn {
                role: if i % 2 == 1 { "user" } else { "assistant" }.to_string(),
                content: format!("turn {i}"),
            })
            .collect()
    }

    #[test]
    fn test_blank_message_rejected() {
        for request in [ChatRequest::default(), asking(""), asking("   \n")] {
            assert!(matches!(request.message_text(), Err(AppError::Validation(_))));
        }
        assert_eq!(asking("  Hi there ").message_text().unwrap(), "Hi there");
    }

    #[test]
    fn test_prompt_keeps_last_six_turns() {
        let request = ChatRequest {
            conversation_history: history(8),
            ..asking("What next?")
        };
        let prompt = build_chat_prompt(&request).unwrap();

        assert!(!prompt.contains("turn 1"));
        assert!(!prompt.contains("turn 2"));
        assert!(prompt.contains("RECENT CONVERSATION:\nStudent: turn 3\nAssistant: turn 4"));
        assert!(prompt.contains("Assistant: turn 8"));
        assert!(prompt.contains("CURRENT QUESTION: What next?"));
    }

    #[test]
    fn test_short_history_kept_whole() {
        assert_eq!(recent_turns(&history(3)).len(), 3);
        assert!(recent_turns(&[]).is_empty());
    }

    #[test]
    fn test_prompt_without_context_blocks() {
        let prompt = build_chat_prompt(&asking("How do I prepare for interviews?")).unwrap();
        assert!(!prompt.contains("STUDENT CONTEXT"));
        assert!(!prompt.contains("RECENT CONVERSATION"));
        assert!(!prompt.contains("{applicant_context}"));
    }

    #[test]
    fn test_prompt_includes_applicant_context() {
        let request = ChatRequest {
            applicant: Some(ApplicantInfo {
                full_name: Some("Grace Hopper".to_string()),
                major: Some("Computer Science".to_string()),
                ..Default::default()
            }),
            cv_url: Some("https://cdn.example.com/grace.pdf".to_string()),
            ..asking("Which companies should I target?")
        };
        let prompt = build_chat_prompt(&request).unwrap();

        assert!(prompt.contains("- Name: Grace Hopper"));
        assert!(prompt.contains("- University: Not provided"));
        assert!(prompt.contains("- Major: Computer Science"));
        assert!(prompt.contains("- Has CV: Yes"));
    }

    #[test]
    fn test_blank_cv_url_means_no_cv() {
        let request = ChatRequest {
            applicant: Some(ApplicantInfo::default()),
            cv_url: Some(" ".to_string()),
            ..asking("Hi")
        };
        assert!(build_chat_prompt(&request).unwrap().contains("- Has CV: No"));
    }

    #[test]
    fn test_clean_reply_strips_code_and_bold() {
        assert_eq!(clean_reply("  **Start with your CV.**  "), "Start with your CV.");
        assert_eq!(
            clean_reply("Try this:\n```rust\nfn main() {}\n```\nGood luck"),
            "Try this:\n\nGood luck"
        );
        assert_eq!(clean_reply("Use **bold** headers"), "Use **bold** headers");
    }

    #[test]
    fn test_request_accepts_snake_case_history() {
        let request: ChatRequest = serde_json::from_value(serde_json::json!({
            "message": "Hello",
            "conversation_history": [{"role": "user", "content": "Hi"}]
        }))
        .unwrap();
        assert_eq!(request.conversation_history.len(), 1);
        assert_eq!(request.conversation_history[0].content, "Hi");
    }

    #[tokio::test]
    async fn test_generate_reply_cleans_model_output() {
        let generator = FakeGenerator::replying("**Tailor each application.**");
        let response = generate_reply(&generator, asking("How do I stand out?"))
            .await
            .unwrap();

        assert_eq!(response.response, "Tailor each application.");
        assert!(generator.prompts()[0].contains("CURRENT QUESTION: How do I stand out?"));
    }

    #[tokio::test]
    async fn test_generate_reply_generator_failure_is_error() {
        let result = generate_reply(&FailingGenerator, asking("Hello")).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }

    #[tokio::test]
    async fn test_generate_reply_blank_message_skips_generator() {
        let generator = FakeGenerator::replying("unused");
        let result = generate_reply(&generator, asking(" ")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(generator.prompts().is_empty());
    }
}
