//! Job matcher: entry point for CV-to-jobs matching.
//!
//! Pipeline: (optional) CV text extraction → local keyword scoring →
//! (optional) AI reordering. Each call is independent and keeps no state between calls.
//!
//! Local scoring always runs and always produces a usable result. Extraction and AI
//! failures degrade the result; they are never returned as errors.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cv_source::{try_extract_text, CvTextSource};
use crate::llm_client::TextGenerator;
use crate::matching::keywords::candidate_tokens;
use crate::matching::models::{MatchRequest, MatchResult, MatchSource};
use crate::matching::reconcile::{reorder_by_preference, request_ai_matches};
use crate::matching::scoring::{qualifying_ids, score_jobs, DEFAULT_MATCH_THRESHOLD};

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("jobs array is required")]
    MissingJobs,
}

#[derive(Clone)]
pub struct JobMatcher {
    generator: Option<Arc<dyn TextGenerator>>,
    cv_source: Arc<dyn CvTextSource>,
    threshold: f64,
}

impl JobMatcher {
    /// `generator` is `None` when no AI capability is configured; the matcher
    /// then runs local-only.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, cv_source: Arc<dyn CvTextSource>) -> Self {
        Self {
            generator,
            cv_source,
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }

    /// Overrides the local match threshold. The AI merge keeps using whatever set
    /// this threshold qualifies as authoritative.
    #[allow(dead_code)]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn ai_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn match_jobs(&self, request: MatchRequest) -> Result<MatchResult, MatchError> {
        let MatchRequest {
            jobs,
            parsed_cv,
            cv_url,
        } = request;
        let jobs = jobs.ok_or(MatchError::MissingJobs)?;

        let extracted_text = match cv_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => try_extract_text(self.cv_source.as_ref(), url).await,
            _ => None,
        };

        let cv_tokens = candidate_tokens(parsed_cv.as_ref(), extracted_text.as_deref());
        let scores = score_jobs(&jobs, &cv_tokens);
        let local_matches = qualifying_ids(&scores, self.threshold);

        info!(
            "Local matches (score >= {}): {} out of {} jobs",
            self.threshold,
            local_matches.len(),
            jobs.len()
        );

        let Some(generator) = &self.generator else {
            return Ok(MatchResult {
                matches: local_matches,
                scores,
                source: MatchSource::Local,
                ai_error: None,
            });
        };

        match request_ai_matches(
            generator.as_ref(),
            parsed_cv.as_ref(),
            extracted_text.as_deref(),
            &jobs,
        )
        .await
        {
            Ok(parsed) => {
                debug!("AI matches ({:?}): {:?}", parsed.method, parsed.ids);
                let matches = reorder_by_preference(&local_matches, &parsed.ids);
                info!("Final matches (local membership, AI order): {matches:?}");
                Ok(MatchResult {
                    matches,
                    scores,
                    source: MatchSource::AiReordered,
                    ai_error: None,
                })
            }
            Err(e) => {
                warn!("AI match refinement failed, using local order: {e}");
                Ok(MatchResult {
                    matches: local_matches,
                    scores,
                    source: MatchSource::Local,
                    ai_error: Some(e.to_string()),
                })
            }
        }
    }
}
