use std::sync::Arc;

use crate::cv_source::CvTextSource;
use crate::llm_client::TextGenerator;
use crate::matching::matcher::JobMatcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<JobMatcher>,
    /// `None` when GEMINI_API_KEY is unset.
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub cv_source: Arc<dyn CvTextSource>,
}

impl AppState {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, cv_source: Arc<dyn CvTextSource>) -> Self {
        let matcher = JobMatcher::new(generator.clone(), cv_source.clone());
        Self {
            matcher: Arc::new(matcher),
            generator,
            cv_source,
        }
    }
}
