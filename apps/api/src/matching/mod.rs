// Job matching: keyword scoring of a candidate against job postings, with optional
// AI reordering. All LLM calls go through llm_client; CV text comes from cv_source.

pub mod handlers;
pub mod keywords;
pub mod matcher;
pub mod models;
pub mod prompts;
pub mod reconcile;
pub mod response;
pub mod scoring;
pub mod tokens;
