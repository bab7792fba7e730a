use crate::matching::keywords::job_keywords;
use crate::matching::models::{JobPosting, MatchScore};
use crate::matching::tokens::TokenSet;

/// Minimum score for a job to count as a local match.
///
/// The qualifying set under this threshold is the authoritative membership of every
/// returned match list; AI output may only reorder it.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.30;

/// Fraction of the job's keywords present in the candidate tokens.
/// Returns 0.0 for a job with no keywords.
pub fn compute_match_score(candidate: &TokenSet, job_keywords: &TokenSet) -> f64 {
    if job_keywords.is_empty() {
        return 0.0;
    }
    let overlap = job_keywords
        .iter()
        .filter(|kw| candidate.contains(*kw))
        .count();
    overlap as f64 / job_keywords.len() as f64
}

/// Scores every job in input order.
pub fn score_jobs(jobs: &[JobPosting], candidate: &TokenSet) -> Vec<MatchScore> {
    jobs.iter()
        .map(|job| MatchScore {
            id: job.id.clone(),
            score: compute_match_score(candidate, &job_keywords(job)),
        })
        .collect()
}

/// Ids whose score reaches `threshold`, in score-table order.
pub fn qualifying_ids(scores: &[MatchScore], threshold: f64) -> Vec<String> {
    scores
        .iter()
        .filter(|s| s.score >= threshold)
        .map(|s| s.id.clone())
        .collect()
}
