use crate::matching::models::{CandidateProfile, JobPosting, TextField};
use crate::matching::tokens::{extend_tokens, TokenSet};

fn extend_from_field(tokens: &mut TokenSet, field: Option<&TextField>) {
    if let Some(field) = field {
        for value in field.values() {
            extend_tokens(tokens, value);
        }
    }
}

/// Keyword set of a job: union of tokens from every descriptive field.
/// A job with no populated fields yields an empty set.
pub fn job_keywords(job: &JobPosting) -> TokenSet {
    let mut keywords = TokenSet::new();
    for field in [
        &job.required_skills,
        &job.eligibility,
        &job.role_overview,
        &job.title,
        &job.company_description,
        &job.tags,
    ] {
        extend_from_field(&mut keywords, field.as_ref());
    }
    keywords
}

/// Candidate token set. Profile fields and extracted CV text are additive evidence;
/// either may be absent.
pub fn candidate_tokens(profile: Option<&CandidateProfile>, extracted_text: Option<&str>) -> TokenSet {
    let mut tokens = TokenSet::new();
    if let Some(profile) = profile {
        for field in [
            &profile.skills,
            &profile.experience,
            &profile.education,
            &profile.summary,
        ] {
            extend_from_field(&mut tokens, field.as_ref());
        }
    }
    if let Some(text) = extracted_text {
        extend_tokens(&mut tokens, text);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> TokenSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_job_keywords_unions_all_fields() {
        let job = JobPosting {
            id: "J1".to_string(),
            title: Some("Data Intern".into()),
            role_overview: Some(vec!["Build dashboards"].into()),
            required_skills: Some(vec!["Python", "SQL"].into()),
            eligibility: Some(vec!["Undergraduate"].into()),
            tags: Some(vec!["remote"].into()),
            company_description: Some("Fintech startup.".into()),
        };

        assert_eq!(
            job_keywords(&job),
            set(&[
                "data",
                "intern",
                "build",
                "dashboards",
                "python",
                "sql",
                "undergraduate",
                "remote",
                "fintech",
                "startup",
            ])
        );
    }

    #[test]
    fn test_job_keywords_empty_for_bare_job() {
        let job = JobPosting {
            id: "J1".to_string(),
            required_skills: Some(TextField::empty_list()),
            title: Some("".into()),
            ..Default::default()
        };
        assert!(job_keywords(&job).is_empty());
    }

    #[test]
    fn test_candidate_tokens_from_profile_only() {
        let profile = CandidateProfile {
            skills: Some(vec!["Rust", "Go"].into()),
            experience: Some("Interned at Acme".into()),
            education: Some("BSc Computer Science".into()),
            summary: None,
            ..Default::default()
        };

        assert_eq!(
            candidate_tokens(Some(&profile), None),
            set(&["rust", "go", "interned", "at", "acme", "bsc", "computer", "science"])
        );
    }

    #[test]
    fn test_candidate_tokens_merges_profile_and_text() {
        let profile = CandidateProfile {
            skills: Some(vec!["python"].into()),
            ..Default::default()
        };
        assert_eq!(
            candidate_tokens(Some(&profile), Some("SQL, Python")),
            set(&["python", "sql"])
        );
    }

    #[test]
    fn test_candidate_tokens_text_only() {
        assert_eq!(candidate_tokens(None, Some("Kotlin")), set(&["kotlin"]));
    }

    #[test]
    fn test_candidate_tokens_nothing_available() {
        assert!(candidate_tokens(None, None).is_empty());
    }

    #[test]
    fn test_profile_extra_fields_do_not_contribute_tokens() {
        let mut profile = CandidateProfile::default();
        profile
            .extra
            .insert("hobbies".to_string(), serde_json::json!("python"));
        assert!(candidate_tokens(Some(&profile), None).is_empty());
    }
}
