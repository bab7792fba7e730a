// Prompt constants for CV feedback.

/// CV review prompt template.
/// Replace: {full_name}, {university}, {major}, {email}, {cv_text}, {json_only}
pub const CV_FEEDBACK_PROMPT_TEMPLATE: &str = r#"You are an experienced career advisor reviewing CVs of students applying for internships.

APPLICANT PROFILE:
- Name: {full_name}
- University: {university}
- Major: {major}
- Email: {email}

CV CONTENT:
{cv_text}

Give personalized, actionable suggestions to improve this CV for internship applications.
Consider: content and structure, how skills are presented and evidenced, how experience and
projects are described (quantify achievements), education details, formatting and length,
and any missing sections.

Return a JSON object with this EXACT schema:
{
  "overall_score": "rating from 1-10",
  "strengths": ["2-3 current strengths"],
  "priority_improvements": [
    {
      "category": "area to improve",
      "issue": "specific problem",
      "suggestion": "actionable advice",
      "impact": "how this helps their applications"
    }
  ],
  "quick_wins": ["2-3 improvements they can make today"],
  "advanced_tips": ["2-3 strategic improvements"],
  "sector_specific": "advice tailored to their major or target industry"
}

Be encouraging but honest. {json_only}"#;

pub const NOT_PROVIDED: &str = "Not provided";
pub const NO_CV_TEXT: &str = "No CV uploaded yet";
