// Prompt constants for résumé evaluation.

/// Evaluation prompt template. Replace `{job_description}` and `{resume_text}` before sending.
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"
You are an ATS resume screening system. Extract structured information from the resume text.

JOB DESCRIPTION:
{job_description}

RESUME:
{resume_text}

Tasks:
1. Extract Candidate Name.
2. Extract Email.
3. Identify matching skills from the job description.
4. Identify missing skills (skills in job description but not in resume).
5. Provide a short 2-3 line HR-friendly summary.
6. Calculate a match score 0-100.

Return ONLY valid JSON in this format:
{
  "name": "Candidate Name",
  "email": "candidate@example.com",
  "matching_skills": ["skill1","skill2"],
  "missing_skills": ["skill3","skill4"],
  "summary": "Short HR-friendly summary",
  "match_score": number
}
"#;

pub fn build_evaluation_prompt(job_description: &str, resume_text: &str) -> String {
    // `{job_description}` precedes the résumé section, so filling the résumé
    // first keeps placeholder-looking text in either input literal.
    EVALUATION_PROMPT_TEMPLATE
        .replacen("{resume_text}", resume_text, 1)
        .replacen("{job_description}", job_description, 1)
}
