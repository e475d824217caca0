use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub const SCORE_RESUME_SYSTEM: &str = JSON_ONLY_SYSTEM;

/// Both texts are substituted in one pass, so braces inside either are kept verbatim.
pub fn score_resume_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"You are a resume screening expert.

Compare the resume below against the job description and respond with a JSON object:
{{
  "matchScore": <integer between 0 and 100 describing how well the resume matches the job>,
  "missingSkills": "<comma-separated skills required by the job that the resume lacks>",
  "strengths": "<comma-separated strengths from the resume that align with the job>"
}}

Resume:
{resume_text}

Job Description:
{job_description}"#
    )
}
