use crate::llm_client::prompts::VERBATIM_SYSTEM;

pub const EXTRACT_RESUME_SYSTEM: &str = VERBATIM_SYSTEM;

pub const EXTRACT_RESUME_PROMPT: &str = "\
Extract the text from the attached resume document. \
Only return the extracted text, preserving the original wording and line order.";
