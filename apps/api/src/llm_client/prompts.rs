// Cross-cutting prompt fragments. Each module that calls the LLM keeps its own
// prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt fragment for verbatim transcription tasks.
pub const VERBATIM_SYSTEM: &str = "You transcribe documents faithfully. \
    Return only the requested text. \
    Do NOT summarize, reorder, correct, or comment on the content.";
