// Code grading: rubric scoring plus improvement suggestions.
// All LLM calls go through llm_client; nothing here talks HTTP directly.

pub mod grader;
pub mod handlers;
pub mod prompts;
pub mod suggestions;
