// AI tutor: persona chat and challenge hints.
// All LLM calls go through llm_client; nothing here talks HTTP directly.

pub mod dialogue;
pub mod handlers;
pub mod prompts;
