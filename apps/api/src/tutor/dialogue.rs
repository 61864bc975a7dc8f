//! Tutor dialogue: persona-conditioned chat replies and challenge hints.
//!
//! Flow (chat): persona prompt + context + windowed history → one free-text
//! completion → `TutorResponse`.
//! Flow (hint): persona prompt + level instruction + guardrail → one free-text
//! completion → raw hint text.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ServiceError;
use crate::llm_client::prompts::render_template;
use crate::llm_client::{CompletionModel, CompletionRequest};
use crate::personas::{Persona, PersonaTable};
use crate::tutor::prompts::{
    CONTEXT_HEADER, HINT_DETAILED, HINT_GUARDRAIL, HINT_MODERATE, HINT_PROMPT_TEMPLATE,
    HINT_SUBTLE, HISTORY_HEADER, MENTOR_LABEL, STUDENT_LABEL,
};

/// Longest accepted chat message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;
/// Only this many of the most recent turns are forwarded to the model.
pub const HISTORY_WINDOW: usize = 5;

const CHAT_TEMPERATURE: f32 = 0.7;
const HINT_TEMPERATURE: f32 = 0.5;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TutorResponse {
    pub persona: Persona,
    pub message: String,
    /// Always `None` for chat replies.
    pub suggestions: Option<Vec<String>>,
}

/// How much a hint may disclose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HintLevel {
    #[default]
    Subtle,
    Moderate,
    Detailed,
}

impl HintLevel {
    /// Maps 1/2/3 to a level; anything else is `Subtle`.
    pub fn from_level(level: i64) -> Self {
        match level {
            2 => HintLevel::Moderate,
            3 => HintLevel::Detailed,
            _ => HintLevel::Subtle,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            HintLevel::Subtle => 1,
            HintLevel::Moderate => 2,
            HintLevel::Detailed => 3,
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            HintLevel::Subtle => HINT_SUBTLE,
            HintLevel::Moderate => HINT_MODERATE,
            HintLevel::Detailed => HINT_DETAILED,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Service
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct TutorService {
    model: Arc<dyn CompletionModel>,
    personas: Arc<PersonaTable>,
}

impl TutorService {
    pub fn new(model: Arc<dyn CompletionModel>, personas: Arc<PersonaTable>) -> Self {
        Self { model, personas }
    }

    /// Answers one chat message in the voice of `persona`.
    pub async fn respond(
        &self,
        message: &str,
        context: Option<&str>,
        persona: Persona,
        history: &[ChatTurn],
    ) -> Result<TutorResponse, ServiceError> {
        validate_message(message)?;

        let system = build_chat_system_prompt(self.personas.system_prompt(persona), context, history);

        info!(
            "Tutor chat: persona={}, history_turns={}, forwarded_turns={}",
            persona.tag(),
            history.len(),
            recent_turns(history).len()
        );

        let reply = self
            .model
            .complete(CompletionRequest::text(system, message, CHAT_TEMPERATURE))
            .await?;

        Ok(TutorResponse {
            persona,
            message: reply,
            suggestions: None,
        })
    }

    /// Produces a hint for a stuck student without (by instruction) giving the answer away.
    pub async fn hint(
        &self,
        challenge_description: &str,
        user_code: &str,
        persona: Persona,
        level: HintLevel,
    ) -> Result<String, ServiceError> {
        if challenge_description.trim().is_empty() {
            return Err(ServiceError::Validation(
                "challenge_description cannot be empty".to_string(),
            ));
        }

        let system = build_hint_system_prompt(self.personas.system_prompt(persona), level);
        let user = render_template(
            HINT_PROMPT_TEMPLATE,
            &[("challenge", challenge_description), ("code", user_code)],
        );

        info!(
            "Tutor hint: persona={}, level={}",
            persona.tag(),
            level.level()
        );

        let hint = self
            .model
            .complete(CompletionRequest::text(system, user, HINT_TEMPERATURE))
            .await?;

        Ok(hint)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt assembly
// ────────────────────────────────────────────────────────────────────────────

fn validate_message(message: &str) -> Result<(), ServiceError> {
    if message.trim().is_empty() {
        return Err(ServiceError::Validation("message cannot be empty".to_string()));
    }
    let chars = message.chars().count();
    if chars > MAX_MESSAGE_CHARS {
        return Err(ServiceError::Validation(format!(
            "message is {chars} characters; the limit is {MAX_MESSAGE_CHARS}"
        )));
    }
    Ok(())
}

/// The trailing `HISTORY_WINDOW` turns, in original order.
pub fn recent_turns(history: &[ChatTurn]) -> &[ChatTurn] {
    &history[history.len().saturating_sub(HISTORY_WINDOW)..]
}

fn render_history(history: &[ChatTurn]) -> String {
    recent_turns(history)
        .iter()
        .map(|turn| {
            let label = match turn.role {
                Role::User => STUDENT_LABEL,
                Role::Assistant => MENTOR_LABEL,
            };
            format!("{label}: {}", turn.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Persona prompt, then the context section and the history section when present.
pub fn build_chat_system_prompt(
    persona_prompt: &str,
    context: Option<&str>,
    history: &[ChatTurn],
) -> String {
    let mut prompt = persona_prompt.to_string();

    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str(&format!("\n\n{CONTEXT_HEADER}\n{context}"));
    }

    if !history.is_empty() {
        prompt.push_str(&format!("\n\n{HISTORY_HEADER}\n{}", render_history(history)));
    }

    prompt
}

pub fn build_hint_system_prompt(persona_prompt: &str, level: HintLevel) -> String {
    format!(
        "{persona_prompt}\n\nHINT INSTRUCTION: {}\n\n{HINT_GUARDRAIL}\n",
        level.instruction()
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::llm_client::{LlmError, ResponseFormat};
    use crate::personas::prompts::{ABDUL_SYSTEM_PROMPT, RENDY_SYSTEM_PROMPT};

    fn service(model: Arc<ScriptedModel>) -> TutorService {
        TutorService::new(model, Arc::new(PersonaTable::builtin()))
    }

    fn numbered_history(count: usize) -> Vec<ChatTurn> {
        (1..=count)
            .map(|i| ChatTurn {
                role: if i % 2 == 1 { Role::User } else { Role::Assistant },
                content: format!("message #{i:02}"),
            })
            .collect()
    }

    #[test]
    fn test_recent_turns_keeps_last_five_in_order() {
        let history = numbered_history(12);
        let window: Vec<&str> = recent_turns(&history)
            .iter()
            .map(|t| t.content.as_str())
            .collect();
        assert_eq!(
            window,
            vec!["message #08", "message #09", "message #10", "message #11", "message #12"]
        );
    }

    #[test]
    fn test_recent_turns_short_history_untouched() {
        let history = numbered_history(3);
        assert_eq!(recent_turns(&history).len(), 3);
        assert!(recent_turns(&[]).is_empty());
    }

    #[test]
    fn test_chat_prompt_without_extras_is_persona_prompt() {
        assert_eq!(
            build_chat_system_prompt(RENDY_SYSTEM_PROMPT, None, &[]),
            RENDY_SYSTEM_PROMPT
        );
        assert_eq!(
            build_chat_system_prompt(RENDY_SYSTEM_PROMPT, Some("   "), &[]),
            RENDY_SYSTEM_PROMPT
        );
    }

    #[test]
    fn test_chat_prompt_labels_history_turns() {
        let history = vec![
            ChatTurn {
                role: Role::User,
                content: "What is a primary key?".into(),
            },
            ChatTurn {
                role: Role::Assistant,
                content: "A column that uniquely identifies a row.".into(),
            },
        ];
        let prompt = build_chat_system_prompt(
            ABDUL_SYSTEM_PROMPT,
            Some("Level 2: SQL Fundamentals"),
            &history,
        );

        assert!(prompt.starts_with(ABDUL_SYSTEM_PROMPT));
        assert!(prompt.contains("CURRENT CONTEXT:\nLevel 2: SQL Fundamentals"));
        assert!(prompt.contains(
            "PREVIOUS CONVERSATION:\nStudent: What is a primary key?\nMentor: A column that uniquely identifies a row."
        ));
        let context_at = prompt.find(CONTEXT_HEADER).unwrap();
        let history_at = prompt.find(HISTORY_HEADER).unwrap();
        assert!(context_at < history_at);
    }

    #[tokio::test]
    async fn test_respond_forwards_only_last_five_turns() {
        let model = Arc::new(ScriptedModel::replying(&["Use an INNER JOIN on the key."]));
        let history = numbered_history(12);

        let response = service(model.clone())
            .respond("How do I join two tables?", None, Persona::Rendy, &history)
            .await
            .unwrap();

        assert_eq!(response.message, "Use an INNER JOIN on the key.");
        assert_eq!(response.persona, Persona::Rendy);
        assert!(response.suggestions.is_none());

        let requests = model.requests();
        assert_eq!(requests.len(), 1);
        let system = &requests[0].system;
        for i in 1..=7 {
            assert!(!system.contains(&format!("message #{i:02}")), "turn {i} leaked");
        }
        let positions: Vec<usize> = (8..=12)
            .map(|i| system.find(&format!("message #{i:02}")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(requests[0].user, "How do I join two tables?");
        assert_eq!(requests[0].format, ResponseFormat::Text);
        assert!((requests[0].temperature - CHAT_TEMPERATURE).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_respond_rejects_empty_and_oversized_messages() {
        let model = Arc::new(ScriptedModel::replying(&[]));
        let svc = service(model.clone());

        let empty = svc.respond("  \n", None, Persona::Rendy, &[]).await;
        assert!(matches!(empty, Err(ServiceError::Validation(_))));

        let long = "a".repeat(MAX_MESSAGE_CHARS + 1);
        let oversized = svc.respond(&long, None, Persona::Rendy, &[]).await;
        assert!(matches!(oversized, Err(ServiceError::Validation(_))));

        assert!(model.requests().is_empty());
    }

    #[tokio::test]
    async fn test_respond_accepts_message_at_limit() {
        let model = Arc::new(ScriptedModel::replying(&["ok"]));
        let exact = "é".repeat(MAX_MESSAGE_CHARS);
        let result = service(model)
            .respond(&exact, None, Persona::Abdul, &[])
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_respond_propagates_model_failure() {
        let model = Arc::new(ScriptedModel::new(vec![Err(LlmError::Api {
            status: 401,
            message: "invalid api key".into(),
        })]));
        let result = service(model)
            .respond("hi", None, Persona::Abdul, &[])
            .await;
        assert!(matches!(
            result,
            Err(ServiceError::Model(LlmError::Api { status: 401, .. }))
        ));
    }

    #[test]
    fn test_hint_level_out_of_range_falls_back_to_subtle() {
        for level in [0, 4, 5, -1, 99] {
            assert_eq!(HintLevel::from_level(level), HintLevel::Subtle, "level {level}");
        }
        assert_eq!(HintLevel::from_level(2).instruction(), HINT_MODERATE);
        assert_eq!(HintLevel::from_level(3).level(), 3);
    }

    #[tokio::test]
    async fn test_hint_level_five_uses_subtle_instruction() {
        let model = Arc::new(ScriptedModel::replying(&["Think about GROUP BY."]));
        let code = "SELECT region, amount\nFROM sales";

        let hint = service(model.clone())
            .hint(
                "Total sales per region",
                code,
                Persona::Rendy,
                HintLevel::from_level(5),
            )
            .await
            .unwrap();

        assert_eq!(hint, "Think about GROUP BY.");
        let request = &model.requests()[0];
        assert!(request.system.starts_with(RENDY_SYSTEM_PROMPT));
        assert!(request.system.contains(HINT_SUBTLE));
        assert!(!request.system.contains(HINT_DETAILED));
        assert!(request.system.contains(HINT_GUARDRAIL));
        assert!(request.user.contains("CHALLENGE: Total sales per region"));
        assert!(request.user.contains(code));
        assert!((request.temperature - HINT_TEMPERATURE).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_hint_requires_challenge_description() {
        let model = Arc::new(ScriptedModel::replying(&["unused"]));
        let result = service(model.clone())
            .hint(" ", "", Persona::Abdul, HintLevel::Detailed)
            .await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert!(model.requests().is_empty());
    }
}
