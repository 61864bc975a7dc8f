// All LLM prompt fragments for the tutor module.
// Persona prompts themselves live in crate::personas::prompts.

pub const CONTEXT_HEADER: &str = "CURRENT CONTEXT:";
pub const HISTORY_HEADER: &str = "PREVIOUS CONVERSATION:";

pub const STUDENT_LABEL: &str = "Student";
pub const MENTOR_LABEL: &str = "Mentor";

pub const HINT_SUBTLE: &str = "Give a very subtle hint: only point them in the right direction \
    without giving the answer.";

pub const HINT_MODERATE: &str = "Give a moderate hint: explain the concept they are probably \
    missing and show a small example.";

pub const HINT_DETAILED: &str = "Give a detailed hint: walk through the approach step by step, \
    but let them write the code themselves.";

/// Appended after the hint instruction. Prompt-level only; nothing checks the reply.
pub const HINT_GUARDRAIL: &str = "You are helping a student who is stuck on a coding challenge. \
    Give guidance that moves them forward. \
    Do NOT reveal the full solution and do NOT write the finished code for them.";

/// Hint human-turn template. Placeholders: {challenge}, {code}.
pub const HINT_PROMPT_TEMPLATE: &str = r#"CHALLENGE: {challenge}

STUDENT'S CURRENT CODE:
```
{code}
```

Give a hint that fits the instruction above to help the student make progress."#;
