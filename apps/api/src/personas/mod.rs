//! Persona table: the two fixed tutor personas and their system prompts.
//!
//! Built once at startup and shared read-only (`Arc<PersonaTable>`) with the
//! tutor service and the persona catalog endpoint. Lookup never fails: any
//! unrecognized tag resolves to the default persona.

use serde::{Deserialize, Serialize};

pub mod prompts;

use prompts::{ABDUL_SYSTEM_PROMPT, RENDY_SYSTEM_PROMPT};

/// A tutor persona. Deserializing an unknown tag yields the default (`RENDY`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum Persona {
    #[default]
    Rendy,
    Abdul,
}

impl Persona {
    pub const ALL: [Persona; 2] = [Persona::Rendy, Persona::Abdul];

    /// Resolves an exact tag (`"RENDY"`, `"ABDUL"`). Anything else, including
    /// a casing mismatch, is the default persona.
    pub fn from_tag(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.tag() == tag)
            .unwrap_or_default()
    }

    pub fn tag(self) -> &'static str {
        match self {
            Persona::Rendy => "RENDY",
            Persona::Abdul => "ABDUL",
        }
    }
}

impl From<String> for Persona {
    fn from(tag: String) -> Self {
        Persona::from_tag(&tag)
    }
}

/// Display metadata for the UI persona picker.
#[derive(Debug, Clone, Serialize)]
pub struct PersonaCard {
    pub id: Persona,
    pub name: &'static str,
    pub role: &'static str,
    pub specialties: &'static [&'static str],
    pub teaching_style: &'static str,
    pub avatar: &'static str,
}

#[derive(Debug, Clone)]
pub struct PersonaProfile {
    pub system_prompt: &'static str,
    pub card: PersonaCard,
}

/// Immutable persona-to-profile mapping.
#[derive(Debug, Clone)]
pub struct PersonaTable {
    rendy: PersonaProfile,
    abdul: PersonaProfile,
}

impl PersonaTable {
    pub fn builtin() -> Self {
        Self {
            rendy: PersonaProfile {
                system_prompt: RENDY_SYSTEM_PROMPT,
                card: PersonaCard {
                    id: Persona::Rendy,
                    name: "Rendy",
                    role: "Data Analyst Tutor",
                    specialties: &["SQL", "Excel", "Tableau", "Business Intelligence"],
                    teaching_style: "Practical, business-focused, encouraging",
                    avatar: "/avatars/rendy.png",
                },
            },
            abdul: PersonaProfile {
                system_prompt: ABDUL_SYSTEM_PROMPT,
                card: PersonaCard {
                    id: Persona::Abdul,
                    name: "Abdul",
                    role: "Data Scientist Tutor",
                    specialties: &["Python", "Machine Learning", "Statistics", "Deep Learning"],
                    teaching_style: "Rigorous, research-oriented, challenging",
                    avatar: "/avatars/abdul.png",
                },
            },
        }
    }

    pub fn profile(&self, persona: Persona) -> &PersonaProfile {
        match persona {
            Persona::Rendy => &self.rendy,
            Persona::Abdul => &self.abdul,
        }
    }

    pub fn system_prompt(&self, persona: Persona) -> &'static str {
        self.profile(persona).system_prompt
    }

    /// Catalog entries in declaration order.
    pub fn cards(&self) -> Vec<&PersonaCard> {
        Persona::ALL
            .into_iter()
            .map(|p| &self.profile(p).card)
            .collect()
    }
}
