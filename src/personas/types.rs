//! Data types for deliberation personas.

use serde::{Deserialize, Serialize};

use crate::validation::{Record, Validate};

/// A participant in a council deliberation.
///
/// Once a persona has been introduced into a deliberation its content is
/// fixed; resubmitting the same id with different fields is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub id: String,
    pub name: String,
    pub expertise: Vec<String>,
    pub background: String,
    pub perspective: String,
    pub biases: Vec<String>,
    pub communication: Communication,
}

/// How a persona expresses itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Communication {
    pub style: String,
    pub tone: String,
}

impl Validate for Communication {
    fn read(r: &Record<'_>) -> Self {
        Self {
            style: r.required_str("style"),
            tone: r.required_str("tone"),
        }
    }
}

impl Validate for Persona {
    fn read(r: &Record<'_>) -> Self {
        let communication = match r.object("communication") {
            Some(c) => Communication::read(&c),
            None => Communication {
                style: String::new(),
                tone: String::new(),
            },
        };

        Self {
            id: r.required_str("id"),
            name: r.required_str("name"),
            expertise: r.string_list("expertise", true),
            background: r.required_str("background"),
            perspective: r.required_str("perspective"),
            biases: r.string_list("biases", false),
            communication,
        }
    }
}

/// A registered persona plus the keywords used to recommend it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaTemplate {
    /// The persona itself.
    pub persona: Persona,
    /// Topic tags the persona is suited for.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Concerns the persona habitually raises.
    #[serde(default)]
    pub concerns: Vec<String>,
}

/// A recommended persona with its relevance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaMatch {
    pub id: String,
    pub name: String,
    pub score: u32,
}
