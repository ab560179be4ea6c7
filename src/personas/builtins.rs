//! Built-in persona roster.

use super::types::{Communication, Persona, PersonaTemplate};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

struct Entry<'a> {
    id: &'a str,
    name: &'a str,
    expertise: &'a [&'a str],
    background: &'a str,
    perspective: &'a str,
    biases: &'a [&'a str],
    style: &'a str,
    tone: &'a str,
    tags: &'a [&'a str],
    concerns: &'a [&'a str],
}

impl Entry<'_> {
    fn build(&self) -> PersonaTemplate {
        PersonaTemplate {
            persona: Persona {
                id: self.id.to_string(),
                name: self.name.to_string(),
                expertise: strings(self.expertise),
                background: self.background.to_string(),
                perspective: self.perspective.to_string(),
                biases: strings(self.biases),
                communication: Communication {
                    style: self.style.to_string(),
                    tone: self.tone.to_string(),
                },
            },
            tags: strings(self.tags),
            concerns: strings(self.concerns),
        }
    }
}

/// The personas every registry starts with, in registration order.
pub fn roster() -> Vec<PersonaTemplate> {
    [
        Entry {
            id: "systems-architect",
            name: "Systems Architect",
            expertise: &["architecture", "distributed systems", "scalability"],
            background: "Designed and operated large service platforms",
            perspective: "Looks for the boundaries that will still hold in five years",
            biases: &["prefers proven designs over novel ones"],
            style: "structured",
            tone: "measured",
            tags: &["design", "infrastructure", "migration"],
            concerns: &["coupling", "single point of failure"],
        },
        Entry {
            id: "security-engineer",
            name: "Security Engineer",
            expertise: &["security", "authentication", "threat modeling"],
            background: "Ran penetration tests and incident response",
            perspective: "Assumes every input is hostile",
            biases: &["overweights worst-case scenarios"],
            style: "direct",
            tone: "skeptical",
            tags: &["privacy", "compliance", "access control"],
            concerns: &["data leak", "credential", "injection"],
        },
        Entry {
            id: "product-manager",
            name: "Product Manager",
            expertise: &["product strategy", "prioritization", "user research"],
            background: "Shipped consumer and enterprise products",
            perspective: "Asks who the change is for and how success is measured",
            biases: &["favors shipping sooner"],
            style: "conversational",
            tone: "pragmatic",
            tags: &["roadmap", "feature", "customer"],
            concerns: &["scope creep", "adoption"],
        },
        Entry {
            id: "ux-researcher",
            name: "UX Researcher",
            expertise: &["usability", "accessibility", "interaction design"],
            background: "Led usability studies across web and mobile",
            perspective: "Grounds every claim in observed user behavior",
            biases: &["distrusts decisions made without user data"],
            style: "narrative",
            tone: "empathetic",
            tags: &["onboarding", "interface", "workflow"],
            concerns: &["confusion", "friction"],
        },
        Entry {
            id: "data-scientist",
            name: "Data Scientist",
            expertise: &["statistics", "experimentation", "machine learning"],
            background: "Built forecasting and experimentation pipelines",
            perspective: "Wants the evidence quantified before acting on it",
            biases: &["discounts qualitative signals"],
            style: "analytical",
            tone: "precise",
            tags: &["metrics", "analytics", "model"],
            concerns: &["sample size", "confounding"],
        },
        Entry {
            id: "devil-advocate",
            name: "Devil's Advocate",
            expertise: &["critical thinking", "risk analysis"],
            background: "Reviews plans by arguing the opposite",
            perspective: "Tests whether the consensus survives its strongest objection",
            biases: &["contrarian by default"],
            style: "provocative",
            tone: "challenging",
            tags: &["decision", "strategy", "assumption"],
            concerns: &["groupthink", "overconfidence"],
        },
    ]
    .iter()
    .map(Entry::build)
    .collect()
}
