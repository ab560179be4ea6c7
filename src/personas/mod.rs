//! Personas for council deliberations.
//!
//! This module provides:
//! - `Persona`: a deliberation participant, validated from caller input
//! - `PersonaRegistry`: an injectable roster of persona templates
//! - `PersonaScorer`: pluggable topic relevance scoring for recommendations
//! - A built-in roster registered with every new registry

mod builtins;
mod registry;
mod scoring;
mod types;

pub use builtins::roster;
pub use registry::PersonaRegistry;
pub use scoring::{KeywordScorer, PersonaScorer, ScoreWeights};
pub use types::*;
