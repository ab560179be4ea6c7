//! Persona registry with keyword-based recommendation.

use std::sync::{PoisonError, RwLock};

use tracing::{debug, error};

use super::builtins;
use super::scoring::{KeywordScorer, PersonaScorer};
use super::types::{Persona, PersonaMatch, PersonaTemplate};

/// Registry of persona templates available to council deliberations.
///
/// Built-in personas are registered on creation. Registration order is kept
/// and decides ties when recommending.
pub struct PersonaRegistry {
    templates: RwLock<Vec<PersonaTemplate>>,
    scorer: Box<dyn PersonaScorer>,
}

impl PersonaRegistry {
    /// Create a registry holding the built-in roster.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register_builtins();
        registry
    }

    /// Create a registry with no personas.
    pub fn empty() -> Self {
        Self::with_scorer(Box::new(KeywordScorer::default()))
    }

    /// Create an empty registry that ranks with a custom scorer.
    pub fn with_scorer(scorer: Box<dyn PersonaScorer>) -> Self {
        Self {
            templates: RwLock::new(Vec::new()),
            scorer,
        }
    }

    /// Register a template.
    ///
    /// # Errors
    /// Returns error if the id or name is blank, or the id is taken.
    pub fn register(&self, template: PersonaTemplate) -> Result<(), String> {
        let persona = &template.persona;
        if persona.id.trim().is_empty() {
            return Err("Persona ID is required".to_string());
        }
        if persona.name.trim().is_empty() {
            return Err("Persona name is required".to_string());
        }

        let mut templates = self
            .templates
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if templates.iter().any(|t| t.persona.id == persona.id) {
            return Err(format!("Persona '{}' already exists", persona.id));
        }

        templates.push(template);
        Ok(())
    }

    /// Get a persona by id.
    pub fn get(&self, id: &str) -> Option<Persona> {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|t| t.persona.id == id)
            .map(|t| t.persona.clone())
    }

    /// All personas in registration order.
    pub fn list(&self) -> Vec<Persona> {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|t| t.persona.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Up to `limit` personas relevant to `topic`, best first.
    pub fn recommend(&self, topic: &str, limit: usize) -> Vec<PersonaMatch> {
        self.recommend_with(self.scorer.as_ref(), topic, limit)
    }

    /// Like [`recommend`](Self::recommend) with an explicit scorer.
    ///
    /// Templates scoring zero are dropped. The sort is stable, so equal
    /// scores keep registration order.
    pub fn recommend_with(
        &self,
        scorer: &dyn PersonaScorer,
        topic: &str,
        limit: usize,
    ) -> Vec<PersonaMatch> {
        let templates = self
            .templates
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let mut matches: Vec<PersonaMatch> = templates
            .iter()
            .map(|t| PersonaMatch {
                id: t.persona.id.clone(),
                name: t.persona.name.clone(),
                score: scorer.score(topic, t),
            })
            .filter(|m| m.score > 0)
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(limit);

        debug!(topic_len = topic.len(), matched = matches.len(), "Recommended personas");
        matches
    }

    fn register_builtins(&self) {
        for template in builtins::roster() {
            let id = template.persona.id.clone();
            if let Err(e) = self.register(template) {
                error!(
                    persona = %id,
                    error = %e,
                    "Failed to register builtin persona - this indicates a programming error"
                );
            }
        }
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
