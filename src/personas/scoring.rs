//! Keyword relevance scoring for persona recommendation.

use super::types::PersonaTemplate;

/// Scores how relevant a persona template is to a topic.
///
/// Implementations must be pure: the same topic and template always produce
/// the same score.
pub trait PersonaScorer: Send + Sync {
    fn score(&self, topic: &str, template: &PersonaTemplate) -> u32;
}

/// Points awarded per kind of match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    /// Topic mentions the persona's name.
    pub name: u32,
    /// Per expertise term mentioned in the topic.
    pub expertise: u32,
    /// Per tag mentioned in the topic.
    pub tag: u32,
    /// Per concern mentioned in the topic.
    pub concern: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            name: 3,
            expertise: 2,
            tag: 2,
            concern: 1,
        }
    }
}

/// Case-insensitive substring matching against a fixed weight table.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordScorer {
    pub weights: ScoreWeights,
}

impl KeywordScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }
}

fn mentions(topic: &str, keyword: &str) -> bool {
    let keyword = keyword.trim().to_lowercase();
    !keyword.is_empty() && topic.contains(&keyword)
}

fn count_mentions(topic: &str, keywords: &[String]) -> u32 {
    keywords.iter().filter(|k| mentions(topic, k)).count() as u32
}

impl PersonaScorer for KeywordScorer {
    fn score(&self, topic: &str, template: &PersonaTemplate) -> u32 {
        let topic = topic.to_lowercase();
        let persona = &template.persona;

        let name = if mentions(&topic, &persona.name) {
            self.weights.name
        } else {
            0
        };

        name + self.weights.expertise * count_mentions(&topic, &persona.expertise)
            + self.weights.tag * count_mentions(&topic, &template.tags)
            + self.weights.concern * count_mentions(&topic, &template.concerns)
    }
}
