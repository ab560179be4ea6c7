//! Multi-persona deliberation.
//!
//! A council session moves forward through fixed stages while personas take
//! turns adding contributions. The caller resubmits the whole deliberation on
//! every call; the engine keeps the personas and contributions it has already
//! accepted and checks each call against them:
//!
//! - stages and iterations never move backwards
//! - a persona cannot change once introduced
//! - every contribution comes from a persona in this call's roster
//! - resubmitted contributions, with or without ids, are not recorded twice
//! - `referenceIds` point at contributions the session already holds
//! - the next speaker differs from the current one

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{EngineResult, InvariantError};
use crate::personas::{Persona, PersonaRegistry};
use crate::session::SessionStore;
use crate::validation::{validate, Record, Validate, WireEnum};
use crate::wire_enum;

wire_enum! {
    /// Deliberation stages in the order they must be visited.
    pub enum DeliberationStage {
        ProblemDefinition => "problem-definition",
        Ideation => "ideation",
        Critique => "critique",
        Integration => "integration",
        Decision => "decision",
        Reflection => "reflection",
    }
}

wire_enum! {
    pub enum ContributionType {
        Observation => "observation",
        Question => "question",
        Insight => "insight",
        Concern => "concern",
        Suggestion => "suggestion",
        Challenge => "challenge",
        Synthesis => "synthesis",
    }
}

/// One persona's input to the deliberation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub persona_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: ContributionType,
    pub confidence: f64,
    #[serde(default)]
    pub reference_ids: Vec<String>,
}

impl Contribution {
    /// Whether `other` carries the same input, ids aside.
    fn restates(&self, other: &Contribution) -> bool {
        self.persona_id == other.persona_id
            && self.content == other.content
            && self.kind == other.kind
            && self.confidence == other.confidence
            && self.reference_ids == other.reference_ids
    }
}

impl Validate for Contribution {
    fn read(r: &Record<'_>) -> Self {
        Self {
            id: r.optional_str("id"),
            persona_id: r.required_str("personaId"),
            content: r.required_str("content"),
            kind: r.enumeration("type"),
            confidence: r.unit_interval("confidence"),
            reference_ids: r.optional_string_list("referenceIds"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub persona_id: String,
    pub position: String,
    pub arguments: Vec<String>,
}

impl Validate for Position {
    fn read(r: &Record<'_>) -> Self {
        Self {
            persona_id: r.required_str("personaId"),
            position: r.required_str("position"),
            arguments: r.string_list("arguments", false),
        }
    }
}

/// A point the personas have not converged on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disagreement {
    pub topic: String,
    pub positions: Vec<Position>,
}

impl Validate for Disagreement {
    fn read(r: &Record<'_>) -> Self {
        Self {
            topic: r.required_str("topic"),
            positions: r.list("positions", false),
        }
    }
}

/// The full deliberation record submitted on each council call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deliberation {
    pub topic: String,
    pub personas: Vec<Persona>,
    pub contributions: Vec<Contribution>,
    pub stage: DeliberationStage,
    pub active_persona_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_persona_id: Option<String>,
    #[serde(default)]
    pub consensus_points: Vec<String>,
    #[serde(default)]
    pub disagreements: Vec<Disagreement>,
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub open_questions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_recommendation: Option<String>,
    pub session_id: String,
    pub iteration: u64,
    pub next_contribution_needed: bool,
}

impl Validate for Deliberation {
    fn read(r: &Record<'_>) -> Self {
        Self {
            topic: r.required_str("topic"),
            personas: r.list("personas", true),
            contributions: r.list("contributions", false),
            stage: r.enumeration("stage"),
            active_persona_id: r.required_str("activePersonaId"),
            next_persona_id: r.optional_str("nextPersonaId"),
            consensus_points: r.optional_string_list("consensusPoints"),
            disagreements: r.optional_list("disagreements").unwrap_or_default(),
            key_insights: r.optional_string_list("keyInsights"),
            open_questions: r.optional_string_list("openQuestions"),
            final_recommendation: r.optional_str("finalRecommendation"),
            session_id: r.required_str("sessionId"),
            iteration: r.non_negative_int("iteration"),
            next_contribution_needed: r.required_bool("nextContributionNeeded"),
        }
    }
}

/// Accepted state of one council session.
#[derive(Debug, Clone, Default)]
pub struct CouncilSession {
    personas: Vec<Persona>,
    contributions: Vec<Contribution>,
    contribution_ids: HashSet<String>,
    stage: Option<DeliberationStage>,
    iteration: Option<u64>,
    sequence: u64,
}

impl CouncilSession {
    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    pub fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }

    pub fn stage(&self) -> Option<DeliberationStage> {
        self.stage
    }

    fn persona(&self, id: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.id == id)
    }

    /// Position of an unmatched recorded contribution that `contribution`
    /// repeats, ignoring ids.
    fn restatement_of(&self, contribution: &Contribution, taken: &HashSet<usize>) -> Option<usize> {
        self.contributions
            .iter()
            .enumerate()
            .find(|(pos, recorded)| !taken.contains(pos) && recorded.restates(contribution))
            .map(|(pos, _)| pos)
    }

    fn next_id(&mut self) -> String {
        loop {
            self.sequence += 1;
            let id = format!("contrib-{}", self.sequence);
            if !self.contribution_ids.contains(&id) {
                return id;
            }
        }
    }

    /// Check `deliberation` against the session and commit it.
    ///
    /// Returns the number of contributions appended.
    fn apply(&mut self, deliberation: &Deliberation) -> Result<usize, InvariantError> {
        if let Some(current) = self.stage {
            if deliberation.stage.ordinal() < current.ordinal() {
                return Err(InvariantError::StageRegression {
                    current: current.to_string(),
                    requested: deliberation.stage.to_string(),
                });
            }
        }
        if let Some(current) = self.iteration {
            if deliberation.iteration < current {
                return Err(InvariantError::IterationRegression {
                    current,
                    requested: deliberation.iteration,
                });
            }
        }

        for persona in &deliberation.personas {
            if self.persona(&persona.id).is_some_and(|known| known != persona) {
                return Err(InvariantError::PersonaMutated {
                    persona_id: persona.id.clone(),
                });
            }
        }

        // Membership is judged against this call's roster only; earlier
        // personas are remembered solely to detect mutation.
        let known: HashSet<&str> = deliberation
            .personas
            .iter()
            .map(|p| p.id.as_str())
            .collect();

        if !known.contains(deliberation.active_persona_id.as_str()) {
            return Err(InvariantError::UnknownPersona {
                field: "activePersonaId".to_string(),
                persona_id: deliberation.active_persona_id.clone(),
            });
        }

        if let Some(next) = &deliberation.next_persona_id {
            let reason = if *next == deliberation.active_persona_id {
                Some("the next persona must differ from the active persona")
            } else if !known.contains(next.as_str()) {
                Some("the next persona is not part of the deliberation")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(InvariantError::TurnTaking {
                    persona_id: next.clone(),
                    reason: reason.to_string(),
                });
            }
        }

        for (i, contribution) in deliberation.contributions.iter().enumerate() {
            if !known.contains(contribution.persona_id.as_str()) {
                return Err(InvariantError::UnknownPersona {
                    field: format!("contributions[{}].personaId", i),
                    persona_id: contribution.persona_id.clone(),
                });
            }
        }

        let mut batch: HashSet<String> = HashSet::new();
        let mut restated: HashSet<usize> = HashSet::new();
        let mut accepted = Vec::new();
        for (i, contribution) in deliberation.contributions.iter().enumerate() {
            let id = match &contribution.id {
                Some(id) if !batch.insert(id.clone()) => {
                    return Err(InvariantError::DuplicateId {
                        field: format!("contributions[{}].id", i),
                        id: id.clone(),
                    });
                }
                // Already recorded on an earlier call.
                Some(id) if self.contribution_ids.contains(id) => continue,
                Some(id) => id.clone(),
                None => {
                    // Id-less contributions are matched to recorded ones by content.
                    if let Some(pos) = self.restatement_of(contribution, &restated) {
                        restated.insert(pos);
                        continue;
                    }
                    let id = self.next_id();
                    batch.insert(id.clone());
                    id
                }
            };

            for reference in &contribution.reference_ids {
                let resolved = *reference != id
                    && (self.contribution_ids.contains(reference) || batch.contains(reference));
                if !resolved {
                    return Err(InvariantError::DanglingReference {
                        field: format!("contributions[{}].referenceIds", i),
                        id: reference.clone(),
                    });
                }
            }

            self.contribution_ids.insert(id.clone());
            accepted.push(Contribution {
                id: Some(id),
                ..contribution.clone()
            });
        }

        for persona in &deliberation.personas {
            if self.persona(&persona.id).is_none() {
                self.personas.push(persona.clone());
            }
        }

        let appended = accepted.len();
        self.contributions.extend(accepted);
        self.stage = Some(deliberation.stage);
        self.iteration = Some(deliberation.iteration);
        Ok(appended)
    }
}

/// Projection returned by the council tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouncilResult {
    pub session_id: String,
    pub topic: String,
    pub stage: DeliberationStage,
    pub next_stage: Option<DeliberationStage>,
    pub iteration: u64,
    pub active_persona_id: String,
    pub next_persona_id: Option<String>,
    pub persona_count: usize,
    pub contribution_count: usize,
    pub consensus_point_count: usize,
    pub disagreement_count: usize,
    pub key_insight_count: usize,
    pub open_question_count: usize,
    pub has_final_recommendation: bool,
    pub recommended_personas: Vec<String>,
    pub next_contribution_needed: bool,
}

/// Collaborative reasoning tool handler.
pub struct CouncilTool {
    sessions: SessionStore<CouncilSession>,
    registry: Arc<PersonaRegistry>,
    recommendation_limit: usize,
}

impl CouncilTool {
    pub fn new(registry: Arc<PersonaRegistry>, recommendation_limit: usize) -> Self {
        Self {
            sessions: SessionStore::new("council"),
            registry,
            recommendation_limit,
        }
    }

    /// Validate a deliberation and fold it into its session.
    pub async fn process(&self, arguments: &Value) -> EngineResult<CouncilResult> {
        let deliberation: Deliberation = validate(arguments)?;

        let mut seen = HashSet::new();
        if let Some(dup) = deliberation
            .personas
            .iter()
            .find(|p| !seen.insert(p.id.as_str()))
        {
            return Err(InvariantError::DuplicateId {
                field: "personas".to_string(),
                id: dup.id.clone(),
            }
            .into());
        }

        let (appended, persona_count, contribution_count) = self
            .sessions
            .update(&deliberation.session_id, |session| {
                let appended = session.apply(&deliberation)?;
                Ok::<_, InvariantError>((
                    appended,
                    deliberation.personas.len(),
                    session.contributions.len(),
                ))
            })
            .await?;

        debug!(
            session_id = %deliberation.session_id,
            appended,
            "Contributions recorded"
        );

        let recommended_personas = self
            .registry
            .recommend(&deliberation.topic, self.recommendation_limit)
            .into_iter()
            .map(|m| m.id)
            .collect();

        info!(
            session_id = %deliberation.session_id,
            stage = %deliberation.stage,
            iteration = deliberation.iteration,
            "Deliberation advanced"
        );

        Ok(CouncilResult {
            session_id: deliberation.session_id,
            topic: deliberation.topic,
            stage: deliberation.stage,
            next_stage: deliberation.stage.successor(),
            iteration: deliberation.iteration,
            active_persona_id: deliberation.active_persona_id,
            next_persona_id: deliberation.next_persona_id,
            persona_count,
            contribution_count,
            consensus_point_count: deliberation.consensus_points.len(),
            disagreement_count: deliberation.disagreements.len(),
            key_insight_count: deliberation.key_insights.len(),
            open_question_count: deliberation.open_questions.len(),
            has_final_recommendation: deliberation.final_recommendation.is_some(),
            recommended_personas,
            next_contribution_needed: deliberation.next_contribution_needed,
        })
    }

    /// Snapshot of a council session.
    pub async fn session(&self, session_id: &str) -> Option<CouncilSession> {
        self.sessions.get(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn persona(id: &str) -> Value {
        json!({
            "id": id,
            "name": format!("Persona {}", id),
            "expertise": ["testing"],
            "background": "QA lead",
            "perspective": "What could break?",
            "biases": [],
            "communication": {"style": "direct", "tone": "calm"}
        })
    }

    fn deliberation(personas: &[&str], stage: &str) -> Value {
        json!({
            "topic": "Should we adopt a monorepo?",
            "personas": personas.iter().map(|id| persona(id)).collect::<Vec<_>>(),
            "contributions": [],
            "stage": stage,
            "activePersonaId": personas[0],
            "sessionId": "s1",
            "iteration": 0,
            "nextContributionNeeded": true
        })
    }

    fn tool() -> CouncilTool {
        CouncilTool::new(Arc::new(PersonaRegistry::new()), 3)
    }

    #[test]
    fn test_stage_successor_chain() {
        use DeliberationStage::*;
        assert_eq!(ProblemDefinition.successor(), Some(Ideation));
        assert_eq!(Decision.successor(), Some(Reflection));
        assert_eq!(Reflection.successor(), None);
    }

    #[tokio::test]
    async fn test_contribution_from_unknown_persona_rejected() {
        let tool = tool();
        let mut input = deliberation(&["p2", "p3"], "ideation");
        input["contributions"] = json!([
            {"personaId": "p1", "content": "Split by team", "type": "insight", "confidence": 0.8}
        ]);

        let err = tool.process(&input).await.unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_PERSONA");
        assert_eq!(err.details()["field"], "contributions[0].personaId");
        assert!(tool.session("s1").await.is_none());
    }

    #[tokio::test]
    async fn test_active_persona_must_be_known() {
        let tool = tool();
        let mut input = deliberation(&["p1"], "ideation");
        input["activePersonaId"] = json!("p9");

        let err = tool.process(&input).await.unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_PERSONA");
        assert_eq!(err.details()["field"], "activePersonaId");
    }

    #[tokio::test]
    async fn test_stage_regression_rejected() {
        let tool = tool();
        tool.process(&deliberation(&["p1"], "critique")).await.unwrap();

        let err = tool
            .process(&deliberation(&["p1"], "ideation"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "STAGE_REGRESSION");

        // Same stage again is fine.
        tool.process(&deliberation(&["p1"], "critique")).await.unwrap();
    }

    #[tokio::test]
    async fn test_iteration_regression_rejected() {
        let tool = tool();
        let mut input = deliberation(&["p1"], "ideation");
        input["iteration"] = json!(4);
        tool.process(&input).await.unwrap();

        input["iteration"] = json!(3);
        let err = tool.process(&input).await.unwrap_err();
        assert_eq!(err.code(), "ITERATION_REGRESSION");
    }

    #[tokio::test]
    async fn test_duplicate_persona_ids_rejected() {
        let err = tool()
            .process(&deliberation(&["p1", "p1"], "ideation"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "DUPLICATE_ID");
    }

    #[tokio::test]
    async fn test_persona_cannot_change_once_introduced() {
        let tool = tool();
        let mut input = deliberation(&["p1"], "ideation");
        tool.process(&input).await.unwrap();

        input["personas"][0]["perspective"] = json!("Ship it");
        let err = tool.process(&input).await.unwrap_err();
        assert_eq!(err.code(), "PERSONA_MUTATED");
    }

    #[tokio::test]
    async fn test_next_persona_must_differ_and_be_known() {
        let tool = tool();
        let mut input = deliberation(&["p1", "p2"], "ideation");

        input["nextPersonaId"] = json!("p1");
        let err = tool.process(&input).await.unwrap_err();
        assert_eq!(err.code(), "TURN_TAKING");

        input["nextPersonaId"] = json!("p7");
        let err = tool.process(&input).await.unwrap_err();
        assert_eq!(err.code(), "TURN_TAKING");

        input["nextPersonaId"] = json!("p2");
        let result = tool.process(&input).await.unwrap();
        assert_eq!(result.next_persona_id.as_deref(), Some("p2"));
    }

    #[tokio::test]
    async fn test_references_resolve_against_history_and_batch() {
        let tool = tool();
        let mut input = deliberation(&["p1", "p2"], "ideation");
        input["contributions"] = json!([
            {"personaId": "p1", "content": "One repo", "type": "suggestion", "confidence": 0.6},
            {"personaId": "p2", "content": "CI cost?", "type": "question", "confidence": 0.5,
             "referenceIds": ["contrib-1"]}
        ]);
        let result = tool.process(&input).await.unwrap();
        assert_eq!(result.contribution_count, 2);

        input["contributions"] = json!([
            {"personaId": "p1", "content": "Cache builds", "type": "insight", "confidence": 0.7,
             "referenceIds": ["contrib-2", "contrib-9"]}
        ]);
        let err = tool.process(&input).await.unwrap_err();
        assert_eq!(err.code(), "DANGLING_REFERENCE");
        assert_eq!(err.details()["id"], "contrib-9");

        let session = tool.session("s1").await.unwrap();
        assert_eq!(session.contributions().len(), 2);
    }

    #[tokio::test]
    async fn test_resubmitted_contributions_are_not_appended() {
        let tool = tool();
        let mut input = deliberation(&["p1", "p2"], "ideation");
        input["contributions"] = json!([
            {"id": "c1", "personaId": "p1", "content": "One repo", "type": "suggestion", "confidence": 0.6}
        ]);
        tool.process(&input).await.unwrap();

        input["contributions"] = json!([
            {"id": "c1", "personaId": "p1", "content": "One repo", "type": "suggestion", "confidence": 0.6},
            {"id": "c2", "personaId": "p2", "content": "Agreed", "type": "observation", "confidence": 0.9,
             "referenceIds": ["c1"]}
        ]);
        let result = tool.process(&input).await.unwrap();
        assert_eq!(result.contribution_count, 2);
    }

    #[tokio::test]
    async fn test_resubmitted_contributions_without_ids_are_not_appended() {
        let tool = tool();
        let first = json!({"personaId": "p1", "content": "One repo", "type": "suggestion", "confidence": 0.6});
        let second = json!({"personaId": "p2", "content": "CI cost?", "type": "question", "confidence": 0.5});

        let mut input = deliberation(&["p1", "p2"], "ideation");
        input["contributions"] = json!([first.clone()]);
        assert_eq!(tool.process(&input).await.unwrap().contribution_count, 1);

        input["contributions"] = json!([first.clone(), second.clone()]);
        assert_eq!(tool.process(&input).await.unwrap().contribution_count, 2);

        input["contributions"] = json!([first, second]);
        let result = tool.process(&input).await.unwrap();
        assert_eq!(result.contribution_count, 2);

        let session = tool.session("s1").await.unwrap();
        let ids: Vec<_> = session
            .contributions()
            .iter()
            .map(|c| c.id.clone().unwrap())
            .collect();
        assert_eq!(ids, vec!["contrib-1".to_string(), "contrib-2".to_string()]);
    }

    #[tokio::test]
    async fn test_repeated_new_contribution_is_recorded_each_time() {
        let tool = tool();
        let same = json!({"personaId": "p1", "content": "+1", "type": "observation", "confidence": 0.5});
        let mut input = deliberation(&["p1"], "ideation");
        input["contributions"] = json!([same.clone()]);
        tool.process(&input).await.unwrap();

        // One restatement plus one genuinely new, identical remark.
        input["contributions"] = json!([same.clone(), same]);
        let result = tool.process(&input).await.unwrap();
        assert_eq!(result.contribution_count, 2);
    }

    #[tokio::test]
    async fn test_membership_uses_current_roster_only() {
        let tool = tool();
        tool.process(&deliberation(&["p1"], "ideation")).await.unwrap();

        let mut input = deliberation(&["p2", "p3"], "ideation");
        input["contributions"] = json!([
            {"personaId": "p1", "content": "Still here", "type": "insight", "confidence": 0.8}
        ]);
        let err = tool.process(&input).await.unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_PERSONA");
        assert_eq!(err.details()["field"], "contributions[0].personaId");

        let mut input = deliberation(&["p2", "p3"], "ideation");
        input["activePersonaId"] = json!("p1");
        let err = tool.process(&input).await.unwrap_err();
        assert_eq!(err.details()["field"], "activePersonaId");

        let mut input = deliberation(&["p2", "p3"], "ideation");
        input["nextPersonaId"] = json!("p1");
        let err = tool.process(&input).await.unwrap_err();
        assert_eq!(err.code(), "TURN_TAKING");
    }

    #[tokio::test]
    async fn test_duplicate_contribution_ids_in_one_call_rejected() {
        let tool = tool();
        let mut input = deliberation(&["p1"], "ideation");
        input["contributions"] = json!([
            {"id": "c1", "personaId": "p1", "content": "A", "type": "insight", "confidence": 0.5},
            {"id": "c1", "personaId": "p1", "content": "B", "type": "insight", "confidence": 0.5}
        ]);

        let err = tool.process(&input).await.unwrap_err();
        assert_eq!(err.code(), "DUPLICATE_ID");
        assert_eq!(err.details()["field"], "contributions[1].id");
    }

    #[tokio::test]
    async fn test_validation_lists_nested_persona_fields() {
        let tool = tool();
        let mut input = deliberation(&["p1", "p2"], "ideation");
        input["personas"][1]["communication"] = json!({"style": "direct"});
        input["iteration"] = json!(-1);

        let err = tool.process(&input).await.unwrap_err();
        let EngineError::Validation(err) = err else {
            panic!("expected validation error");
        };
        assert!(err.mentions("personas[1].communication.tone"));
        assert!(err.mentions("iteration"));
    }

    #[tokio::test]
    async fn test_projection_counts_and_recommendations() {
        let tool = tool();
        let mut input = deliberation(&["p1", "p2"], "decision");
        input["topic"] = json!("Security review of the authentication service");
        input["consensusPoints"] = json!(["Rotate keys"]);
        input["disagreements"] = json!([{
            "topic": "Timeline",
            "positions": [
                {"personaId": "p1", "position": "Now", "arguments": ["Risk"]},
                {"personaId": "p2", "position": "Later", "arguments": []}
            ]
        }]);
        input["finalRecommendation"] = json!("Rotate this quarter");
        input["nextContributionNeeded"] = json!(false);

        let result = tool.process(&input).await.unwrap();
        assert_eq!(result.stage, DeliberationStage::Decision);
        assert_eq!(result.next_stage, Some(DeliberationStage::Reflection));
        assert_eq!(result.persona_count, 2);
        assert_eq!(result.consensus_point_count, 1);
        assert_eq!(result.disagreement_count, 1);
        assert!(result.has_final_recommendation);
        assert!(!result.next_contribution_needed);
        assert_eq!(result.recommended_personas[0], "security-engineer");
        assert!(result.recommended_personas.len() <= 3);
    }

    #[test]
    fn test_deliberation_round_trip() {
        let mut input = deliberation(&["p1", "p2"], "integration");
        input["contributions"] = json!([
            {"id": "c1", "personaId": "p1", "content": "Merge", "type": "synthesis",
             "confidence": 0.75, "referenceIds": []}
        ]);
        input["nextPersonaId"] = json!("p2");
        input["keyInsights"] = json!(["Tooling matters"]);

        let first: Deliberation = validate(&input).unwrap();
        let serialized = serde_json::to_value(&first).unwrap();
        let second: Deliberation = validate(&serialized).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
