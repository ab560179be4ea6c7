//! Staged decision analysis.
//!
//! The engine does not compute expected values, weighted scores or quadrants
//! itself. It carries the caller's numbers and checks that they are
//! consistent: ids are unique, every per-option figure names a declared
//! option, and Eisenhower quadrants agree with their urgency and importance.
//! Stages advance per `decisionId` and never move backwards.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{EngineResult, InvariantError};
use crate::session::SessionStore;
use crate::validation::{validate, Record, Validate, WireEnum};
use crate::wire_enum;

wire_enum! {
    /// Methodology the caller intends to apply. Advisory only.
    pub enum AnalysisType {
        ProsCons => "pros-cons",
        WeightedCriteria => "weighted-criteria",
        DecisionTree => "decision-tree",
        ExpectedValue => "expected-value",
        ScenarioAnalysis => "scenario-analysis",
        EisenhowerMatrix => "eisenhower-matrix",
        CostBenefit => "cost-benefit",
        RiskAssessment => "risk-assessment",
        Reversibility => "reversibility",
        RegretMinimization => "regret-minimization",
    }
}

wire_enum! {
    /// Decision stages in the order they must be visited.
    pub enum DecisionStage {
        ProblemDefinition => "problem-definition",
        OptionsGeneration => "options-generation",
        CriteriaDefinition => "criteria-definition",
        Evaluation => "evaluation",
        SensitivityAnalysis => "sensitivity-analysis",
        Decision => "decision",
    }
}

wire_enum! {
    pub enum RiskTolerance {
        RiskAverse => "risk-averse",
        RiskNeutral => "risk-neutral",
        RiskSeeking => "risk-seeking",
    }
}

wire_enum! {
    pub enum EisenhowerQuadrant {
        DoFirst => "do-first",
        Schedule => "schedule",
        Delegate => "delegate",
        Eliminate => "eliminate",
    }
}

/// Urgency and importance scores at or above this are "high".
pub const EISENHOWER_HIGH: f64 = 3.0;

/// Quadrant implied by urgency and importance on the 1-5 scale.
pub fn classify(urgency: f64, importance: f64) -> EisenhowerQuadrant {
    match (urgency >= EISENHOWER_HIGH, importance >= EISENHOWER_HIGH) {
        (true, true) => EisenhowerQuadrant::DoFirst,
        (false, true) => EisenhowerQuadrant::Schedule,
        (true, false) => EisenhowerQuadrant::Delegate,
        (false, false) => EisenhowerQuadrant::Eliminate,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOption {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Validate for DecisionOption {
    fn read(r: &Record<'_>) -> Self {
        Self {
            id: r.required_str("id"),
            name: r.required_str("name"),
            description: r.required_str("description"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    pub name: String,
    pub description: String,
    pub weight: f64,
}

impl Validate for Criterion {
    fn read(r: &Record<'_>) -> Self {
        Self {
            id: r.required_str("id"),
            name: r.required_str("name"),
            description: r.required_str("description"),
            weight: r.non_negative_number("weight"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub id: String,
    pub description: String,
    pub probability: f64,
    pub value: f64,
    pub option_id: String,
    pub confidence_in_estimate: f64,
}

impl Validate for Outcome {
    fn read(r: &Record<'_>) -> Self {
        Self {
            id: r.required_str("id"),
            description: r.required_str("description"),
            probability: r.unit_interval("probability"),
            value: r.number("value"),
            option_id: r.required_str("optionId"),
            confidence_in_estimate: r.unit_interval("confidenceInEstimate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EisenhowerEntry {
    pub option_id: String,
    pub urgency: f64,
    pub importance: f64,
    pub quadrant: EisenhowerQuadrant,
}

impl Validate for EisenhowerEntry {
    fn read(r: &Record<'_>) -> Self {
        Self {
            option_id: r.required_str("optionId"),
            urgency: r.number_in("urgency", 1.0, 5.0),
            importance: r.number_in("importance", 1.0, 5.0),
            quadrant: r.enumeration("quadrant"),
        }
    }
}

/// One submission of a decision analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionFrame {
    pub decision_statement: String,
    pub options: Vec<DecisionOption>,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
    pub analysis_type: AnalysisType,
    pub stage: DecisionStage,
    #[serde(default)]
    pub possible_outcomes: Vec<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default)]
    pub stakeholders: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_horizon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_tolerance: Option<RiskTolerance>,
    #[serde(default)]
    pub expected_values: BTreeMap<String, f64>,
    #[serde(default)]
    pub multi_criteria_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub sensitivity_insights: Vec<String>,
    #[serde(default)]
    pub eisenhower_classification: Vec<EisenhowerEntry>,
    pub decision_id: String,
    pub iteration: u64,
    pub next_stage_needed: bool,
}

impl Validate for DecisionFrame {
    fn read(r: &Record<'_>) -> Self {
        Self {
            decision_statement: r.required_str("decisionStatement"),
            options: r.list("options", false),
            criteria: r.optional_list("criteria").unwrap_or_default(),
            analysis_type: r.enumeration("analysisType"),
            stage: r.enumeration("stage"),
            possible_outcomes: r.optional_list("possibleOutcomes").unwrap_or_default(),
            recommendation: r.optional_str("recommendation"),
            rationale: r.optional_str("rationale"),
            stakeholders: r.optional_string_list("stakeholders"),
            constraints: r.optional_string_list("constraints"),
            time_horizon: r.optional_str("timeHorizon"),
            risk_tolerance: r.optional_enum("riskTolerance"),
            expected_values: r.number_map("expectedValues"),
            multi_criteria_scores: r.number_map("multiCriteriaScores"),
            sensitivity_insights: r.optional_string_list("sensitivityInsights"),
            eisenhower_classification: r
                .optional_list("eisenhowerClassification")
                .unwrap_or_default(),
            decision_id: r.required_str("decisionId"),
            iteration: r.non_negative_int("iteration"),
            next_stage_needed: r.required_bool("nextStageNeeded"),
        }
    }
}

fn first_duplicate<'a>(ids: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

impl DecisionFrame {
    /// Cross-field checks that need no session state.
    fn check(&self) -> Result<(), InvariantError> {
        if let Some(id) = first_duplicate(self.options.iter().map(|o| o.id.as_str())) {
            return Err(InvariantError::DuplicateId {
                field: "options".to_string(),
                id: id.to_string(),
            });
        }
        if let Some(id) = first_duplicate(self.criteria.iter().map(|c| c.id.as_str())) {
            return Err(InvariantError::DuplicateId {
                field: "criteria".to_string(),
                id: id.to_string(),
            });
        }

        let declared: HashSet<&str> = self.options.iter().map(|o| o.id.as_str()).collect();
        let dangling = |field: String, id: &str| InvariantError::DanglingReference {
            field,
            id: id.to_string(),
        };

        for (i, outcome) in self.possible_outcomes.iter().enumerate() {
            if !declared.contains(outcome.option_id.as_str()) {
                return Err(dangling(
                    format!("possibleOutcomes[{}].optionId", i),
                    &outcome.option_id,
                ));
            }
        }
        for (field, map) in [
            ("expectedValues", &self.expected_values),
            ("multiCriteriaScores", &self.multi_criteria_scores),
        ] {
            if let Some(id) = map.keys().find(|k| !declared.contains(k.as_str())) {
                return Err(dangling(field.to_string(), id));
            }
        }
        for (i, entry) in self.eisenhower_classification.iter().enumerate() {
            if !declared.contains(entry.option_id.as_str()) {
                return Err(dangling(
                    format!("eisenhowerClassification[{}].optionId", i),
                    &entry.option_id,
                ));
            }
            let expected = classify(entry.urgency, entry.importance);
            if entry.quadrant != expected {
                return Err(InvariantError::QuadrantMismatch {
                    option_id: entry.option_id.clone(),
                    expected: expected.to_string(),
                    supplied: entry.quadrant.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Advisory notes that never reject the frame.
    fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.criteria.is_empty() {
            let total: f64 = self.criteria.iter().map(|c| c.weight).sum();
            if (total - 1.0).abs() > 1e-6 {
                warnings.push(format!("Criteria weights sum to {}, not 1", total));
            }
        }
        warnings
    }
}

/// Accepted state of one decision.
#[derive(Debug, Clone, Default)]
pub struct DecisionSession {
    stage: Option<DecisionStage>,
    iteration: Option<u64>,
    latest: Option<DecisionFrame>,
}

impl DecisionSession {
    pub fn stage(&self) -> Option<DecisionStage> {
        self.stage
    }

    /// The most recently accepted frame.
    pub fn latest(&self) -> Option<&DecisionFrame> {
        self.latest.as_ref()
    }

    fn advance(&mut self, frame: &DecisionFrame) -> Result<(), InvariantError> {
        if let Some(current) = self.stage {
            if frame.stage.ordinal() < current.ordinal() {
                return Err(InvariantError::StageRegression {
                    current: current.to_string(),
                    requested: frame.stage.to_string(),
                });
            }
        }
        if let Some(current) = self.iteration {
            if frame.iteration < current {
                return Err(InvariantError::IterationRegression {
                    current,
                    requested: frame.iteration,
                });
            }
        }

        self.stage = Some(frame.stage);
        self.iteration = Some(frame.iteration);
        self.latest = Some(frame.clone());
        Ok(())
    }
}

/// Projection returned by the decide tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecideResult {
    pub decision_id: String,
    pub decision_statement: String,
    pub analysis_type: AnalysisType,
    pub stage: DecisionStage,
    pub next_stage: Option<DecisionStage>,
    pub iteration: u64,
    pub option_count: usize,
    pub criteria_count: usize,
    pub outcome_count: usize,
    pub has_recommendation: bool,
    pub warnings: Vec<String>,
    pub next_stage_needed: bool,
}

/// Decision framework tool handler.
pub struct DecideTool {
    sessions: SessionStore<DecisionSession>,
}

impl DecideTool {
    pub fn new() -> Self {
        Self {
            sessions: SessionStore::new("decide"),
        }
    }

    pub async fn process(&self, arguments: &Value) -> EngineResult<DecideResult> {
        let frame: DecisionFrame = validate(arguments)?;
        frame.check()?;

        self.sessions
            .update(&frame.decision_id, |session| session.advance(&frame))
            .await?;

        let warnings = frame.warnings();
        for w in &warnings {
            warn!(decision_id = %frame.decision_id, warning = %w, "Decision frame advisory");
        }

        info!(
            decision_id = %frame.decision_id,
            stage = %frame.stage,
            analysis_type = %frame.analysis_type,
            "Decision frame accepted"
        );

        Ok(DecideResult {
            next_stage: frame.stage.successor(),
            option_count: frame.options.len(),
            criteria_count: frame.criteria.len(),
            outcome_count: frame.possible_outcomes.len(),
            has_recommendation: frame.recommendation.is_some(),
            warnings,
            decision_id: frame.decision_id,
            decision_statement: frame.decision_statement,
            analysis_type: frame.analysis_type,
            stage: frame.stage,
            iteration: frame.iteration,
            next_stage_needed: frame.next_stage_needed,
        })
    }

    pub async fn session(&self, decision_id: &str) -> Option<DecisionSession> {
        self.sessions.get(decision_id).await
    }
}

impl Default for DecideTool {
    fn default() -> Self {
        Self::new()
    }
}
