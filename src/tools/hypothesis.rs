//! Scientific method inquiry.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::EngineResult;
use crate::validation::{validate, Record, Validate};
use crate::wire_enum;

wire_enum! {
    pub enum InquiryStage {
        Observation => "observation",
        Question => "question",
        Hypothesis => "hypothesis",
        Experiment => "experiment",
        Analysis => "analysis",
        Conclusion => "conclusion",
        Iteration => "iteration",
    }
}

wire_enum! {
    pub enum VariableType {
        Independent => "independent",
        Dependent => "dependent",
        Controlled => "controlled",
        Confounding => "confounding",
    }
}

wire_enum! {
    pub enum HypothesisStatus {
        Proposed => "proposed",
        Testing => "testing",
        Supported => "supported",
        Refuted => "refuted",
        Refined => "refined",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub variable_type: VariableType,
}

impl Validate for Variable {
    fn read(r: &Record<'_>) -> Self {
        Self {
            name: r.required_str("name"),
            variable_type: r.enumeration("type"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HypothesisData {
    pub statement: String,
    pub variables: Vec<Variable>,
    pub assumptions: Vec<String>,
    pub hypothesis_id: String,
    pub confidence: f64,
    pub domain: String,
    pub iteration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_to: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refinement_of: Option<String>,
    pub status: HypothesisStatus,
}

impl Validate for HypothesisData {
    fn read(r: &Record<'_>) -> Self {
        Self {
            statement: r.required_str("statement"),
            variables: r.list("variables", false),
            assumptions: r.string_list("assumptions", false),
            hypothesis_id: r.required_str("hypothesisId"),
            confidence: r.unit_interval("confidence"),
            domain: r.required_str("domain"),
            iteration: r.non_negative_int("iteration"),
            alternative_to: r.maybe_string_list("alternativeTo"),
            refinement_of: r.optional_str("refinementOf"),
            status: r.enumeration("status"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(rename = "if")]
    pub condition: String,
    #[serde(rename = "then")]
    pub expectation: String,
}

impl Validate for Prediction {
    fn read(r: &Record<'_>) -> Self {
        Self {
            condition: r.required_str("if"),
            expectation: r.required_str("then"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentData {
    pub design: String,
    pub methodology: String,
    pub predictions: Vec<Prediction>,
    pub experiment_id: String,
    pub hypothesis_id: String,
    pub control_measures: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_matched: Option<bool>,
}

impl Validate for ExperimentData {
    fn read(r: &Record<'_>) -> Self {
        Self {
            design: r.required_str("design"),
            methodology: r.required_str("methodology"),
            predictions: r.list("predictions", false),
            experiment_id: r.required_str("experimentId"),
            hypothesis_id: r.required_str("hypothesisId"),
            control_measures: r.string_list("controlMeasures", false),
            results: r.optional_str("results"),
            outcome_matched: r.optional_bool("outcomeMatched"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScientificInquiry {
    pub stage: InquiryStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypothesis: Option<HypothesisData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiment: Option<ExperimentData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
    pub inquiry_id: String,
    pub iteration: u64,
    pub next_stage_needed: bool,
}

impl Validate for ScientificInquiry {
    fn read(r: &Record<'_>) -> Self {
        let hypothesis: Option<HypothesisData> = r.optional_nested("hypothesis");
        let experiment: Option<ExperimentData> = r.optional_nested("experiment");

        if let (Some(h), Some(e)) = (&hypothesis, &experiment) {
            if !h.hypothesis_id.is_empty() && h.hypothesis_id != e.hypothesis_id {
                r.reject(
                    "experiment.hypothesisId",
                    format!("must match hypothesis.hypothesisId '{}'", h.hypothesis_id),
                );
            }
        }

        Self {
            stage: r.enumeration("stage"),
            observation: r.optional_str("observation"),
            question: r.optional_str("question"),
            hypothesis,
            experiment,
            analysis: r.optional_str("analysis"),
            conclusion: r.optional_str("conclusion"),
            inquiry_id: r.required_str("inquiryId"),
            iteration: r.non_negative_int("iteration"),
            next_stage_needed: r.required_bool("nextStageNeeded"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HypothesisResult {
    pub inquiry_id: String,
    pub stage: InquiryStage,
    pub iteration: u64,
    pub hypothesis_id: Option<String>,
    pub hypothesis_status: Option<HypothesisStatus>,
    pub has_experiment: bool,
    pub has_conclusion: bool,
    pub next_stage_needed: bool,
}

/// Scientific method tool handler.
#[derive(Debug, Default)]
pub struct HypothesisTool;

impl HypothesisTool {
    pub fn process(&self, arguments: &Value) -> EngineResult<HypothesisResult> {
        let inquiry: ScientificInquiry = validate(arguments)?;

        info!(
            inquiry_id = %inquiry.inquiry_id,
            stage = %inquiry.stage,
            "Scientific inquiry step recorded"
        );

        Ok(HypothesisResult {
            hypothesis_id: inquiry.hypothesis.as_ref().map(|h| h.hypothesis_id.clone()),
            hypothesis_status: inquiry.hypothesis.as_ref().map(|h| h.status),
            has_experiment: inquiry.experiment.is_some(),
            has_conclusion: inquiry.conclusion.as_deref().is_some_and(|c| !c.is_empty()),
            inquiry_id: inquiry.inquiry_id,
            stage: inquiry.stage,
            iteration: inquiry.iteration,
            next_stage_needed: inquiry.next_stage_needed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn inquiry() -> Value {
        json!({
            "stage": "experiment",
            "hypothesis": {
                "statement": "Connection pooling cuts p99 latency",
                "variables": [
                    {"name": "pool size", "type": "independent"},
                    {"name": "p99 latency", "type": "dependent"}
                ],
                "assumptions": ["Load is steady"],
                "hypothesisId": "h1",
                "confidence": 0.6,
                "domain": "performance",
                "iteration": 0,
                "status": "testing"
            },
            "experiment": {
                "design": "A/B on staging",
                "methodology": "Replay production traffic",
                "predictions": [{"if": "pool size is 20", "then": "p99 drops 30%"}],
                "experimentId": "e1",
                "hypothesisId": "h1",
                "controlMeasures": ["Same hardware"]
            },
            "inquiryId": "q1",
            "iteration": 2,
            "nextStageNeeded": true
        })
    }

    #[test]
    fn test_projection() {
        let result = HypothesisTool.process(&inquiry()).unwrap();
        assert_eq!(result.inquiry_id, "q1");
        assert_eq!(result.stage, InquiryStage::Experiment);
        assert_eq!(result.hypothesis_id.as_deref(), Some("h1"));
        assert_eq!(result.hypothesis_status, Some(HypothesisStatus::Testing));
        assert!(result.has_experiment);
        assert!(!result.has_conclusion);
    }

    #[test]
    fn test_experiment_must_test_the_stated_hypothesis() {
        let mut input = inquiry();
        input["experiment"]["hypothesisId"] = json!("h2");

        let err = HypothesisTool.process(&input).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("experiment.hypothesisId"));
    }

    #[test]
    fn test_unknown_variable_type_reports_nested_path() {
        let mut input = inquiry();
        input["hypothesis"]["variables"][1]["type"] = json!("mediating");

        let err = HypothesisTool.process(&input).unwrap_err();
        assert!(err.to_string().contains("hypothesis.variables[1].type"));
    }
}
