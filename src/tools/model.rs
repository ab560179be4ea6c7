//! Mental model application.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::EngineResult;
use crate::validation::{validate, Record, Validate};
use crate::wire_enum;

use super::STATUS_SUCCESS;

wire_enum! {
    pub enum MentalModelName {
        FirstPrinciples => "first_principles",
        OpportunityCost => "opportunity_cost",
        ErrorPropagation => "error_propagation",
        RubberDuck => "rubber_duck",
        ParetoPrinciple => "pareto_principle",
        OccamsRazor => "occams_razor",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentalModel {
    pub model_name: MentalModelName,
    pub problem: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
}

impl Validate for MentalModel {
    fn read(r: &Record<'_>) -> Self {
        Self {
            model_name: r.enumeration("modelName"),
            problem: r.required_str("problem"),
            steps: r.optional_string_list("steps"),
            reasoning: r.optional_str("reasoning"),
            conclusion: r.optional_str("conclusion"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResult {
    pub model_name: MentalModelName,
    pub status: String,
    pub has_steps: bool,
    pub has_conclusion: bool,
}

/// Mental model tool handler.
#[derive(Debug, Default)]
pub struct ModelTool;

impl ModelTool {
    pub fn process(&self, arguments: &Value) -> EngineResult<ModelResult> {
        let model: MentalModel = validate(arguments)?;
        info!(model_name = %model.model_name, steps = model.steps.len(), "Mental model applied");

        Ok(ModelResult {
            model_name: model.model_name,
            status: STATUS_SUCCESS.to_string(),
            has_steps: !model.steps.is_empty(),
            has_conclusion: model.conclusion.as_deref().is_some_and(|c| !c.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_projection() {
        let result = ModelTool
            .process(&json!({
                "modelName": "first_principles",
                "problem": "Why is the build slow?",
                "steps": ["List inputs", "Measure each"],
                "conclusion": "Linking dominates"
            }))
            .unwrap();

        assert_eq!(result.model_name, MentalModelName::FirstPrinciples);
        assert_eq!(result.status, "success");
        assert!(result.has_steps);
        assert!(result.has_conclusion);
    }

    #[test]
    fn test_minimal_model() {
        let result = ModelTool
            .process(&json!({"modelName": "occams_razor", "problem": "Flaky test"}))
            .unwrap();
        assert!(!result.has_steps);
        assert!(!result.has_conclusion);
    }

    #[test]
    fn test_unknown_model_and_missing_problem() {
        let err = ModelTool
            .process(&json!({"modelName": "lateral"}))
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.details()["violations"].as_array().unwrap().len(), 2);
    }
}
