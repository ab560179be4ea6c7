//! Debugging approach tracking.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::EngineResult;
use crate::validation::{validate, Record, Validate};
use crate::wire_enum;

use super::STATUS_SUCCESS;

wire_enum! {
    pub enum DebuggingApproachName {
        BinarySearch => "binary_search",
        ReverseEngineering => "reverse_engineering",
        DivideConquer => "divide_conquer",
        Backtracking => "backtracking",
        CauseElimination => "cause_elimination",
        ProgramSlicing => "program_slicing",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebuggingApproach {
    pub approach_name: DebuggingApproachName,
    pub issue: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
}

impl Validate for DebuggingApproach {
    fn read(r: &Record<'_>) -> Self {
        Self {
            approach_name: r.enumeration("approachName"),
            issue: r.required_str("issue"),
            steps: r.optional_string_list("steps"),
            findings: r.optional_str("findings"),
            resolution: r.optional_str("resolution"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResult {
    pub approach_name: DebuggingApproachName,
    pub status: String,
    pub has_steps: bool,
    pub has_resolution: bool,
}

/// Debugging approach tool handler.
#[derive(Debug, Default)]
pub struct DebugTool;

impl DebugTool {
    pub fn process(&self, arguments: &Value) -> EngineResult<DebugResult> {
        let approach: DebuggingApproach = validate(arguments)?;
        info!(approach = %approach.approach_name, "Debugging approach recorded");

        Ok(DebugResult {
            approach_name: approach.approach_name,
            status: STATUS_SUCCESS.to_string(),
            has_steps: !approach.steps.is_empty(),
            has_resolution: approach.resolution.as_deref().is_some_and(|r| !r.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_projection_has_exactly_four_fields() {
        let result = DebugTool
            .process(&json!({
                "approachName": "binary_search",
                "issue": "Regression between v1.2 and v1.3",
                "steps": ["Bisect commits"],
                "findings": "Commit abc broke it",
                "resolution": "Revert abc"
            }))
            .unwrap();

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "approachName": "binary_search",
                "status": "success",
                "hasSteps": true,
                "hasResolution": true
            })
        );
    }

    #[test]
    fn test_unknown_approach_rejected() {
        let err = DebugTool
            .process(&json!({"approachName": "guessing", "issue": "x"}))
            .unwrap_err();
        assert!(err.to_string().contains("approachName"));
    }
}
