//! Design pattern application.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::EngineResult;
use crate::validation::{validate, Record, Validate};
use crate::wire_enum;

use super::STATUS_SUCCESS;

wire_enum! {
    pub enum DesignPatternName {
        ModularArchitecture => "modular_architecture",
        ApiIntegration => "api_integration",
        StateManagement => "state_management",
        AsyncProcessing => "async_processing",
        Scalability => "scalability",
        Security => "security",
        AgenticDesign => "agentic_design",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignPattern {
    pub pattern_name: DesignPatternName,
    pub context: String,
    #[serde(default)]
    pub implementation: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub tradeoffs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

impl Validate for DesignPattern {
    fn read(r: &Record<'_>) -> Self {
        Self {
            pattern_name: r.enumeration("patternName"),
            context: r.required_str("context"),
            implementation: r.optional_string_list("implementation"),
            benefits: r.optional_string_list("benefits"),
            tradeoffs: r.optional_string_list("tradeoffs"),
            code_example: r.optional_str("codeExample"),
            languages: r.optional_string_list("languages"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternResult {
    pub pattern_name: DesignPatternName,
    pub status: String,
    pub has_implementation: bool,
    pub has_code_example: bool,
}

/// Design pattern tool handler.
#[derive(Debug, Default)]
pub struct PatternTool;

impl PatternTool {
    pub fn process(&self, arguments: &Value) -> EngineResult<PatternResult> {
        let pattern: DesignPattern = validate(arguments)?;
        info!(pattern = %pattern.pattern_name, "Design pattern applied");

        Ok(PatternResult {
            pattern_name: pattern.pattern_name,
            status: STATUS_SUCCESS.to_string(),
            has_implementation: !pattern.implementation.is_empty(),
            has_code_example: pattern.code_example.as_deref().is_some_and(|c| !c.is_empty()),
        })
    }
}
