//! Programming paradigm selection.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::EngineResult;
use crate::validation::{validate, Record, Validate};
use crate::wire_enum;

use super::STATUS_SUCCESS;

wire_enum! {
    pub enum ParadigmName {
        Imperative => "imperative",
        Procedural => "procedural",
        ObjectOriented => "object_oriented",
        Functional => "functional",
        Declarative => "declarative",
        Logic => "logic",
        EventDriven => "event_driven",
        AspectOriented => "aspect_oriented",
        Concurrent => "concurrent",
        Reactive => "reactive",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammingParadigm {
    pub paradigm_name: ParadigmName,
    pub problem: String,
    #[serde(default)]
    pub approach: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub limitations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

impl Validate for ProgrammingParadigm {
    fn read(r: &Record<'_>) -> Self {
        Self {
            paradigm_name: r.enumeration("paradigmName"),
            problem: r.required_str("problem"),
            approach: r.optional_string_list("approach"),
            benefits: r.optional_string_list("benefits"),
            limitations: r.optional_string_list("limitations"),
            code_example: r.optional_str("codeExample"),
            languages: r.optional_string_list("languages"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParadigmResult {
    pub paradigm_name: ParadigmName,
    pub status: String,
    pub has_approach: bool,
    pub has_code_example: bool,
}

/// Programming paradigm tool handler.
#[derive(Debug, Default)]
pub struct ParadigmTool;

impl ParadigmTool {
    pub fn process(&self, arguments: &Value) -> EngineResult<ParadigmResult> {
        let paradigm: ProgrammingParadigm = validate(arguments)?;
        info!(paradigm = %paradigm.paradigm_name, "Programming paradigm applied");

        Ok(ParadigmResult {
            paradigm_name: paradigm.paradigm_name,
            status: STATUS_SUCCESS.to_string(),
            has_approach: !paradigm.approach.is_empty(),
            has_code_example: paradigm.code_example.as_deref().is_some_and(|c| !c.is_empty()),
        })
    }
}
