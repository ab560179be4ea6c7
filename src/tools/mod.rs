//! Reasoning tool implementations.
//!
//! Stateful tools accumulate caller-supplied artifacts per session:
//! - [`TraceTool`]: numbered thought sequences with revisions and branches
//! - [`DebateTool`]: argument graphs with typed edges
//! - [`CouncilTool`]: multi-persona deliberation stage machine
//! - [`DecideTool`]: staged decision analysis frames
//! - [`MapTool`]: incrementally edited diagrams
//!
//! Stateless tools validate and project a single artifact:
//! [`ModelTool`], [`PatternTool`], [`ParadigmTool`], [`DebugTool`],
//! [`ReflectTool`] and [`HypothesisTool`].

mod council;
mod debate;
mod debug;
mod decide;
mod hypothesis;
mod map;
mod model;
mod paradigm;
mod pattern;
mod reflect;
mod trace;

pub use council::*;
pub use debate::*;
pub use debug::*;
pub use decide::*;
pub use hypothesis::*;
pub use map::*;
pub use model::*;
pub use paradigm::*;
pub use pattern::*;
pub use reflect::*;
pub use trace::*;

use crate::wire_enum;

wire_enum! {
    /// The eleven tools exposed to callers.
    pub enum ToolName {
        /// Sequential thought chains.
        Trace => "trace",
        /// Mental model application.
        Model => "model",
        /// Design pattern application.
        Pattern => "pattern",
        /// Programming paradigm selection.
        Paradigm => "paradigm",
        /// Debugging approach tracking.
        Debug => "debug",
        /// Multi-persona deliberation.
        Council => "council",
        /// Decision analysis frames.
        Decide => "decide",
        /// Metacognitive monitoring.
        Reflect => "reflect",
        /// Scientific method inquiry.
        Hypothesis => "hypothesis",
        /// Structured argumentation.
        Debate => "debate",
        /// Diagram reasoning.
        Map => "map",
    }
}

/// Status reported by the stateless tools on success.
pub(crate) const STATUS_SUCCESS: &str = "success";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::WireEnum;

    #[test]
    fn test_tool_name_as_str() {
        assert_eq!(ToolName::Trace.as_str(), "trace");
        assert_eq!(ToolName::Council.as_str(), "council");
        assert_eq!(ToolName::Map.as_str(), "map");
    }

    #[test]
    fn test_tool_name_count() {
        assert_eq!(ToolName::ALL.len(), 11);
    }

    #[test]
    fn test_tool_name_from_str_valid() {
        for tool in ToolName::ALL {
            assert_eq!(tool.as_str().parse::<ToolName>().unwrap(), *tool);
        }
    }

    #[test]
    fn test_tool_name_from_str_invalid() {
        let result = "reasoning_linear".parse::<ToolName>();
        assert_eq!(result.unwrap_err(), "Unknown ToolName: reasoning_linear");
    }

    #[test]
    fn test_tool_name_serializes_as_wire_name() {
        assert_eq!(
            serde_json::to_string(&ToolName::Hypothesis).unwrap(),
            "\"hypothesis\""
        );
    }
}
