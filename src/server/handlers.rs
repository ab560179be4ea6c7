use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::SharedState;
use crate::error::{EngineResult, McpError, McpResult};
use crate::response::ToolResponse;
use crate::tools::ToolName;

/// Route a tool call to its handler and wrap the outcome in an envelope.
///
/// Engine failures become `success: false` envelopes; only an unknown tool
/// name or a serialization failure is reported as an `McpError`.
pub async fn handle_tool_call(
    state: &SharedState,
    tool_name: &str,
    arguments: Option<Value>,
) -> McpResult<ToolResponse> {
    let tool: ToolName = tool_name.parse().map_err(|_| McpError::UnknownTool {
        tool_name: tool_name.to_string(),
    })?;

    info!(tool = %tool, "Routing tool call");

    // Missing arguments are validated like any other non-object record.
    let arguments = arguments.unwrap_or(Value::Null);
    let started = Instant::now();

    match tool {
        ToolName::Trace => respond(tool, started, state.trace.process(&arguments).await),
        ToolName::Model => respond(tool, started, state.model.process(&arguments)),
        ToolName::Pattern => respond(tool, started, state.pattern.process(&arguments)),
        ToolName::Paradigm => respond(tool, started, state.paradigm.process(&arguments)),
        ToolName::Debug => respond(tool, started, state.debug.process(&arguments)),
        ToolName::Council => respond(tool, started, state.council.process(&arguments).await),
        ToolName::Decide => respond(tool, started, state.decide.process(&arguments).await),
        ToolName::Reflect => respond(tool, started, state.reflect.process(&arguments)),
        ToolName::Hypothesis => respond(tool, started, state.hypothesis.process(&arguments)),
        ToolName::Debate => respond(tool, started, state.debate.process(&arguments).await),
        ToolName::Map => respond(tool, started, state.map.process(&arguments).await),
    }
}

fn respond<T: Serialize>(
    tool: ToolName,
    started: Instant,
    result: EngineResult<T>,
) -> McpResult<ToolResponse> {
    match result {
        Ok(projection) => {
            let data = serde_json::to_value(projection)?;
            let response = ToolResponse::success(tool, data, started.elapsed());
            info!(
                tool = %tool,
                elapsed_ms = response.metadata.processing_time_ms,
                "Tool call succeeded"
            );
            Ok(response)
        }
        Err(err) => {
            warn!(tool = %tool, code = err.code(), error = %err, "Tool call rejected");
            Ok(ToolResponse::failure(tool, &err, started.elapsed()))
        }
    }
}
