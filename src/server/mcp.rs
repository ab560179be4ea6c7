//! MCP protocol implementation for JSON-RPC 2.0 communication.
//!
//! This module provides the core MCP server implementation including:
//! - JSON-RPC 2.0 request/response handling
//! - Tool definitions and schemas
//! - Line-delimited stdio communication

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use super::{handle_tool_call, SharedState};
use crate::error::{McpError, McpResult};
use crate::tools::ToolName;
use crate::validation::WireEnum;

#[cfg(test)]
#[path = "mcp_tests.rs"]
mod mcp_tests;

/// MCP protocol revision implemented by this server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (must be "2.0").
    pub jsonrpc: String,
    /// Request identifier (None for notifications).
    pub id: Option<Value>,
    /// The method name to invoke.
    pub method: String,
    /// Optional parameters for the method.
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// JSON-RPC version (always "2.0").
    pub jsonrpc: String,
    /// Request identifier (null if the request could not be parsed).
    pub id: Value,
    /// The result on success (mutually exclusive with error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// The error on failure (mutually exclusive with result).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// MCP server information returned during initialization.
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// MCP server capabilities advertised to clients.
#[derive(Debug, Serialize)]
pub struct Capabilities {
    pub tools: ToolCapabilities,
}

#[derive(Debug, Serialize)]
pub struct ToolCapabilities {
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Result of the MCP initialize handshake.
#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: Capabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

/// MCP tool definition with JSON Schema.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Parameters for a tools/call request.
#[derive(Debug, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Content item within a tool result.
#[derive(Debug, Serialize)]
pub struct ToolResultContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

/// Result of a tool invocation.
#[derive(Debug, Serialize)]
pub struct ToolCallResult {
    pub content: Vec<ToolResultContent>,
    /// Set when the envelope reports `success: false`.
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// MCP Server speaking line-delimited JSON-RPC.
pub struct McpServer {
    state: SharedState,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(state: SharedState) -> Self {
        Self { state }
    }

    /// Run the server using async stdio
    pub async fn run(&self) -> std::io::Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve requests read line by line from `input`, writing one response
    /// line per request to `output`, until EOF.
    pub async fn serve<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(server = %self.state.config.server.name, "MCP server starting");

        let mut reader = BufReader::new(input);
        let mut line = String::new();

        loop {
            line.clear();
            let bytes_read = reader.read_line(&mut line).await?;

            // EOF reached
            if bytes_read == 0 {
                info!("EOF received, shutting down");
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            debug!(request = %trimmed, "Received request");

            let response = match serde_json::from_str::<JsonRpcRequest>(trimmed) {
                Ok(request) => self.handle_request(request).await,
                Err(e) => {
                    error!(error = %e, "Failed to parse request");
                    Some(JsonRpcResponse::error(
                        None,
                        -32700,
                        format!("Parse error: {}", e),
                    ))
                }
            };

            // Notifications get no response
            if let Some(response) = response {
                let response_json = serde_json::to_string(&response)?;
                debug!(response = %response_json, "Sending response");

                output.write_all(response_json.as_bytes()).await?;
                output.write_all(b"\n").await?;
                output.flush().await?;
            }
        }

        Ok(())
    }

    /// Handle a single JSON-RPC request.
    /// Returns None for notifications (requests without id).
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let is_notification = request.id.is_none();

        match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(request.id)),
            "initialized" => {
                debug!("Received initialized notification");
                None
            }
            method if method.starts_with("notifications/") => {
                debug!(method = %method, "Received notification");
                None
            }
            "tools/list" => Some(self.handle_tools_list(request.id)),
            "tools/call" => Some(self.handle_tool_call(request.id, request.params).await),
            "ping" => Some(JsonRpcResponse::success(request.id, json!({}))),
            method => {
                if is_notification {
                    debug!(method = %method, "Unknown notification, ignoring");
                    None
                } else {
                    error!(method = %method, "Unknown method");
                    Some(JsonRpcResponse::error(
                        request.id,
                        -32601,
                        format!("Method not found: {}", method),
                    ))
                }
            }
        }
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        info!("Handling initialize request");

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: Capabilities {
                tools: ToolCapabilities {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: self.state.config.server.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(val) => JsonRpcResponse::success(id, val),
            Err(e) => {
                error!(error = %e, "Failed to serialize initialize result");
                JsonRpcResponse::error(id, -32603, format!("Internal error: {}", e))
            }
        }
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        info!("Handling tools/list request");
        JsonRpcResponse::success(id, json!({ "tools": tool_definitions() }))
    }

    async fn handle_tool_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params = match parse_tool_call_params(params) {
            Ok(p) => p,
            Err(e) => return JsonRpcResponse::error(id, -32602, e.to_string()),
        };

        let response = match handle_tool_call(&self.state, &params.name, params.arguments).await {
            Ok(response) => response,
            Err(e @ McpError::UnknownTool { .. }) => {
                error!(tool = %params.name, "Unknown tool");
                return JsonRpcResponse::error(id, -32602, e.to_string());
            }
            Err(e) => {
                error!(error = %e, "Tool call failed");
                return JsonRpcResponse::error(id, -32603, format!("Internal error: {}", e));
            }
        };

        let text = match serde_json::to_string_pretty(&response) {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "Failed to serialize tool response");
                return JsonRpcResponse::error(id, -32603, format!("Internal error: {}", e));
            }
        };

        let tool_result = ToolCallResult {
            content: vec![ToolResultContent {
                content_type: "text".to_string(),
                text,
            }],
            is_error: (!response.success).then_some(true),
        };

        match serde_json::to_value(tool_result) {
            Ok(val) => JsonRpcResponse::success(id, val),
            Err(e) => {
                error!(error = %e, "Failed to serialize tool call result");
                JsonRpcResponse::error(id, -32603, format!("Internal error: {}", e))
            }
        }
    }
}

fn parse_tool_call_params(params: Option<Value>) -> McpResult<ToolCallParams> {
    let params = params.ok_or_else(|| McpError::InvalidRequest {
        message: "tools/call requires params".to_string(),
    })?;
    serde_json::from_value(params).map_err(|e| McpError::InvalidRequest {
        message: format!("malformed tools/call params: {}", e),
    })
}

/// Definitions for every tool, in [`ToolName`] order.
pub fn tool_definitions() -> Vec<Tool> {
    ToolName::ALL.iter().map(|&tool| tool_definition(tool)).collect()
}

fn tool_definition(tool: ToolName) -> Tool {
    match tool {
        ToolName::Trace => get_trace_tool(),
        ToolName::Model => get_model_tool(),
        ToolName::Pattern => get_pattern_tool(),
        ToolName::Paradigm => get_paradigm_tool(),
        ToolName::Debug => get_debug_tool(),
        ToolName::Council => get_council_tool(),
        ToolName::Decide => get_decide_tool(),
        ToolName::Reflect => get_reflect_tool(),
        ToolName::Hypothesis => get_hypothesis_tool(),
        ToolName::Debate => get_debate_tool(),
        ToolName::Map => get_map_tool(),
    }
}


fn values<E: WireEnum>() -> Value {
    json!(E::ALL.iter().map(|v| v.as_str()).collect::<Vec<_>>())
}

fn string_array(description: &str) -> Value {
    json!({"type": "array", "items": {"type": "string"}, "description": description})
}

fn unit_interval(description: &str) -> Value {
    json!({"type": "number", "minimum": 0, "maximum": 1, "description": description})
}

fn get_trace_tool() -> Tool {
    Tool {
        name: ToolName::Trace.to_string(),
        description: "Record one step of a sequential chain of thought. Supports revising earlier thoughts and branching into alternative lines of reasoning.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "thought": {"type": "string", "description": "The current thinking step"},
                "thoughtNumber": {"type": "integer", "minimum": 1},
                "totalThoughts": {"type": "integer", "minimum": 1},
                "nextThoughtNeeded": {"type": "boolean"},
                "isRevision": {"type": "boolean"},
                "revisesThought": {"type": "integer", "minimum": 1},
                "branchFromThought": {"type": "integer", "minimum": 1},
                "branchId": {"type": "string"},
                "needsMoreThoughts": {"type": "boolean"},
                "sessionId": {"type": "string", "description": "Thought history to append to"}
            },
            "required": ["thought", "thoughtNumber", "totalThoughts", "nextThoughtNeeded"]
        }),
    }
}

fn get_model_tool() -> Tool {
    use crate::tools::MentalModelName;
    Tool {
        name: ToolName::Model.to_string(),
        description: "Apply a mental model such as first principles or Occam's razor to a problem.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "modelName": {"type": "string", "enum": values::<MentalModelName>()},
                "problem": {"type": "string"},
                "steps": string_array("Steps taken while applying the model"),
                "reasoning": {"type": "string"},
                "conclusion": {"type": "string"}
            },
            "required": ["modelName", "problem"]
        }),
    }
}

fn get_pattern_tool() -> Tool {
    use crate::tools::DesignPatternName;
    Tool {
        name: ToolName::Pattern.to_string(),
        description: "Reason about applying a software design pattern in a given context.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "patternName": {"type": "string", "enum": values::<DesignPatternName>()},
                "context": {"type": "string"},
                "implementation": string_array("Implementation steps"),
                "benefits": string_array("Expected benefits"),
                "tradeoffs": string_array("Known tradeoffs"),
                "codeExample": {"type": "string"},
                "languages": string_array("Relevant languages")
            },
            "required": ["patternName", "context"]
        }),
    }
}

fn get_paradigm_tool() -> Tool {
    use crate::tools::ParadigmName;
    Tool {
        name: ToolName::Paradigm.to_string(),
        description: "Reason about solving a problem within a programming paradigm.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "paradigmName": {"type": "string", "enum": values::<ParadigmName>()},
                "problem": {"type": "string"},
                "approach": string_array("Approach steps"),
                "benefits": string_array("Benefits of the paradigm here"),
                "limitations": string_array("Limitations of the paradigm here"),
                "codeExample": {"type": "string"},
                "languages": string_array("Relevant languages")
            },
            "required": ["paradigmName", "problem"]
        }),
    }
}

fn get_debug_tool() -> Tool {
    use crate::tools::DebuggingApproachName;
    Tool {
        name: ToolName::Debug.to_string(),
        description: "Track a systematic debugging approach applied to an issue.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "approachName": {"type": "string", "enum": values::<DebuggingApproachName>()},
                "issue": {"type": "string"},
                "steps": string_array("Steps taken"),
                "findings": {"type": "string"},
                "resolution": {"type": "string"}
            },
            "required": ["approachName", "issue"]
        }),
    }
}

fn get_council_tool() -> Tool {
    use crate::tools::{ContributionType, DeliberationStage};
    Tool {
        name: ToolName::Council.to_string(),
        description: "Run a multi-persona deliberation through problem definition, ideation, critique, integration, decision and reflection.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "topic": {"type": "string"},
                "personas": {
                    "type": "array",
                    "minItems": 1,
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string"},
                            "name": {"type": "string"},
                            "expertise": {"type": "array", "items": {"type": "string"}, "minItems": 1},
                            "background": {"type": "string"},
                            "perspective": {"type": "string"},
                            "biases": {"type": "array", "items": {"type": "string"}},
                            "communication": {
                                "type": "object",
                                "properties": {
                                    "style": {"type": "string"},
                                    "tone": {"type": "string"}
                                },
                                "required": ["style", "tone"]
                            }
                        },
                        "required": ["id", "name", "expertise", "background", "perspective", "biases", "communication"]
                    }
                },
                "contributions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string"},
                            "personaId": {"type": "string"},
                            "content": {"type": "string"},
                            "type": {"type": "string", "enum": values::<ContributionType>()},
                            "confidence": unit_interval("Confidence in the contribution"),
                            "referenceIds": string_array("Earlier contributions this one builds on")
                        },
                        "required": ["personaId", "content", "type", "confidence"]
                    }
                },
                "stage": {"type": "string", "enum": values::<DeliberationStage>()},
                "activePersonaId": {"type": "string"},
                "nextPersonaId": {"type": "string"},
                "consensusPoints": string_array("Points the personas agree on"),
                "disagreements": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "topic": {"type": "string"},
                            "positions": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "personaId": {"type": "string"},
                                        "position": {"type": "string"},
                                        "arguments": {"type": "array", "items": {"type": "string"}}
                                    },
                                    "required": ["personaId", "position", "arguments"]
                                }
                            }
                        },
                        "required": ["topic", "positions"]
                    }
                },
                "keyInsights": string_array("Key insights so far"),
                "openQuestions": string_array("Questions still open"),
                "finalRecommendation": {"type": "string"},
                "sessionId": {"type": "string"},
                "iteration": {"type": "integer", "minimum": 0},
                "nextContributionNeeded": {"type": "boolean"}
            },
            "required": ["topic", "personas", "contributions", "stage", "activePersonaId", "sessionId", "iteration", "nextContributionNeeded"]
        }),
    }
}

fn get_decide_tool() -> Tool {
    use crate::tools::{AnalysisType, DecisionStage, EisenhowerQuadrant, RiskTolerance};
    Tool {
        name: ToolName::Decide.to_string(),
        description: "Work through a structured decision analysis, one stage at a time.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "decisionStatement": {"type": "string"},
                "options": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string"},
                            "name": {"type": "string"},
                            "description": {"type": "string"}
                        },
                        "required": ["id", "name", "description"]
                    }
                },
                "criteria": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string"},
                            "name": {"type": "string"},
                            "description": {"type": "string"},
                            "weight": {"type": "number", "minimum": 0}
                        },
                        "required": ["id", "name", "description", "weight"]
                    }
                },
                "analysisType": {"type": "string", "enum": values::<AnalysisType>()},
                "stage": {"type": "string", "enum": values::<DecisionStage>()},
                "possibleOutcomes": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string"},
                            "description": {"type": "string"},
                            "probability": unit_interval("Probability of the outcome"),
                            "value": {"type": "number"},
                            "optionId": {"type": "string"},
                            "confidenceInEstimate": unit_interval("Confidence in the estimate")
                        },
                        "required": ["id", "description", "probability", "value", "optionId", "confidenceInEstimate"]
                    }
                },
                "recommendation": {"type": "string"},
                "rationale": {"type": "string"},
                "stakeholders": string_array("Affected stakeholders"),
                "constraints": string_array("Constraints on the decision"),
                "timeHorizon": {"type": "string"},
                "riskTolerance": {"type": "string", "enum": values::<RiskTolerance>()},
                "expectedValues": {"type": "object", "additionalProperties": {"type": "number"}},
                "multiCriteriaScores": {"type": "object", "additionalProperties": {"type": "number"}},
                "sensitivityInsights": string_array("Findings from sensitivity analysis"),
                "eisenhowerClassification": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "optionId": {"type": "string"},
                            "urgency": {"type": "number", "minimum": 1, "maximum": 5},
                            "importance": {"type": "number", "minimum": 1, "maximum": 5},
                            "quadrant": {"type": "string", "enum": values::<EisenhowerQuadrant>()}
                        },
                        "required": ["optionId", "urgency", "importance", "quadrant"]
                    }
                },
                "decisionId": {"type": "string"},
                "iteration": {"type": "integer", "minimum": 0},
                "nextStageNeeded": {"type": "boolean"}
            },
            "required": ["decisionStatement", "options", "analysisType", "stage", "decisionId", "iteration", "nextStageNeeded"]
        }),
    }
}

fn get_reflect_tool() -> Tool {
    use crate::tools::{ClaimStatus, KnowledgeLevel, MonitoringStage};
    Tool {
        name: ToolName::Reflect.to_string(),
        description: "Monitor your own knowledge, claims and reasoning quality while working on a task.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "task": {"type": "string"},
                "stage": {"type": "string", "enum": values::<MonitoringStage>()},
                "knowledgeAssessment": {
                    "type": "object",
                    "properties": {
                        "domain": {"type": "string"},
                        "knowledgeLevel": {"type": "string", "enum": values::<KnowledgeLevel>()},
                        "confidenceScore": unit_interval("Confidence in this assessment"),
                        "supportingEvidence": {"type": "string"},
                        "knownLimitations": {"type": "array", "items": {"type": "string"}}
                    },
                    "required": ["domain", "knowledgeLevel", "confidenceScore", "supportingEvidence", "knownLimitations"]
                },
                "claims": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "claim": {"type": "string"},
                            "status": {"type": "string", "enum": values::<ClaimStatus>()},
                            "confidenceScore": unit_interval("Confidence in the claim"),
                            "evidenceBasis": {"type": "string"}
                        },
                        "required": ["claim", "status", "confidenceScore", "evidenceBasis"]
                    }
                },
                "reasoningSteps": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "step": {"type": "string"},
                            "potentialBiases": {"type": "array", "items": {"type": "string"}},
                            "assumptions": {"type": "array", "items": {"type": "string"}},
                            "logicalValidity": unit_interval("Logical validity of the step"),
                            "inferenceStrength": unit_interval("Strength of the inference")
                        },
                        "required": ["step", "potentialBiases", "assumptions", "logicalValidity", "inferenceStrength"]
                    }
                },
                "overallConfidence": unit_interval("Overall confidence"),
                "uncertaintyAreas": string_array("Areas of uncertainty"),
                "recommendedApproach": {"type": "string"},
                "monitoringId": {"type": "string"},
                "iteration": {"type": "integer", "minimum": 0},
                "nextAssessmentNeeded": {"type": "boolean"}
            },
            "required": ["task", "stage", "overallConfidence", "uncertaintyAreas", "recommendedApproach", "monitoringId", "iteration", "nextAssessmentNeeded"]
        }),
    }
}

fn get_hypothesis_tool() -> Tool {
    use crate::tools::{HypothesisStatus, InquiryStage, VariableType};
    Tool {
        name: ToolName::Hypothesis.to_string(),
        description: "Follow the scientific method: observe, question, hypothesize, experiment, analyze and conclude.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "stage": {"type": "string", "enum": values::<InquiryStage>()},
                "observation": {"type": "string"},
                "question": {"type": "string"},
                "hypothesis": {
                    "type": "object",
                    "properties": {
                        "statement": {"type": "string"},
                        "variables": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": {"type": "string"},
                                    "type": {"type": "string", "enum": values::<VariableType>()}
                                },
                                "required": ["name", "type"]
                            }
                        },
                        "assumptions": {"type": "array", "items": {"type": "string"}},
                        "hypothesisId": {"type": "string"},
                        "confidence": unit_interval("Confidence in the hypothesis"),
                        "domain": {"type": "string"},
                        "iteration": {"type": "integer", "minimum": 0},
                        "alternativeTo": {"type": "array", "items": {"type": "string"}},
                        "refinementOf": {"type": "string"},
                        "status": {"type": "string", "enum": values::<HypothesisStatus>()}
                    },
                    "required": ["statement", "variables", "assumptions", "hypothesisId", "confidence", "domain", "iteration", "status"]
                },
                "experiment": {
                    "type": "object",
                    "properties": {
                        "design": {"type": "string"},
                        "methodology": {"type": "string"},
                        "predictions": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "if": {"type": "string"},
                                    "then": {"type": "string"}
                                },
                                "required": ["if", "then"]
                            }
                        },
                        "experimentId": {"type": "string"},
                        "hypothesisId": {"type": "string"},
                        "controlMeasures": {"type": "array", "items": {"type": "string"}},
                        "results": {"type": "string"},
                        "outcomeMatched": {"type": "boolean"}
                    },
                    "required": ["design", "methodology", "predictions", "experimentId", "hypothesisId", "controlMeasures"]
                },
                "analysis": {"type": "string"},
                "conclusion": {"type": "string"},
                "inquiryId": {"type": "string"},
                "iteration": {"type": "integer", "minimum": 0},
                "nextStageNeeded": {"type": "boolean"}
            },
            "required": ["stage", "inquiryId", "iteration", "nextStageNeeded"]
        }),
    }
}

fn get_debate_tool() -> Tool {
    use crate::tools::ArgumentType;
    Tool {
        name: ToolName::Debate.to_string(),
        description: "Build a structured argument graph of theses, antitheses, objections, rebuttals and syntheses.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "argumentId": {"type": "string", "description": "Assigned when omitted"},
                "claim": {"type": "string"},
                "premises": {"type": "array", "items": {"type": "string"}, "minItems": 1},
                "conclusion": {"type": "string"},
                "argumentType": {"type": "string", "enum": values::<ArgumentType>()},
                "confidence": unit_interval("Confidence in the argument"),
                "respondsTo": {"type": "string"},
                "supports": string_array("Arguments this one supports"),
                "contradicts": string_array("Arguments this one contradicts"),
                "strengths": string_array("Strengths of the argument"),
                "weaknesses": string_array("Weaknesses of the argument"),
                "nextArgumentNeeded": {"type": "boolean"},
                "sessionId": {"type": "string"}
            },
            "required": ["claim", "premises", "conclusion", "argumentType", "confidence", "nextArgumentNeeded"]
        }),
    }
}

fn get_map_tool() -> Tool {
    use crate::tools::{DiagramOperationKind, DiagramType, ElementType, TransformationType};
    Tool {
        name: ToolName::Map.to_string(),
        description: "Build and edit a diagram incrementally to reason visually about structure and relationships.".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "operation": {"type": "string", "enum": values::<DiagramOperationKind>()},
                "elements": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string"},
                            "type": {"type": "string", "enum": values::<ElementType>()},
                            "label": {"type": "string"},
                            "properties": {"type": "object", "additionalProperties": true},
                            "source": {"type": "string"},
                            "target": {"type": "string"},
                            "contains": {"type": "array", "items": {"type": "string"}}
                        },
                        "required": ["id", "type"]
                    }
                },
                "transformationType": {"type": "string", "enum": values::<TransformationType>()},
                "diagramId": {"type": "string"},
                "diagramType": {"type": "string", "enum": values::<DiagramType>()},
                "iteration": {"type": "integer", "minimum": 0},
                "observation": {"type": "string"},
                "insight": {"type": "string"},
                "hypothesis": {"type": "string"},
                "nextOperationNeeded": {"type": "boolean"}
            },
            "required": ["operation", "diagramId", "diagramType", "iteration", "nextOperationNeeded"]
        }),
    }
}
