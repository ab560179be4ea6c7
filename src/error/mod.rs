use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// MCP protocol errors
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Unknown tool: {tool_name}")]
    UnknownTool { tool_name: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single offending field reported by the schema validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Dotted path of the field, e.g. `personas[1].communication.tone`.
    pub field: String,
    /// Why the field was rejected.
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Structural validation failure listing every violated field.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Validation failed: {}", summarize(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} - {}", v.field, v.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Build an error carrying a single violation.
    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, reason)],
        }
    }

    /// Whether the given field path was rejected.
    pub fn mentions(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

/// Cross-field, cross-call and stage-sequencing violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantError {
    #[error("Stage regression: cannot move from {current} back to {requested}")]
    StageRegression { current: String, requested: String },

    #[error("Iteration regression: {requested} is lower than recorded iteration {current}")]
    IterationRegression { current: u64, requested: u64 },

    #[error("Duplicate id in {field}: {id}")]
    DuplicateId { field: String, id: String },

    #[error("Dangling reference in {field}: {id} does not exist")]
    DanglingReference { field: String, id: String },

    #[error("Unknown persona in {field}: {persona_id} is not part of the deliberation")]
    UnknownPersona { field: String, persona_id: String },

    #[error("Persona {persona_id} cannot be changed once introduced")]
    PersonaMutated { persona_id: String },

    #[error("Turn-taking violation for {persona_id}: {reason}")]
    TurnTaking { persona_id: String, reason: String },

    #[error("Self reference in {field}: argument {id} cannot reference itself")]
    SelfReference { field: String, id: String },

    #[error("Argument both supports and contradicts: {}", .ids.join(", "))]
    ConflictingEdges { ids: Vec<String> },

    #[error("Unknown element: {id}")]
    UnknownElement { id: String },

    #[error("Transform operations require a transformationType")]
    MissingTransformation,

    #[error("Diagram {diagram_id} is a {expected}, not a {requested}")]
    DiagramTypeMismatch {
        diagram_id: String,
        expected: String,
        requested: String,
    },

    #[error("Diagram {diagram_id} is closed to further changes")]
    DiagramClosed { diagram_id: String },

    #[error("Eisenhower quadrant for {option_id} should be {expected}, got {supplied}")]
    QuadrantMismatch {
        option_id: String,
        expected: String,
        supplied: String,
    },
}

impl InvariantError {
    /// Stable machine-readable code for the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            InvariantError::StageRegression { .. } => "STAGE_REGRESSION",
            InvariantError::IterationRegression { .. } => "ITERATION_REGRESSION",
            InvariantError::DuplicateId { .. } => "DUPLICATE_ID",
            InvariantError::DanglingReference { .. } => "DANGLING_REFERENCE",
            InvariantError::UnknownPersona { .. } => "UNKNOWN_PERSONA",
            InvariantError::PersonaMutated { .. } => "PERSONA_MUTATED",
            InvariantError::TurnTaking { .. } => "TURN_TAKING",
            InvariantError::SelfReference { .. } => "SELF_REFERENCE",
            InvariantError::ConflictingEdges { .. } => "CONFLICTING_EDGES",
            InvariantError::UnknownElement { .. } => "UNKNOWN_ELEMENT",
            InvariantError::MissingTransformation => "MISSING_TRANSFORMATION",
            InvariantError::DiagramTypeMismatch { .. } => "DIAGRAM_TYPE_MISMATCH",
            InvariantError::DiagramClosed { .. } => "DIAGRAM_CLOSED",
            InvariantError::QuadrantMismatch { .. } => "QUADRANT_MISMATCH",
        }
    }

    /// Structured details identifying the offending field or id.
    pub fn details(&self) -> Value {
        match self {
            InvariantError::StageRegression { current, requested } => {
                json!({ "field": "stage", "current": current, "requested": requested })
            }
            InvariantError::IterationRegression { current, requested } => {
                json!({ "field": "iteration", "current": current, "requested": requested })
            }
            InvariantError::DuplicateId { field, id }
            | InvariantError::DanglingReference { field, id }
            | InvariantError::SelfReference { field, id } => json!({ "field": field, "id": id }),
            InvariantError::UnknownPersona { field, persona_id } => {
                json!({ "field": field, "personaId": persona_id })
            }
            InvariantError::PersonaMutated { persona_id } => {
                json!({ "field": "personas", "personaId": persona_id })
            }
            InvariantError::TurnTaking { persona_id, reason } => {
                json!({ "field": "nextPersonaId", "personaId": persona_id, "reason": reason })
            }
            InvariantError::ConflictingEdges { ids } => {
                json!({ "field": "supports", "conflictsWith": "contradicts", "ids": ids })
            }
            InvariantError::UnknownElement { id } => json!({ "field": "elements", "id": id }),
            InvariantError::MissingTransformation => json!({ "field": "transformationType" }),
            InvariantError::DiagramTypeMismatch {
                diagram_id,
                expected,
                requested,
            } => json!({
                "field": "diagramType",
                "diagramId": diagram_id,
                "expected": expected,
                "requested": requested
            }),
            InvariantError::DiagramClosed { diagram_id } => {
                json!({ "field": "operation", "diagramId": diagram_id })
            }
            InvariantError::QuadrantMismatch {
                option_id,
                expected,
                supplied,
            } => json!({
                "field": "eisenhowerClassification",
                "optionId": option_id,
                "expected": expected,
                "supplied": supplied
            }),
        }
    }
}

/// Any failure a reasoning tool can report back to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Validation(_) => "VALIDATION_ERROR",
            EngineError::Invariant(e) => e.code(),
        }
    }

    pub fn details(&self) -> Value {
        match self {
            EngineError::Validation(e) => json!({ "violations": e.violations }),
            EngineError::Invariant(e) => e.details(),
        }
    }
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for MCP operations
pub type McpResult<T> = Result<T, McpError>;

/// Result type alias for reasoning tool operations
pub type EngineResult<T> = Result<T, EngineError>;
