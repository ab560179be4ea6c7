//! Thought sequence tool - numbered thoughts with revision and branch edges.
//!
//! Thoughts are echoed back verbatim. The per-session history is an arena of
//! recorded thoughts indexed by `thoughtNumber`, plus a branch index keyed by
//! `branchId`. Whether `revisesThought`/`branchFromThought` must point at a
//! recorded thought is a configuration choice: by default unresolved
//! references are reported as warnings, in strict mode they are rejected.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{EngineResult, InvariantError};
use crate::session::{SessionStore, DEFAULT_SESSION};
use crate::validation::{validate, Record, Validate};

/// A single thought in a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtData {
    pub thought: String,
    pub thought_number: u64,
    pub total_thoughts: u64,
    pub next_thought_needed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_revision: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revises_thought: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_from_thought: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needs_more_thoughts: Option<bool>,
    /// History to record into; defaults to the shared default session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Validate for ThoughtData {
    fn read(r: &Record<'_>) -> Self {
        Self {
            thought: r.required_str("thought"),
            thought_number: r.positive_int("thoughtNumber"),
            total_thoughts: r.positive_int("totalThoughts"),
            next_thought_needed: r.required_bool("nextThoughtNeeded"),
            is_revision: r.optional_bool("isRevision"),
            revises_thought: r.optional_positive_int("revisesThought"),
            branch_from_thought: r.optional_positive_int("branchFromThought"),
            branch_id: r.optional_str("branchId"),
            needs_more_thoughts: r.optional_bool("needsMoreThoughts"),
            session_id: r.optional_str("sessionId"),
        }
    }
}

impl ThoughtData {
    /// Create a thought with just the required fields.
    pub fn new(thought: impl Into<String>, thought_number: u64, total_thoughts: u64) -> Self {
        Self {
            thought: thought.into(),
            thought_number,
            total_thoughts,
            next_thought_needed: thought_number < total_thoughts,
            is_revision: None,
            revises_thought: None,
            branch_from_thought: None,
            branch_id: None,
            needs_more_thoughts: None,
            session_id: None,
        }
    }

    /// Mark this thought as a revision of an earlier one.
    pub fn revising(mut self, thought_number: u64) -> Self {
        self.is_revision = Some(true);
        self.revises_thought = Some(thought_number);
        self
    }

    /// Start or extend a branch anchored at an earlier thought.
    pub fn branching(mut self, from: u64, branch_id: impl Into<String>) -> Self {
        self.branch_from_thought = Some(from);
        self.branch_id = Some(branch_id.into());
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Plain-text rendering of the thought with its position and edges.
    pub fn render(&self) -> String {
        let context = if self.is_revision == Some(true) {
            match self.revises_thought {
                Some(n) => format!(" (revising thought {})", n),
                None => " (revision)".to_string(),
            }
        } else if let Some(from) = self.branch_from_thought {
            format!(
                " (branch {} from thought {})",
                self.branch_id.as_deref().unwrap_or("unnamed"),
                from
            )
        } else {
            String::new()
        };

        let label = if self.is_revision == Some(true) {
            "Revision"
        } else if self.branch_from_thought.is_some() {
            "Branch"
        } else {
            "Thought"
        };

        format!(
            "{} {}/{}{}\n{}",
            label, self.thought_number, self.total_thoughts, context, self.thought
        )
    }
}

/// Recorded thoughts for one session.
#[derive(Debug, Clone, Default)]
pub struct ThoughtHistory {
    thoughts: Vec<ThoughtData>,
    by_number: HashMap<u64, Vec<usize>>,
    branch_order: Vec<String>,
    branches: HashMap<String, Vec<usize>>,
}

impl ThoughtHistory {
    pub fn len(&self) -> usize {
        self.thoughts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thoughts.is_empty()
    }

    /// Branch ids in the order they were first seen.
    pub fn branch_ids(&self) -> Vec<String> {
        self.branch_order.clone()
    }

    /// Thoughts recorded under a branch.
    pub fn branch(&self, branch_id: &str) -> Vec<&ThoughtData> {
        self.branches
            .get(branch_id)
            .map(|idx| idx.iter().map(|&i| &self.thoughts[i]).collect())
            .unwrap_or_default()
    }

    pub fn contains_number(&self, thought_number: u64) -> bool {
        self.by_number.contains_key(&thought_number)
    }

    /// References on `thought` that do not resolve to a recorded thought.
    fn unresolved(&self, thought: &ThoughtData) -> Vec<(&'static str, u64)> {
        [
            ("revisesThought", thought.revises_thought),
            ("branchFromThought", thought.branch_from_thought),
        ]
        .into_iter()
        .filter_map(|(field, n)| n.map(|n| (field, n)))
        .filter(|(_, n)| !self.contains_number(*n))
        .collect()
    }

    fn record(&mut self, thought: ThoughtData) {
        let index = self.thoughts.len();
        self.by_number
            .entry(thought.thought_number)
            .or_default()
            .push(index);

        if let Some(branch_id) = &thought.branch_id {
            if !self.branches.contains_key(branch_id) {
                self.branch_order.push(branch_id.clone());
            }
            self.branches
                .entry(branch_id.clone())
                .or_default()
                .push(index);
        }

        self.thoughts.push(thought);
    }
}

/// Projection returned by the trace tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceResult {
    /// The submitted thought, echoed field-for-field.
    #[serde(flatten)]
    pub thought: ThoughtData,
    pub thought_history_length: usize,
    pub branches: Vec<String>,
    pub rendering: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Thought sequence tool handler.
pub struct TraceTool {
    sessions: SessionStore<ThoughtHistory>,
    strict_references: bool,
}

impl TraceTool {
    /// Create a trace tool; `strict_references` rejects unresolved edges.
    pub fn new(strict_references: bool) -> Self {
        Self {
            sessions: SessionStore::new("trace"),
            strict_references,
        }
    }

    /// Validate, record and echo a thought.
    pub async fn process(&self, arguments: &Value) -> EngineResult<TraceResult> {
        let thought: ThoughtData = validate(arguments)?;
        let session_id = thought
            .session_id
            .clone()
            .unwrap_or_else(|| DEFAULT_SESSION.to_string());

        debug!(
            session_id = %session_id,
            thought_number = thought.thought_number,
            "Processing thought"
        );

        let strict = self.strict_references;
        let result = self
            .sessions
            .update(&session_id, |history| {
                let unresolved = history.unresolved(&thought);
                if strict {
                    if let Some((field, n)) = unresolved.first() {
                        return Err(InvariantError::DanglingReference {
                            field: field.to_string(),
                            id: n.to_string(),
                        });
                    }
                }

                let warnings = unresolved
                    .iter()
                    .map(|(field, n)| format!("{} refers to thought {} which has not been recorded", field, n))
                    .collect();

                let rendering = thought.render();
                history.record(thought.clone());

                Ok(TraceResult {
                    thought,
                    thought_history_length: history.len(),
                    branches: history.branch_ids(),
                    rendering,
                    warnings,
                })
            })
            .await?;

        info!(
            session_id = %session_id,
            thought_number = result.thought.thought_number,
            history = result.thought_history_length,
            "Thought recorded"
        );

        Ok(result)
    }

    /// Snapshot of a session's thought history.
    pub async fn history(&self, session_id: &str) -> Option<ThoughtHistory> {
        self.sessions.get(session_id).await
    }
}
