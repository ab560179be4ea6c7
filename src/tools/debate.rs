//! Structured argumentation - a directed graph of claims.
//!
//! Nodes are arguments; edges are `respondsTo`, `supports` and `contradicts`.
//! Self references and supporting/contradicting the same target are rejected.
//! Edges to arguments the session has not seen are kept and reported back as
//! `unresolvedReferences`; resolving them is the caller's job.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{EngineResult, InvariantError};
use crate::session::{SessionStore, DEFAULT_SESSION};
use crate::validation::{validate, Record, Validate};
use crate::wire_enum;

wire_enum! {
    /// Role an argument plays in the dialectic.
    pub enum ArgumentType {
        Thesis => "thesis",
        Antithesis => "antithesis",
        Synthesis => "synthesis",
        Objection => "objection",
        Rebuttal => "rebuttal",
    }
}

/// Argument types worth considering after one of type `current`.
///
/// Advisory only; the engine accepts any type next.
pub fn suggested_next_types(current: ArgumentType) -> &'static [ArgumentType] {
    use ArgumentType::*;
    match current {
        Thesis => &[Antithesis, Objection],
        Antithesis => &[Synthesis, Rebuttal],
        Objection | Rebuttal => &[Synthesis, Rebuttal],
        Synthesis => &[Thesis],
    }
}

/// A single argument node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument_id: Option<String>,
    pub claim: String,
    pub premises: Vec<String>,
    pub conclusion: String,
    pub argument_type: ArgumentType,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responds_to: Option<String>,
    #[serde(default)]
    pub supports: Vec<String>,
    #[serde(default)]
    pub contradicts: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    pub next_argument_needed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl Validate for ArgumentData {
    fn read(r: &Record<'_>) -> Self {
        let responds_to = match r.raw("respondsTo") {
            Some(Value::Array(_)) => {
                r.reject("respondsTo", "must be a single argument id, not a list");
                None
            }
            _ => r.optional_str("respondsTo"),
        };

        Self {
            argument_id: r.optional_str("argumentId"),
            claim: r.required_str("claim"),
            premises: r.string_list("premises", true),
            conclusion: r.required_str("conclusion"),
            argument_type: r.enumeration("argumentType"),
            confidence: r.unit_interval("confidence"),
            responds_to,
            supports: r.optional_string_list("supports"),
            contradicts: r.optional_string_list("contradicts"),
            strengths: r.optional_string_list("strengths"),
            weaknesses: r.optional_string_list("weaknesses"),
            next_argument_needed: r.required_bool("nextArgumentNeeded"),
            session_id: r.optional_str("sessionId"),
        }
    }
}

impl ArgumentData {
    /// Every id this argument points at, tagged with the edge field.
    fn references(&self) -> impl Iterator<Item = (&'static str, &String)> + '_ {
        self.responds_to
            .iter()
            .map(|id| ("respondsTo", id))
            .chain(self.supports.iter().map(|id| ("supports", id)))
            .chain(self.contradicts.iter().map(|id| ("contradicts", id)))
    }
}

/// Accumulated argument graph for one session.
#[derive(Debug, Clone, Default)]
pub struct ArgumentGraph {
    arguments: Vec<ArgumentData>,
    index: HashMap<String, usize>,
    sequence: u64,
}

impl ArgumentGraph {
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ArgumentData> {
        self.index.get(id).map(|&i| &self.arguments[i])
    }

    fn next_id(&mut self) -> String {
        loop {
            self.sequence += 1;
            let id = format!("arg-{}", self.sequence);
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    /// Insert a new node or replace an existing one with the same id.
    fn upsert(&mut self, id: String, argument: ArgumentData) {
        match self.index.get(&id) {
            Some(&i) => self.arguments[i] = argument,
            None => {
                self.index.insert(id, self.arguments.len());
                self.arguments.push(argument);
            }
        }
    }

    /// Root of the `respondsTo` chain an argument belongs to.
    fn thread_root<'a>(&'a self, mut id: &'a str) -> &'a str {
        let mut seen = HashSet::new();
        while seen.insert(id) {
            match self.get(id).and_then(|a| a.responds_to.as_deref()) {
                Some(parent) if self.index.contains_key(parent) => id = parent,
                _ => break,
            }
        }
        id
    }

    /// Threads whose most recent argument still asks for a follow-up.
    pub fn open_threads(&self) -> usize {
        let mut latest: HashMap<&str, bool> = HashMap::new();
        for argument in &self.arguments {
            if let Some(id) = argument.argument_id.as_deref() {
                latest.insert(self.thread_root(id), argument.next_argument_needed);
            }
        }
        latest.values().filter(|open| **open).count()
    }
}

/// Projection returned by the debate tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateResult {
    pub argument_id: String,
    pub argument_type: ArgumentType,
    pub claim: String,
    pub confidence: f64,
    pub suggested_next_types: Vec<ArgumentType>,
    pub unresolved_references: Vec<String>,
    pub argument_count: usize,
    pub open_threads: usize,
    pub next_argument_needed: bool,
}

/// Structured argumentation tool handler.
pub struct DebateTool {
    sessions: SessionStore<ArgumentGraph>,
}

impl DebateTool {
    pub fn new() -> Self {
        Self {
            sessions: SessionStore::new("debate"),
        }
    }

    /// Validate an argument and add it to the session graph.
    pub async fn process(&self, arguments: &Value) -> EngineResult<DebateResult> {
        let mut argument: ArgumentData = validate(arguments)?;

        let conflicts: Vec<String> = argument
            .supports
            .iter()
            .filter(|id| argument.contradicts.contains(id))
            .cloned()
            .collect();
        if !conflicts.is_empty() {
            return Err(InvariantError::ConflictingEdges { ids: conflicts }.into());
        }

        let session_id = argument
            .session_id
            .clone()
            .unwrap_or_else(|| DEFAULT_SESSION.to_string());

        let result = self
            .sessions
            .update(&session_id, |graph| {
                let id = match argument.argument_id.clone() {
                    Some(id) => id,
                    None => graph.next_id(),
                };

                if let Some((field, _)) = argument.references().find(|(_, r)| **r == id) {
                    return Err(InvariantError::SelfReference {
                        field: field.to_string(),
                        id,
                    });
                }

                let unresolved: Vec<String> = {
                    let mut seen = HashSet::new();
                    argument
                        .references()
                        .map(|(_, r)| r)
                        .filter(|r| !graph.index.contains_key(*r) && seen.insert(*r))
                        .cloned()
                        .collect()
                };

                debug!(argument_id = %id, unresolved = unresolved.len(), "Recording argument");

                argument.argument_id = Some(id.clone());
                let result = DebateResult {
                    argument_id: id.clone(),
                    argument_type: argument.argument_type,
                    claim: argument.claim.clone(),
                    confidence: argument.confidence,
                    suggested_next_types: suggested_next_types(argument.argument_type).to_vec(),
                    unresolved_references: unresolved,
                    argument_count: 0,
                    open_threads: 0,
                    next_argument_needed: argument.next_argument_needed,
                };
                graph.upsert(id, argument);

                Ok(DebateResult {
                    argument_count: graph.len(),
                    open_threads: graph.open_threads(),
                    ..result
                })
            })
            .await?;

        info!(
            session_id = %session_id,
            argument_id = %result.argument_id,
            argument_type = %result.argument_type,
            "Argument recorded"
        );

        Ok(result)
    }

    /// Snapshot of a session's argument graph.
    pub async fn graph(&self, session_id: &str) -> Option<ArgumentGraph> {
        self.sessions.get(session_id).await
    }
}

impl Default for DebateTool {
    fn default() -> Self {
        Self::new()
    }
}
