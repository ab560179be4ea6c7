//! Metacognitive monitoring.
//!
//! Records how confident the caller is in its own knowledge, claims and
//! reasoning steps. Nothing is accumulated between calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::EngineResult;
use crate::validation::{validate, Record, Validate};
use crate::wire_enum;

wire_enum! {
    pub enum MonitoringStage {
        KnowledgeAssessment => "knowledge-assessment",
        Planning => "planning",
        Execution => "execution",
        Monitoring => "monitoring",
        Evaluation => "evaluation",
        Reflection => "reflection",
    }
}

wire_enum! {
    pub enum KnowledgeLevel {
        Expert => "expert",
        Proficient => "proficient",
        Familiar => "familiar",
        Basic => "basic",
        Minimal => "minimal",
        NoKnowledge => "none",
    }
}

wire_enum! {
    pub enum ClaimStatus {
        Fact => "fact",
        Inference => "inference",
        Speculation => "speculation",
        Uncertain => "uncertain",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeAssessment {
    pub domain: String,
    pub knowledge_level: KnowledgeLevel,
    pub confidence_score: f64,
    pub supporting_evidence: String,
    pub known_limitations: Vec<String>,
}

impl Validate for KnowledgeAssessment {
    fn read(r: &Record<'_>) -> Self {
        Self {
            domain: r.required_str("domain"),
            knowledge_level: r.enumeration("knowledgeLevel"),
            confidence_score: r.unit_interval("confidenceScore"),
            supporting_evidence: r.required_str("supportingEvidence"),
            known_limitations: r.string_list("knownLimitations", false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimAssessment {
    pub claim: String,
    pub status: ClaimStatus,
    pub confidence_score: f64,
    pub evidence_basis: String,
}

impl Validate for ClaimAssessment {
    fn read(r: &Record<'_>) -> Self {
        Self {
            claim: r.required_str("claim"),
            status: r.enumeration("status"),
            confidence_score: r.unit_interval("confidenceScore"),
            evidence_basis: r.required_str("evidenceBasis"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasoningAssessment {
    pub step: String,
    pub potential_biases: Vec<String>,
    pub assumptions: Vec<String>,
    pub logical_validity: f64,
    pub inference_strength: f64,
}

impl Validate for ReasoningAssessment {
    fn read(r: &Record<'_>) -> Self {
        Self {
            step: r.required_str("step"),
            potential_biases: r.string_list("potentialBiases", false),
            assumptions: r.string_list("assumptions", false),
            logical_validity: r.unit_interval("logicalValidity"),
            inference_strength: r.unit_interval("inferenceStrength"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetacognitiveMonitoring {
    pub task: String,
    pub stage: MonitoringStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_assessment: Option<KnowledgeAssessment>,
    #[serde(default)]
    pub claims: Vec<ClaimAssessment>,
    #[serde(default)]
    pub reasoning_steps: Vec<ReasoningAssessment>,
    pub overall_confidence: f64,
    pub uncertainty_areas: Vec<String>,
    pub recommended_approach: String,
    pub monitoring_id: String,
    pub iteration: u64,
    pub next_assessment_needed: bool,
}

impl Validate for MetacognitiveMonitoring {
    fn read(r: &Record<'_>) -> Self {
        Self {
            task: r.required_str("task"),
            stage: r.enumeration("stage"),
            knowledge_assessment: r.optional_nested("knowledgeAssessment"),
            claims: r.optional_list("claims").unwrap_or_default(),
            reasoning_steps: r.optional_list("reasoningSteps").unwrap_or_default(),
            overall_confidence: r.unit_interval("overallConfidence"),
            uncertainty_areas: r.string_list("uncertaintyAreas", false),
            recommended_approach: r.required_str("recommendedApproach"),
            monitoring_id: r.required_str("monitoringId"),
            iteration: r.non_negative_int("iteration"),
            next_assessment_needed: r.required_bool("nextAssessmentNeeded"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectResult {
    pub task: String,
    pub stage: MonitoringStage,
    pub overall_confidence: f64,
    pub claim_count: usize,
    pub reasoning_step_count: usize,
    pub uncertainty_area_count: usize,
    pub knowledge_level: Option<KnowledgeLevel>,
    pub monitoring_id: String,
    pub iteration: u64,
    pub next_assessment_needed: bool,
}

/// Metacognitive monitoring tool handler.
#[derive(Debug, Default)]
pub struct ReflectTool;

impl ReflectTool {
    pub fn process(&self, arguments: &Value) -> EngineResult<ReflectResult> {
        let monitoring: MetacognitiveMonitoring = validate(arguments)?;

        info!(
            monitoring_id = %monitoring.monitoring_id,
            stage = %monitoring.stage,
            confidence = monitoring.overall_confidence,
            "Metacognitive assessment recorded"
        );

        Ok(ReflectResult {
            claim_count: monitoring.claims.len(),
            reasoning_step_count: monitoring.reasoning_steps.len(),
            uncertainty_area_count: monitoring.uncertainty_areas.len(),
            knowledge_level: monitoring
                .knowledge_assessment
                .as_ref()
                .map(|k| k.knowledge_level),
            task: monitoring.task,
            stage: monitoring.stage,
            overall_confidence: monitoring.overall_confidence,
            monitoring_id: monitoring.monitoring_id,
            iteration: monitoring.iteration,
            next_assessment_needed: monitoring.next_assessment_needed,
        })
    }
}
