//! Server module for MCP protocol handling.
//!
//! This module provides:
//! - MCP server implementation over stdio
//! - Tool call routing into the reasoning tools
//! - Shared application state management

mod handlers;
mod mcp;

pub use handlers::*;
pub use mcp::*;

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::personas::PersonaRegistry;
use crate::tools::{
    CouncilTool, DebateTool, DebugTool, DecideTool, HypothesisTool, MapTool, ModelTool,
    ParadigmTool, PatternTool, ReflectTool, TraceTool,
};

/// Application state shared across handlers.
///
/// Holds one handler per tool. Stateful handlers own their session stores,
/// so sessions live exactly as long as this state does.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Persona roster used for council recommendations.
    pub persona_registry: Arc<PersonaRegistry>,
    pub trace: TraceTool,
    pub model: ModelTool,
    pub pattern: PatternTool,
    pub paradigm: ParadigmTool,
    pub debug: DebugTool,
    pub council: CouncilTool,
    pub decide: DecideTool,
    pub reflect: ReflectTool,
    pub hypothesis: HypothesisTool,
    pub debate: DebateTool,
    pub map: MapTool,
}

impl AppState {
    /// Create new application state with the built-in persona roster.
    pub fn new(config: Config) -> Self {
        Self::with_registry(config, Arc::new(PersonaRegistry::new()))
    }

    /// Create new application state with an explicit persona registry.
    pub fn with_registry(config: Config, persona_registry: Arc<PersonaRegistry>) -> Self {
        info!(
            strict_thought_references = config.engine.strict_thought_references,
            recommendation_limit = config.engine.recommendation_limit,
            personas = persona_registry.count(),
            "AppState initializing"
        );

        let council = CouncilTool::new(
            Arc::clone(&persona_registry),
            config.engine.recommendation_limit,
        );

        Self {
            trace: TraceTool::new(config.engine.strict_thought_references),
            model: ModelTool,
            pattern: PatternTool,
            paradigm: ParadigmTool,
            debug: DebugTool,
            council,
            decide: DecideTool::new(),
            reflect: ReflectTool,
            hypothesis: HypothesisTool,
            debate: DebateTool::new(),
            map: MapTool::new(),
            persona_registry,
            config,
        }
    }
}

/// Shared application state handle
pub type SharedState = Arc<AppState>;
