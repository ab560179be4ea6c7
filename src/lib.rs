//! # Clear Reasoning Server
//!
//! A Model Context Protocol (MCP) server that gives callers a place to lay
//! out their reasoning as structured artifacts. Every tool call is checked
//! for shape and consistency, folded into per-session state where relevant,
//! and answered with a uniform JSON envelope. No reasoning is generated
//! server-side.
//!
//! ## Tools
//!
//! - **trace**: Numbered thought chains with revisions and branches
//! - **model**, **pattern**, **paradigm**, **debug**: Single-shot framing artifacts
//! - **council**: Multi-persona deliberation with turn-taking and stage order
//! - **decide**: Staged decision analysis with options, criteria and outcomes
//! - **reflect**: Metacognitive monitoring of knowledge and claims
//! - **hypothesis**: Scientific method inquiries
//! - **debate**: Argument graphs with typed support and contradiction edges
//! - **map**: Incrementally edited diagrams
//!
//! ## Architecture
//!
//! ```text
//! MCP Client → stdio JSON-RPC → McpServer → handle_tool_call
//!                                              ↓
//!                         validate → enforce invariants → project
//!                                              ↓
//!                                   ToolResponse envelope
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use clear_reasoning::{Config, AppState, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let state = Arc::new(AppState::new(config));
//!     let server = McpServer::new(state);
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

/// Configuration management for the MCP server.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// Persona roster and topic-based recommendation for council sessions.
pub mod personas;
/// Uniform response envelope returned by every tool.
pub mod response;
/// MCP server implementation and request handling.
pub mod server;
/// In-memory per-session state.
pub mod session;
/// The reasoning tools.
pub mod tools;
/// Field-level validation of untyped tool arguments.
pub mod validation;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use response::ToolResponse;
pub use server::{AppState, McpServer, SharedState};
