use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Default number of personas recommended per council call.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 3;

/// Default server name reported during the MCP handshake.
pub const DEFAULT_SERVER_NAME: &str = "clear-reasoning";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub engine: EngineConfig,
    pub server: ServerConfig,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!("Unknown log format: {}", other)),
        }
    }
}

/// Reasoning engine behaviour
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Reject thoughts whose `revisesThought`/`branchFromThought` point at
    /// thoughts the session has not seen.
    pub strict_thought_references: bool,
    /// Maximum personas recommended per council call.
    pub recommendation_limit: usize,
}

/// MCP server identity
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub name: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            // Unknown formats fall back to pretty output
            format: env::var("LOG_FORMAT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(LogFormat::Pretty),
        };

        let strict_thought_references = match env::var("ENGINE_STRICT_THOUGHT_REFERENCES") {
            Ok(raw) => parse_bool(&raw).ok_or_else(|| AppError::Config {
                message: format!(
                    "ENGINE_STRICT_THOUGHT_REFERENCES must be true or false, got '{}'",
                    raw
                ),
            })?,
            Err(_) => false,
        };

        let recommendation_limit = match env::var("COUNCIL_RECOMMENDATION_LIMIT") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(0) | Err(_) => {
                    return Err(AppError::Config {
                        message: format!(
                            "COUNCIL_RECOMMENDATION_LIMIT must be a positive integer, got '{}'",
                            raw
                        ),
                    })
                }
                Ok(n) => n,
            },
            Err(_) => DEFAULT_RECOMMENDATION_LIMIT,
        };

        let server = ServerConfig {
            name: env::var("SERVER_NAME").unwrap_or_else(|_| DEFAULT_SERVER_NAME.to_string()),
        };

        Ok(Config {
            logging,
            engine: EngineConfig {
                strict_thought_references,
                recommendation_limit,
            },
            server,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strict_thought_references: false,
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
        }
    }
}
