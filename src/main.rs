use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clear_reasoning::{
    config::{Config, LogFormat},
    server::{AppState, McpServer},
};

/// Structured reasoning tools served over MCP stdio.
#[derive(Debug, Parser)]
#[command(name = "clear-reasoning", version, about)]
struct Cli {
    /// Log level or filter directive (overrides LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format: pretty or json (overrides LOG_FORMAT)
    #[arg(long, value_parser = parse_log_format)]
    log_format: Option<LogFormat>,

    /// Reject thoughts that revise or branch from unseen thoughts
    #[arg(long)]
    strict_thoughts: bool,
}

fn parse_log_format(raw: &str) -> Result<LogFormat, String> {
    raw.parse()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    cli.apply(&mut config);

    // Initialize logging
    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        server = %config.server.name,
        "Clear Reasoning Server starting..."
    );

    let state = Arc::new(AppState::new(config));
    let server = McpServer::new(state);

    info!("Server ready, waiting for requests on stdin...");

    if let Err(e) = server.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        if self.strict_thoughts {
            config.engine.strict_thought_references = true;
        }
    }
}

/// Initialize tracing/logging
///
/// Logs go to stderr; stdout carries the protocol.
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "clear-reasoning",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--strict-thoughts",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.engine.strict_thought_references);
    }

    #[test]
    fn test_cli_defaults_leave_config_alone() {
        let cli = Cli::parse_from(["clear-reasoning"]);
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(config.logging.level, "info");
        assert!(!config.engine.strict_thought_references);
    }
}
