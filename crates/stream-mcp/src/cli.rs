//! Command line interface.

use std::path::PathBuf;

use clap::Parser;

use stream_mcp_core::ServerConfig;

/// Stateless MCP server with a periodic notification stream tool.
#[derive(Debug, Parser)]
#[command(name = "stream-mcp", version, about)]
pub struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, env = "STREAM_MCP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level override (RUST_LOG still takes precedence)
    #[arg(long, value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: Option<String>,
}

impl Cli {
    /// Load the configuration file (or defaults) and apply CLI overrides.
    pub fn load_config(&self) -> stream_mcp_core::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(level) = &self.log_level {
            config.server.log_level = level.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
