//! Configuration types for Stream MCP Server.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::stream::{StreamRequest, DEFAULT_COUNT, DEFAULT_INTERVAL_MS};
use crate::Error;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Server configuration loaded from YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Server settings
    pub server: ServerSettings,
    /// Notification stream defaults
    pub stream: StreamSettings,
    /// Static resource settings
    pub resource: ResourceSettings,
}

impl ServerConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        let config: ServerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> crate::Result<()> {
        if self.server.name.trim().is_empty() {
            return Err(Error::Config("server.name cannot be empty".to_string()));
        }

        // Only stdio is wired up in the binary
        if self.server.transport != "stdio" {
            return Err(Error::Config(format!(
                "unsupported transport '{}' (expected 'stdio')",
                self.server.transport
            )));
        }

        if !LOG_LEVELS.contains(&self.server.log_level.as_str()) {
            return Err(Error::Config(format!(
                "invalid log_level '{}' (expected one of {})",
                self.server.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        self.resource.validate()
    }
}

/// Server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Name reported to clients during initialization
    pub name: String,
    /// Transport type (only stdio)
    pub transport: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "stateless-server".to_string(),
            transport: "stdio".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Defaults applied when a stream request omits a parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSettings {
    /// Interval used when the caller gives none
    pub default_interval_ms: u64,
    /// Count used when the caller gives none (0 = unbounded)
    pub default_count: u64,
}

impl StreamSettings {
    /// Build a request, filling absent fields from these defaults.
    pub fn request(&self, interval_ms: Option<u64>, count: Option<u64>) -> StreamRequest {
        StreamRequest::new(
            interval_ms.unwrap_or(self.default_interval_ms),
            count.unwrap_or(self.default_count),
        )
    }
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            default_interval_ms: DEFAULT_INTERVAL_MS,
            default_count: DEFAULT_COUNT,
        }
    }
}

/// Static resource settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceSettings {
    /// Resource name shown in listings
    pub name: String,
    /// Fixed URI the document is served under
    pub uri: String,
}

impl ResourceSettings {
    /// Validate the resource settings.
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Config("resource.name cannot be empty".to_string()));
        }
        if !self.uri.contains("://") {
            return Err(Error::Config(format!(
                "resource.uri '{}' is not an absolute URI",
                self.uri
            )));
        }
        Ok(())
    }
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            name: "greeting-resource".to_string(),
            uri: "https://wrapship.pro".to_string(),
        }
    }
}
