//! Error types for the Stream MCP Server.

use thiserror::Error;

/// Main error type for Stream MCP operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A single notification could not be delivered to the session
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// The session channel is closed and accepts no more messages
    #[error("Session channel closed")]
    ChannelClosed,

    /// Invalid input or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parse errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_error() {
        let err = Error::Delivery("transport closed".to_string());
        assert_eq!(err.to_string(), "Delivery failed: transport closed");
    }

    #[test]
    fn test_channel_closed_error() {
        assert_eq!(Error::ChannelClosed.to_string(), "Session channel closed");
    }

    #[test]
    fn test_invalid_input_error() {
        let err = Error::InvalidInput("interval must be an integer".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid input: interval must be an integer"
        );
    }

    #[test]
    fn test_config_error() {
        let err = Error::Config("unknown transport: tcp".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: unknown transport: tcp"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<i32>("invalid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<Vec<u32>>("{not: [a list").unwrap_err();
        let err: Error = yaml_err.into();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn test_other_error() {
        let err = Error::Other("unknown error".to_string());
        assert_eq!(err.to_string(), "unknown error");
    }
}
