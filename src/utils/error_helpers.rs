use crate::error::{ApiError, DisplayError};
use std::io;
use std::time::Duration;

/// Helper functions for standardizing error conversions across the codebase.
/// Convert reqwest transport errors to ApiError with endpoint context
pub fn convert_request_error(
    error: reqwest::Error,
    endpoint: &str,
    timeout: Option<Duration>,
) -> ApiError {
    if error.is_timeout() {
        return convert_timeout_error(endpoint, timeout.map(|t| t.as_secs()).unwrap_or(0));
    }
    ApiError::Transport {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert timeout errors to ApiError with endpoint context
pub fn convert_timeout_error(endpoint: &str, timeout_secs: u64) -> ApiError {
    ApiError::Timeout {
        timeout_secs,
        endpoint: endpoint.to_string(),
    }
}

/// Convert JSON deserialization errors to ApiError with endpoint context
pub fn convert_json_error(error: serde_json::Error, endpoint: &str) -> ApiError {
    ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: error.to_string(),
    }
}

/// Convert IO errors to DisplayError for terminal operations
pub fn convert_io_to_display_error(error: io::Error, operation: &str) -> DisplayError {
    DisplayError::TerminalOutput(format!("{}: {}", operation, error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_timeout_error() {
        let api_error = convert_timeout_error("/stats", 30);
        match api_error {
            ApiError::Timeout {
                endpoint,
                timeout_secs,
            } => {
                assert_eq!(endpoint, "/stats");
                assert_eq!(timeout_secs, 30);
            }
            _ => panic!("Expected Timeout error"),
        }
    }

    #[test]
    fn test_convert_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        match convert_json_error(json_error, "/inventory") {
            ApiError::Decode { endpoint, message } => {
                assert_eq!(endpoint, "/inventory");
                assert!(!message.is_empty());
            }
            _ => panic!("Expected Decode error"),
        }
    }

    #[test]
    fn test_convert_io_to_display_error() {
        let io_error = io::Error::new(io::ErrorKind::BrokenPipe, "test");
        let display_error = convert_io_to_display_error(io_error, "write");

        match display_error {
            DisplayError::TerminalOutput(msg) => assert!(msg.contains("write")),
            _ => panic!("Expected TerminalOutput error"),
        }
    }
}
