//! Input validation for configuration values and filters.

use crate::error::CliError;

/// Largest page size the API accepts
pub const MAX_LIMIT: u32 = 1000;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> Result<(), CliError> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()));
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        )));
    }

    Ok(())
}

/// Page size must lie in `1..=1000`
pub fn validate_limit(limit: u32) -> Result<(), CliError> {
    if limit == 0 || limit > MAX_LIMIT {
        return Err(CliError::InvalidArguments(format!(
            "Limit must be between 1 and {}, got {}",
            MAX_LIMIT, limit
        )));
    }
    Ok(())
}

/// Parse the value of the `lego` filter: yes/no/all
pub fn parse_lego_flag(value: &str) -> Result<Option<bool>, CliError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "lego" => Ok(Some(true)),
        "no" | "false" | "non-lego" => Ok(Some(false)),
        "all" | "any" | "" => Ok(None),
        other => Err(CliError::InvalidArguments(format!(
            "Invalid LEGO filter '{}': use yes, no or all",
            other
        ))),
    }
}
