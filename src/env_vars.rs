//! This module contains utility functions and constants for working with
//! environment variables. It centralizes the logic for fetching environment
//! variables, ensuring that keys are easily accessible from a single location
//! in the codebase.

/// The key for the runtime environment (e.g., development, production).
pub const ENV: &str = "OAUTH_STORE_ENV";
/// The key for the configuration folder
pub const CONFIG_FOLDER: &str = "OAUTH_STORE_CONFIG_FOLDER";

/// Fetches the value of the given environment variable.
pub fn get(key: &str) -> Result<String, std::env::VarError> {
    std::env::var(key)
}

/// Retrieves the value of the given environment variable, or returns a default
/// value if the variable is not set.
#[must_use]
pub fn get_or_default(key: &str, default: &str) -> String {
    get(key).unwrap_or_else(|_| default.to_string())
}
