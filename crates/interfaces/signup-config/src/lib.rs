//! Central configuration constants for the signup form and its remote check.

use std::time::Duration;

/// Quiet period a username must hold before its availability is checked.
pub const USERNAME_DEBOUNCE: Duration = Duration::from_millis(800);

/// Minimum number of characters for a valid username.
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum number of characters for a sufficiently long password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Upper bound for a single availability request, connect included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Base URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Environment variable holding the availability service base URL.
pub const BASE_URL_ENV: &str = "SIGNUP_API_BASE_URL";

/// Path segment of the availability endpoint, relative to the base URL.
pub const AVAILABILITY_PATH: &str = "isUserNameAvailable";

/// Query key carrying the username.
pub const AVAILABILITY_QUERY_KEY: &str = "userName";

/// Resolve the base URL from the environment, falling back to [`DEFAULT_BASE_URL`].
pub fn base_url_from_env() -> String {
    resolve_base_url(std::env::var(BASE_URL_ENV).ok())
}

/// Blank values count as unset.
pub fn resolve_base_url(configured: Option<String>) -> String {
    configured
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}
