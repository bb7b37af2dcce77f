use reqwest::Client;
use signup_config::REQUEST_TIMEOUT;

mod availability;

pub use availability::{
    availability_url, classify_failure, AvailabilityChecker, AvailabilityResponse,
    ErrorResponse, HttpAvailabilityClient,
};

/// Shared client for talking to the signup API. Timeouts surface as transport errors.
pub fn default_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("signup/", env!("CARGO_PKG_VERSION")))
        .build()
}
