use reqwest::header::{ACCEPT, RETRY_AFTER};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use signup_config::{AVAILABILITY_PATH, AVAILABILITY_QUERY_KEY};
use signup_core::{ApiError, AvailabilityOutcome};
use tracing::{debug, warn};

/// Asks whether a username is still free. Failures come back as data.
#[async_trait::async_trait]
pub trait AvailabilityChecker: Send + Sync + 'static {
    async fn check_username_available(&self, username: &str) -> AvailabilityOutcome;
}

#[async_trait::async_trait]
impl<T: AvailabilityChecker + ?Sized> AvailabilityChecker for std::sync::Arc<T> {
    async fn check_username_available(&self, username: &str) -> AvailabilityOutcome {
        (**self).check_username_available(username).await
    }
}

/// 2xx body of the availability endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub is_available: bool,
    pub user_name: String,
}

/// Structured error body. `error` is required so that arbitrary JSON is not mistaken for one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Build `<base>/isUserNameAvailable?userName=<username>`.
pub fn availability_url(base_url: &str, username: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(base_url.trim())
        .map_err(|e| ApiError::InvalidRequest(format!("invalid base url {base_url:?}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidRequest(format!(
            "unsupported scheme {:?} in base url",
            url.scheme()
        )));
    }

    // A trailing slash on the base must not produce an empty segment.
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidRequest(format!("base url {base_url:?} cannot carry a path")))?
        .pop_if_empty()
        .push(AVAILABILITY_PATH);

    url.query_pairs_mut()
        .clear()
        .append_pair(AVAILABILITY_QUERY_KEY, username);

    Ok(url)
}

/// Map a non-2xx response onto the error taxonomy.
pub fn classify_failure(status_code: u16, body: &[u8], retry_after: Option<String>) -> ApiError {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            reason: Some(reason),
            ..
        }) if status_code == 400 => ApiError::Validation(reason),
        Ok(ErrorResponse { reason, .. }) => ApiError::Server {
            status_code,
            reason,
            retry_after,
        },
        Err(_) => ApiError::InvalidResponse,
    }
}

/// reqwest-backed checker against a configurable base URL.
pub struct HttpAvailabilityClient {
    client: Client,
    base_url: String,
}

impl HttpAvailabilityClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, username: &str) -> Result<bool, ApiError> {
        let url = availability_url(&self.base_url, username)?;

        let resp = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = resp.status();
        let retry_after = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        let body = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(classify_failure(status.as_u16(), &body, retry_after));
        }

        let decoded: AvailabilityResponse =
            serde_json::from_slice(&body).map_err(|e| ApiError::Decoding(e.to_string()))?;

        if decoded.user_name != username {
            debug!(
                requested = username,
                answered = %decoded.user_name,
                "availability answer names a different user"
            );
        }

        Ok(decoded.is_available)
    }
}

#[async_trait::async_trait]
impl AvailabilityChecker for HttpAvailabilityClient {
    async fn check_username_available(&self, username: &str) -> AvailabilityOutcome {
        let res = self.fetch(username).await;
        if let Err(e) = &res {
            warn!(username, error = %e, "availability check failed");
        }
        res.into()
    }
}
