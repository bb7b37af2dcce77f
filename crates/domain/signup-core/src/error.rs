use serde::{Deserialize, Serialize};

/// Failure of a remote availability check.
///
/// Causes are kept as rendered strings so the error can sit inside cloned,
/// compared and serialized form state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "camelCase")]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Invalid response from server")]
    InvalidResponse,
    #[error("{0}")]
    Validation(String),
    #[error("Could not read server response: {0}")]
    Decoding(String),
    #[error(
        "Server error ({status_code}){}",
        .reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default()
    )]
    Server {
        status_code: u16,
        reason: Option<String>,
        retry_after: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    InvalidRequest,
    Transport,
    InvalidResponse,
    Validation,
    Decoding,
    Server,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::InvalidRequest(_) => ApiErrorKind::InvalidRequest,
            ApiError::Transport(_) => ApiErrorKind::Transport,
            ApiError::InvalidResponse => ApiErrorKind::InvalidResponse,
            ApiError::Validation(_) => ApiErrorKind::Validation,
            ApiError::Decoding(_) => ApiErrorKind::Decoding,
            ApiError::Server { .. } => ApiErrorKind::Server,
        }
    }

    /// Connectivity problems on our side. These never block the form.
    pub fn is_transport(&self) -> bool {
        self.kind() == ApiErrorKind::Transport
    }
}
