use serde::{Deserialize, Serialize};

pub mod availability;
pub mod error;
pub mod password;
pub mod validators;
pub mod validity;

pub use availability::{Availability, AvailabilityOutcome};
pub use error::{ApiError, ApiErrorKind};
pub use password::{PasswordFacts, PasswordStatus};
pub use validity::{FormValidity, USERNAME_INVALID_MESSAGE, USERNAME_UNAVAILABLE_MESSAGE};

/// Raw text of the three signup fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInputs {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Set by the submission flow; the form only carries it through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthenticationState {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated,
}
