use serde::{Deserialize, Serialize};

use crate::availability::{Availability, AvailabilityOutcome};
use crate::error::ApiError;
use crate::password::PasswordStatus;

pub const USERNAME_UNAVAILABLE_MESSAGE: &str = "This username is not available";
pub const USERNAME_INVALID_MESSAGE: &str = "Username is invalid. Must be more than 2 characters";

/// The two outputs the form exposes for submission gating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValidity {
    pub is_valid: bool,
    pub error_message: String,
}

impl FormValidity {
    pub fn evaluate(
        availability: &Availability,
        is_username_valid: bool,
        password_status: PasswordStatus,
    ) -> Self {
        let is_valid = availability.permits_submission()
            && is_username_valid
            && password_status == PasswordStatus::Valid;

        // Availability problems outrank local ones.
        let error_message = [
            availability_message(availability),
            if is_username_valid {
                String::new()
            } else {
                USERNAME_INVALID_MESSAGE.to_string()
            },
            password_status.message().to_string(),
        ]
        .into_iter()
        .find(|m| !m.is_empty())
        .unwrap_or_default();

        Self {
            is_valid,
            error_message,
        }
    }
}

fn availability_message(availability: &Availability) -> String {
    match availability.outcome() {
        None | Some(AvailabilityOutcome::Available(true)) => String::new(),
        Some(AvailabilityOutcome::Available(false)) => USERNAME_UNAVAILABLE_MESSAGE.to_string(),
        Some(AvailabilityOutcome::Failed(ApiError::Transport(_))) => String::new(),
        Some(AvailabilityOutcome::Failed(e)) => e.to_string(),
    }
}
