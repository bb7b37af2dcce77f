use signup_core::{AuthenticationState, AvailabilityOutcome};

use crate::pipeline::Revision;

#[derive(Debug, Clone)]
pub enum FormEvent {
    // Field edits
    UsernameChanged { value: String, revision: Revision },
    PasswordChanged(String),
    ConfirmPasswordChanged(String),

    // Remote check
    AvailabilityChecked {
        revision: Revision,
        outcome: AvailabilityOutcome,
    },

    AuthenticationChanged(AuthenticationState),
}
