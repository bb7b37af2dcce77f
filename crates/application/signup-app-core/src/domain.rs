use serde::Serialize;
use signup_core::validators::is_username_valid;
use signup_core::{
    AuthenticationState, Availability, FormInputs, FormValidity, PasswordFacts, PasswordStatus,
};
use uuid::Uuid;

use crate::pipeline::Revision;

pub type FormSessionId = Uuid;

/// Everything the UI reads. Only the reducer writes it; derived fields are
/// recomputed from inputs and availability after every event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    #[serde(skip)]
    pub inputs: FormInputs,
    /// Revision of the username currently held in `inputs`.
    #[serde(skip)]
    pub username_revision: Revision,

    pub is_username_valid: bool,
    pub password: PasswordFacts,
    pub password_status: PasswordStatus,
    pub availability: Availability,
    pub is_valid: bool,
    pub error_message: String,

    pub authentication: AuthenticationState,
}

impl Default for FormState {
    fn default() -> Self {
        let mut state = Self {
            inputs: FormInputs::default(),
            username_revision: 0,
            is_username_valid: false,
            password: PasswordFacts::default(),
            password_status: PasswordStatus::default(),
            availability: Availability::Pending,
            is_valid: false,
            error_message: String::new(),
            authentication: AuthenticationState::default(),
        };
        state.refresh();
        state
    }
}

impl FormState {
    pub(crate) fn refresh(&mut self) {
        self.is_username_valid = is_username_valid(&self.inputs.username);
        self.password = PasswordFacts::derive(&self.inputs.password, &self.inputs.confirm_password);
        self.password_status = self.password.status();

        let validity =
            FormValidity::evaluate(&self.availability, self.is_username_valid, self.password_status);
        self.is_valid = validity.is_valid;
        self.error_message = validity.error_message;
    }

    pub fn is_password_empty(&self) -> bool {
        self.password.is_empty
    }

    pub fn is_password_matched(&self) -> bool {
        self.password.is_matched
    }

    pub fn is_password_length_sufficient(&self) -> bool {
        self.password.is_length_sufficient
    }
}
