use signup_core::Availability;

use crate::domain::FormState;

use super::events::FormEvent;

pub fn reduce(mut state: FormState, ev: FormEvent) -> FormState {
    match ev {
        FormEvent::UsernameChanged { value, revision } => {
            state.inputs.username = value;
            state.username_revision = revision;
        }

        FormEvent::PasswordChanged(value) => state.inputs.password = value,
        FormEvent::ConfirmPasswordChanged(value) => state.inputs.confirm_password = value,

        FormEvent::AvailabilityChecked { revision, outcome } => {
            // Answers for anything but the username on screen are stale.
            if revision != state.username_revision {
                return state;
            }
            state.availability = Availability::Settled(outcome);
        }

        FormEvent::AuthenticationChanged(auth) => {
            state.authentication = auth;
            return state;
        }
    }
    state.refresh();
    state
}
