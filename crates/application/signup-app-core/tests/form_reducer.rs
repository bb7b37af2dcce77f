use signup_app_core::{reduce, FormEvent, FormState};
use signup_core::{
    ApiError, AuthenticationState, Availability, AvailabilityOutcome, PasswordStatus,
    USERNAME_INVALID_MESSAGE,
};

fn apply_all(events: Vec<FormEvent>) -> FormState {
    events.into_iter().fold(FormState::default(), reduce)
}

fn username(value: &str, revision: u64) -> FormEvent {
    FormEvent::UsernameChanged {
        value: value.into(),
        revision,
    }
}

fn checked(revision: u64, outcome: AvailabilityOutcome) -> FormEvent {
    FormEvent::AvailabilityChecked { revision, outcome }
}

#[test]
fn initial_state_is_derived_not_blank() {
    let state = FormState::default();
    assert!(!state.is_username_valid);
    assert!(state.is_password_empty());
    assert!(state.is_password_matched());
    assert!(!state.is_password_length_sufficient());
    assert_eq!(state.password_status, PasswordStatus::Empty);
    assert_eq!(state.availability, Availability::Pending);
    assert!(!state.is_valid);
    assert_eq!(state.error_message, USERNAME_INVALID_MESSAGE);
}

#[test]
fn short_username_with_matching_passwords() {
    let state = apply_all(vec![
        username("ab", 1),
        FormEvent::PasswordChanged("secret".into()),
        FormEvent::ConfirmPasswordChanged("secret".into()),
    ]);
    assert!(!state.is_username_valid);
    assert_eq!(state.password_status, PasswordStatus::Valid);
    assert_eq!(state.error_message, USERNAME_INVALID_MESSAGE);
    assert!(!state.is_valid);
}

#[test]
fn available_username_with_empty_passwords() {
    let state = apply_all(vec![
        username("alice", 1),
        checked(1, AvailabilityOutcome::Available(true)),
    ]);
    assert_eq!(state.password_status, PasswordStatus::Empty);
    assert_eq!(state.error_message, "Password must not be empty");
    assert!(!state.is_valid);
}

#[test]
fn everything_valid() {
    let state = apply_all(vec![
        username("alice", 1),
        checked(1, AvailabilityOutcome::Available(true)),
        FormEvent::PasswordChanged("abcdef".into()),
        FormEvent::ConfirmPasswordChanged("abcdef".into()),
    ]);
    assert!(state.is_username_valid);
    assert!(!state.is_password_empty());
    assert!(state.is_password_matched());
    assert!(state.is_password_length_sufficient());
    assert_eq!(state.password_status, PasswordStatus::Valid);
    assert_eq!(state.error_message, "");
    assert!(state.is_valid);
}

#[test]
fn outcome_for_an_older_revision_is_ignored() {
    let state = apply_all(vec![
        username("foo", 1),
        username("bar", 2),
        checked(1, AvailabilityOutcome::Available(false)),
    ]);
    assert_eq!(state.availability, Availability::Pending);

    let state = reduce(state, checked(2, AvailabilityOutcome::Available(false)));
    assert_eq!(
        state.availability,
        Availability::Settled(AvailabilityOutcome::Available(false))
    );
    assert_eq!(state.error_message, "This username is not available");
}

#[test]
fn last_outcome_is_kept_while_a_newer_username_is_pending() {
    let state = apply_all(vec![
        username("taken", 1),
        checked(1, AvailabilityOutcome::Failed(ApiError::Validation("taken".into()))),
        username("taken2", 2),
    ]);
    assert_eq!(
        state.availability,
        Availability::Settled(AvailabilityOutcome::Failed(ApiError::Validation(
            "taken".into()
        )))
    );
    assert_eq!(state.error_message, "taken");
}

#[test]
fn authentication_state_is_a_passthrough() {
    let before = apply_all(vec![username("alice", 1)]);
    let after = reduce(
        before.clone(),
        FormEvent::AuthenticationChanged(AuthenticationState::Authenticating),
    );
    assert_eq!(after.authentication, AuthenticationState::Authenticating);
    assert_eq!(after.is_valid, before.is_valid);
    assert_eq!(after.error_message, before.error_message);
}

#[test]
fn state_serializes_without_raw_inputs() {
    let state = apply_all(vec![
        username("alice", 1),
        FormEvent::PasswordChanged("hunter22".into()),
    ]);
    let json = serde_json::to_value(&state).unwrap();
    assert!(json.get("inputs").is_none());
    assert_eq!(json["passwordStatus"], "noMatch");
    assert_eq!(json["availability"]["state"], "pending");
    assert_eq!(json["isUsernameValid"], true);
}
