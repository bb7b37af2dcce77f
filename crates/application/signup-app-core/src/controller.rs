use std::sync::Arc;

use signup_core::{AuthenticationState, Availability, PasswordStatus};
use signup_infra::{AvailabilityChecker, PasswordPwnedCheck, UnwiredPwnedCheck};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::app_core::{FormCommand, FormEvent, FormStore};
use crate::domain::{FormSessionId, FormState};
use crate::pipeline::{
    AvailabilityPipeline, CheckState, PipelineOptions, PublishedOutcome, Revision,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerOptions {
    pub pipeline: PipelineOptions,
}

/// One signup form session.
///
/// Owns the availability pipeline from construction until [`teardown`](Self::teardown)
/// (or drop). Once torn down it never restarts: field edits still update the
/// local facts but no further availability is checked or published.
pub struct SignupFormController {
    session_id: FormSessionId,
    store: FormStore,
    pipeline: AvailabilityPipeline,
    pwned: Arc<dyn PasswordPwnedCheck>,
    cancel: CancellationToken,
    baseline_revision: Revision,
}

impl SignupFormController {
    pub fn new<C: AvailabilityChecker>(checker: C, options: ControllerOptions) -> anyhow::Result<Self> {
        Self::with_pwned_check(checker, UnwiredPwnedCheck, options)
    }

    pub fn with_pwned_check<C, P>(checker: C, pwned: P, options: ControllerOptions) -> anyhow::Result<Self>
    where
        C: AvailabilityChecker,
        P: PasswordPwnedCheck,
    {
        let session_id = uuid::Uuid::new_v4();
        let cancel = CancellationToken::new();

        let pipeline =
            AvailabilityPipeline::spawn(Arc::new(checker), options.pipeline, cancel.child_token())?;

        // The empty initial username is the pipeline's baseline and is never checked.
        let baseline = pipeline.submit(String::new());
        let store = FormStore::new(FormState {
            username_revision: baseline,
            ..FormState::default()
        });

        let forward = forward_outcomes(store.clone(), pipeline.subscribe(), cancel.clone());
        if let Err(e) = crate::async_runtime::spawn(forward) {
            cancel.cancel();
            return Err(e);
        }

        info!(%session_id, "signup form session started");
        Ok(Self {
            session_id,
            store,
            pipeline,
            pwned: Arc::new(pwned),
            cancel,
            baseline_revision: baseline,
        })
    }

    pub fn dispatch(&self, cmd: FormCommand) {
        match cmd {
            FormCommand::SetUsername(value) => {
                let pipeline = &self.pipeline;
                // The revision is taken under the store lock so edits reach the
                // pipeline in the same order as they reach the state.
                self.store.apply_with(move |state| {
                    if state.inputs.username == value {
                        return None;
                    }
                    let revision = pipeline.submit(value.clone());
                    Some(FormEvent::UsernameChanged { value, revision })
                });
            }

            FormCommand::SetPassword(value) => {
                self.store.apply(FormEvent::PasswordChanged(value));
            }

            FormCommand::SetConfirmPassword(value) => {
                self.store.apply(FormEvent::ConfirmPasswordChanged(value));
            }

            FormCommand::SetAuthenticationState(auth) => {
                self.store.apply(FormEvent::AuthenticationChanged(auth));
            }
        }
    }

    pub fn set_username(&self, value: impl Into<String>) {
        self.dispatch(FormCommand::SetUsername(value.into()));
    }

    pub fn set_password(&self, value: impl Into<String>) {
        self.dispatch(FormCommand::SetPassword(value.into()));
    }

    pub fn set_confirm_password(&self, value: impl Into<String>) {
        self.dispatch(FormCommand::SetConfirmPassword(value.into()));
    }

    pub fn set_authentication_state(&self, auth: AuthenticationState) {
        self.dispatch(FormCommand::SetAuthenticationState(auth));
    }

    // --- Derived outputs ---

    pub fn state(&self) -> FormState {
        self.store.state()
    }

    /// Woken on every change of the derived state.
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.store.subscribe()
    }

    pub fn is_username_valid(&self) -> bool {
        self.state().is_username_valid
    }

    pub fn is_password_empty(&self) -> bool {
        self.state().is_password_empty()
    }

    pub fn is_password_matched(&self) -> bool {
        self.state().is_password_matched()
    }

    pub fn is_password_length_sufficient(&self) -> bool {
        self.state().is_password_length_sufficient()
    }

    pub fn password_status(&self) -> PasswordStatus {
        self.state().password_status
    }

    pub fn availability(&self) -> Availability {
        self.state().availability
    }

    pub fn is_valid(&self) -> bool {
        self.state().is_valid
    }

    pub fn error_message(&self) -> String {
        self.state().error_message
    }

    pub fn authentication_state(&self) -> AuthenticationState {
        self.state().authentication
    }

    pub fn check_state(&self) -> CheckState {
        self.pipeline.check_state()
    }

    pub fn watch_check_state(&self) -> watch::Receiver<CheckState> {
        self.pipeline.watch_state()
    }

    /// True once the username on screen has its answer in the state, or was
    /// never edited.
    pub fn is_availability_settled(&self) -> bool {
        let state = self.state();
        if state.username_revision == self.baseline_revision {
            return true;
        }
        match self.pipeline.check_state() {
            CheckState::Settled {
                revision, outcome, ..
            } => {
                revision == state.username_revision
                    && state.availability.outcome() == Some(&outcome)
            }
            _ => false,
        }
    }

    /// Run the pwned-password capability against the current password.
    /// The answer does not feed into `is_valid`.
    pub async fn check_password_pwned(&self) -> bool {
        let password = self.store.state().inputs.password;
        self.pwned.check_password_pwned(&password).await
    }

    // --- Lifecycle ---

    pub fn session_id(&self) -> FormSessionId {
        self.session_id
    }

    pub fn teardown(&self) {
        if !self.cancel.is_cancelled() {
            info!(session_id = %self.session_id, "signup form session torn down");
            self.cancel.cancel();
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for SignupFormController {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn forward_outcomes(
    store: FormStore,
    mut outcomes: watch::Receiver<Option<PublishedOutcome>>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            changed = outcomes.changed() => {
                if changed.is_err() {
                    break;
                }
                let published = outcomes.borrow_and_update().clone();
                let Some(published) = published else { continue };
                let applied = store.apply(FormEvent::AvailabilityChecked {
                    revision: published.revision,
                    outcome: published.outcome,
                });
                if !applied {
                    debug!(
                        revision = published.revision,
                        username = %published.username,
                        "availability outcome left state unchanged"
                    );
                }
            }
        }
    }
}
