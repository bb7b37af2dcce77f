use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use signup_core::AvailabilityOutcome;
use signup_infra::AvailabilityChecker;
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Monotonic tag of a submitted username edit.
pub type Revision = u64;

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub debounce: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            debounce: signup_config::USERNAME_DEBOUNCE,
        }
    }
}

/// Where the pipeline stands with the username it is currently considering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum CheckState {
    Idle,
    Debouncing {
        revision: Revision,
        value: String,
    },
    InFlight {
        revision: Revision,
        value: String,
    },
    Settled {
        revision: Revision,
        value: String,
        outcome: AvailabilityOutcome,
    },
}

/// An outcome as handed to subscribers, tagged with the edit it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedOutcome {
    pub revision: Revision,
    pub username: String,
    pub outcome: AvailabilityOutcome,
}

#[derive(Debug)]
struct UsernameEdit {
    revision: Revision,
    value: String,
}

/// Handle to the task that turns username edits into availability outcomes.
///
/// Edits are debounced and deduplicated, at most one check runs at a time,
/// and a check superseded by a newer edit is dropped before it can publish.
/// All subscribers share the same outcomes.
pub struct AvailabilityPipeline {
    edits: mpsc::UnboundedSender<UsernameEdit>,
    next_revision: AtomicU64,
    outcomes: watch::Receiver<Option<PublishedOutcome>>,
    states: watch::Receiver<CheckState>,
    cancel: CancellationToken,
}

impl AvailabilityPipeline {
    pub fn spawn<C: AvailabilityChecker>(
        checker: Arc<C>,
        options: PipelineOptions,
        cancel: CancellationToken,
    ) -> anyhow::Result<Self> {
        let (edits_tx, edits_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcomes) = watch::channel(None);
        let (state_tx, states) = watch::channel(CheckState::Idle);

        let worker = Worker {
            checker,
            options,
            edits: edits_rx,
            outcomes: outcome_tx,
            states: state_tx,
            cancel: cancel.clone(),
            baseline_seen: false,
            revision: 0,
            current: None,
            settled: None,
            debounce: None,
            in_flight: None,
        };
        crate::async_runtime::spawn(worker.run())?;

        Ok(Self {
            edits: edits_tx,
            next_revision: AtomicU64::new(0),
            outcomes,
            states,
            cancel,
        })
    }

    /// Queue a username edit. The very first edit only sets the baseline and
    /// is never checked. Returns the revision assigned to the edit.
    pub fn submit(&self, value: impl Into<String>) -> Revision {
        let revision = self.next_revision.fetch_add(1, Ordering::SeqCst) + 1;
        let edit = UsernameEdit {
            revision,
            value: value.into(),
        };
        if self.edits.send(edit).is_err() {
            debug!(revision, "availability pipeline stopped; edit dropped");
        }
        revision
    }

    /// Receiver for published outcomes. Only outcomes after this call count as changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<PublishedOutcome>> {
        let mut rx = self.outcomes.clone();
        rx.borrow_and_update();
        rx
    }

    pub fn latest_outcome(&self) -> Option<PublishedOutcome> {
        self.outcomes.borrow().clone()
    }

    pub fn check_state(&self) -> CheckState {
        self.states.borrow().clone()
    }

    pub fn watch_state(&self) -> watch::Receiver<CheckState> {
        self.states.clone()
    }

    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.edits.is_closed()
    }
}

struct Debounce {
    value: String,
    deadline: Instant,
}

struct InFlight {
    value: String,
    check: BoxFuture<'static, AvailabilityOutcome>,
}

struct Worker<C> {
    checker: Arc<C>,
    options: PipelineOptions,
    edits: mpsc::UnboundedReceiver<UsernameEdit>,
    outcomes: watch::Sender<Option<PublishedOutcome>>,
    states: watch::Sender<CheckState>,
    cancel: CancellationToken,

    baseline_seen: bool,
    /// Revision of the newest edit received, including ignored duplicates.
    revision: Revision,
    /// Value under consideration.
    current: Option<String>,
    /// Last value with a published outcome.
    settled: Option<(String, AvailabilityOutcome)>,
    debounce: Option<Debounce>,
    in_flight: Option<InFlight>,
}

async fn next_outcome(in_flight: &mut Option<InFlight>) -> AvailabilityOutcome {
    match in_flight {
        Some(f) => (&mut f.check).await,
        None => std::future::pending().await,
    }
}

impl<C: AvailabilityChecker> Worker<C> {
    async fn run(mut self) {
        loop {
            let deadline = self.debounce.as_ref().map(|d| d.deadline);
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    debug!("availability pipeline torn down");
                    break;
                }
                edit = self.edits.recv() => match edit {
                    Some(edit) => self.on_edit(edit),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.on_quiet();
                }
                outcome = next_outcome(&mut self.in_flight), if self.in_flight.is_some() => {
                    self.on_checked(outcome);
                }
            }
        }
    }

    fn on_edit(&mut self, edit: UsernameEdit) {
        self.revision = edit.revision;

        if !self.baseline_seen {
            self.baseline_seen = true;
            debug!(revision = edit.revision, "baseline username recorded");
            self.current = Some(edit.value);
            return;
        }

        if self.current.as_deref() == Some(edit.value.as_str()) {
            trace!(revision = edit.revision, "username unchanged; edit ignored");
            return;
        }

        // Dropping the future abandons the request; its answer can never publish.
        if let Some(stale) = self.in_flight.take() {
            debug!(username = %stale.value, "in-flight check superseded");
        }

        self.current = Some(edit.value.clone());
        self.debounce = Some(Debounce {
            value: edit.value.clone(),
            deadline: Instant::now() + self.options.debounce,
        });
        self.states.send_replace(CheckState::Debouncing {
            revision: edit.revision,
            value: edit.value,
        });
    }

    fn on_quiet(&mut self) {
        let Some(Debounce { value, .. }) = self.debounce.take() else {
            return;
        };

        if let Some((settled_value, outcome)) = &self.settled {
            if *settled_value == value {
                debug!(username = %value, "username back to last settled value; no check");
                let outcome = outcome.clone();
                self.publish(value, outcome);
                return;
            }
        }

        debug!(revision = self.revision, username = %value, "checking availability");
        let checker = self.checker.clone();
        let query = value.clone();
        let check = async move { checker.check_username_available(&query).await }.boxed();

        self.in_flight = Some(InFlight {
            value: value.clone(),
            check,
        });
        self.states.send_replace(CheckState::InFlight {
            revision: self.revision,
            value,
        });
    }

    fn on_checked(&mut self, outcome: AvailabilityOutcome) {
        let Some(done) = self.in_flight.take() else {
            return;
        };
        if self.current.as_deref() != Some(done.value.as_str()) {
            debug!(username = %done.value, "stale availability answer dropped");
            return;
        }
        self.publish(done.value, outcome);
    }

    fn publish(&mut self, value: String, outcome: AvailabilityOutcome) {
        if self.cancel.is_cancelled() {
            return;
        }

        match &outcome {
            AvailabilityOutcome::Available(available) => {
                info!(revision = self.revision, username = %value, available, "availability settled");
            }
            AvailabilityOutcome::Failed(e) => {
                warn!(revision = self.revision, username = %value, error = %e, "availability check failed");
            }
        }

        self.settled = Some((value.clone(), outcome.clone()));
        self.states.send_replace(CheckState::Settled {
            revision: self.revision,
            value: value.clone(),
            outcome: outcome.clone(),
        });
        self.outcomes.send_replace(Some(PublishedOutcome {
            revision: self.revision,
            username: value,
            outcome,
        }));
    }
}
