use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::FormState;

use super::{events::FormEvent, reducer::reduce};

/// Observable holder of [`FormState`]. Subscribers are woken only on real changes.
#[derive(Clone)]
pub struct FormStore {
    inner: Arc<watch::Sender<FormState>>,
}

impl FormStore {
    pub fn new(state: FormState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self {
            inner: Arc::new(tx),
        }
    }

    pub fn state(&self) -> FormState {
        self.inner.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.inner.subscribe()
    }

    /// Returns whether the state changed.
    pub fn apply(&self, ev: FormEvent) -> bool {
        self.apply_with(|_| Some(ev))
    }

    /// Decide on an event while holding the state. Side effects of `decide`
    /// are ordered exactly like the resulting state changes.
    pub(crate) fn apply_with(&self, decide: impl FnOnce(&FormState) -> Option<FormEvent>) -> bool {
        self.inner.send_if_modified(|state| match decide(state) {
            Some(ev) => {
                let next = reduce(state.clone(), ev);
                if next == *state {
                    false
                } else {
                    *state = next;
                    true
                }
            }
            None => false,
        })
    }
}
