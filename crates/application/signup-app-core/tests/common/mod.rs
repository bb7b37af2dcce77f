#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use signup_core::AvailabilityOutcome;
use signup_infra::AvailabilityChecker;

/// Records every username it is asked about and answers from a table.
/// Unknown names are available.
#[derive(Default)]
pub struct FakeChecker {
    calls: Mutex<Vec<String>>,
    answers: Mutex<HashMap<String, AvailabilityOutcome>>,
    delay: Duration,
}

impl FakeChecker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            ..Self::default()
        })
    }

    pub fn answer(&self, username: &str, outcome: AvailabilityOutcome) {
        self.answers
            .lock()
            .unwrap()
            .insert(username.to_string(), outcome);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AvailabilityChecker for FakeChecker {
    async fn check_username_available(&self, username: &str) -> AvailabilityOutcome {
        self.calls.lock().unwrap().push(username.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.answers
            .lock()
            .unwrap()
            .get(username)
            .cloned()
            .unwrap_or(AvailabilityOutcome::Available(true))
    }
}

pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
