mod common;

use std::time::{Duration, Instant};

use common::FakeChecker;
use signup_app_core::{ControllerOptions, PipelineOptions, SignupFormController};
use signup_core::{Availability, AvailabilityOutcome};

#[test]
fn controller_runs_without_a_tokio_runtime() {
    let checker = FakeChecker::new();
    let options = ControllerOptions {
        pipeline: PipelineOptions {
            debounce: Duration::from_millis(20),
        },
    };
    let form = SignupFormController::new(checker.clone(), options)
        .expect("controller should start without an ambient runtime");

    form.set_username("alice");

    let settled_by = Instant::now() + Duration::from_secs(3);
    while Instant::now() < settled_by {
        if form.availability() == Availability::Settled(AvailabilityOutcome::Available(true)) {
            assert_eq!(checker.calls(), vec!["alice".to_string()]);
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    panic!("availability never settled");
}
