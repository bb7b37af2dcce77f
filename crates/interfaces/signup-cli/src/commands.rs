use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use signup_app_core::{ControllerOptions, FormState, PipelineOptions, SignupFormController};
use signup_core::AvailabilityOutcome;
use signup_infra::{AvailabilityChecker, HttpAvailabilityClient};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

fn http_checker(base_url: &str) -> Result<HttpAvailabilityClient> {
    let client = signup_infra::default_http_client().context("Failed to build HTTP client")?;
    Ok(HttpAvailabilityClient::new(client, base_url))
}

fn controller_options(debounce: Duration) -> ControllerOptions {
    ControllerOptions {
        pipeline: PipelineOptions { debounce },
    }
}

/// How long to wait for a check: the quiet period plus one request.
fn settle_window(debounce: Duration) -> Duration {
    debounce + signup_config::REQUEST_TIMEOUT
}

pub async fn cmd_check_username(base_url: &str, username: &str) -> Result<AvailabilityOutcome> {
    println!(":: Checking availability of {username:?}");
    println!("   Service: {base_url}");

    let checker = http_checker(base_url)?;
    let outcome = checker.check_username_available(username).await;

    match &outcome {
        AvailabilityOutcome::Available(true) => println!("   Available"),
        AvailabilityOutcome::Available(false) => println!("   Not available"),
        AvailabilityOutcome::Failed(e) => println!("   Check failed: {e}"),
    }
    Ok(outcome)
}

pub async fn cmd_validate(
    base_url: &str,
    username: &str,
    password: &str,
    confirm_password: &str,
    debounce: Duration,
) -> Result<FormState> {
    let form = SignupFormController::new(http_checker(base_url)?, controller_options(debounce))?;

    form.set_username(username);
    form.set_password(password);
    form.set_confirm_password(confirm_password);

    wait_until_settled(&form, settle_window(debounce)).await;

    let state = form.state();
    form.teardown();

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(state)
}

pub async fn cmd_watch<R, W>(
    base_url: &str,
    input: R,
    out: &mut W,
    debounce: Duration,
) -> Result<FormState>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    cmd_watch_with(http_checker(base_url)?, input, out, debounce).await
}

/// Apply `field=value` lines as they arrive and write each new derived state
/// as one JSON line. After input ends, waits for an outstanding check.
pub async fn cmd_watch_with<C, R, W>(
    checker: C,
    input: R,
    out: &mut W,
    debounce: Duration,
) -> Result<FormState>
where
    C: AvailabilityChecker,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let form = SignupFormController::new(checker, controller_options(debounce))?;
    let mut states = form.subscribe();
    let mut checks = form.watch_check_state();
    let mut lines = input.lines();
    let mut input_open = true;
    let mut last_edit = Instant::now();

    let initial = states.borrow_and_update().clone();
    emit(out, &initial)?;

    loop {
        if !input_open && form.is_availability_settled() {
            break;
        }
        let drain_deadline = last_edit + settle_window(debounce);

        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line.context("Failed to read input")? {
                    Some(line) => match crate::input::parse_line(&line) {
                        Ok(Some(cmd)) => {
                            debug!("applying input line");
                            form.dispatch(cmd);
                            last_edit = Instant::now();
                        }
                        Ok(None) => {}
                        Err(e) => warn!("skipping line: {e:#}"),
                    },
                    None => input_open = false,
                }
            }
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                emit(out, &state)?;
            }
            changed = checks.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = sleep_until(drain_deadline), if !input_open => {
                warn!("availability did not settle before the deadline");
                break;
            }
        }
    }

    // Pick up a change that landed together with the final wake-up.
    if states.has_changed().unwrap_or(false) {
        let state = states.borrow_and_update().clone();
        emit(out, &state)?;
    }

    let state = form.state();
    form.teardown();
    Ok(state)
}

fn emit<W: Write>(out: &mut W, state: &FormState) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string(state)?)?;
    out.flush()?;
    Ok(())
}

/// Returns false when the window passes first.
async fn wait_until_settled(form: &SignupFormController, window: Duration) -> bool {
    let deadline = Instant::now() + window;
    let mut states = form.subscribe();
    let mut checks = form.watch_check_state();
    loop {
        if form.is_availability_settled() {
            return true;
        }
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    return false;
                }
            }
            changed = checks.changed() => {
                if changed.is_err() {
                    return false;
                }
            }
            _ = sleep_until(deadline) => {
                warn!("availability did not settle within {window:?}");
                return false;
            }
        }
    }
}
