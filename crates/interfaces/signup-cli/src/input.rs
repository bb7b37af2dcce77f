//! `field=value` lines for the `watch` command.

use anyhow::{bail, Result};
use clap::ValueEnum;
use signup_app_core::FormCommand;

use crate::CliAuthState;

/// Parse one input line. Blank lines and `#` comments yield `None`.
///
/// Only the first `=` splits, so values may contain `=`. Values are taken
/// verbatim, including surrounding spaces.
pub fn parse_line(line: &str) -> Result<Option<FormCommand>> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    if trimmed.trim().is_empty() || trimmed.trim_start().starts_with('#') {
        return Ok(None);
    }

    let Some((field, value)) = trimmed.split_once('=') else {
        bail!("expected field=value, got {trimmed:?}");
    };

    let cmd = match field.trim() {
        "username" | "user" => FormCommand::SetUsername(value.to_string()),
        "password" | "pass" => FormCommand::SetPassword(value.to_string()),
        "confirm" | "confirm_password" | "confirmPassword" => {
            FormCommand::SetConfirmPassword(value.to_string())
        }
        "auth" => {
            let state = CliAuthState::from_str(value.trim(), true)
                .map_err(|e| anyhow::anyhow!("invalid auth state {value:?}: {e}"))?;
            FormCommand::SetAuthenticationState(state.into())
        }
        other => bail!("unknown field {other:?}"),
    };
    Ok(Some(cmd))
}
