//! Shared helpers for command handlers.

use std::io::IsTerminal;

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the operation is refused.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Prompt twice for a new password and require both entries to match.
pub fn prompt_new_password(label: &str) -> Result<SecretString, CliError> {
    let first = rpassword::prompt_password(format!("{label}: "))?;
    if first.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "value cannot be empty".into(),
        });
    }
    let second = rpassword::prompt_password(format!("Repeat {}: ", label.to_lowercase()))?;
    if first != second {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "entries do not match".into(),
        });
    }
    Ok(SecretString::from(first))
}

/// Short timestamp for table cells.
pub fn short_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_owned()
}
