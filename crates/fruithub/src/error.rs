//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable
//! help text and a stable process exit code.

use miette::Diagnostic;
use thiserror::Error;

use fruithub_config::ConfigError;
use fruithub_core::{CoreError, OperationError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(fruithub::connection_failed),
        help(
            "Check that the backend is running and the base URL is right.\n\
             URL: {url}\n\
             Override with: fruithub --base-url <URL> ..."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(fruithub::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(fruithub::auth_failed),
        help("Verify the email and password.\nRun: fruithub config set-password")
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(fruithub::no_credentials),
        help(
            "Set an email with: fruithub config set email <EMAIL>\n\
             Store a password with: fruithub config set-password\n\
             Or set FRUITHUB_EMAIL and a password_env variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(fruithub::not_found),
        help("Run: fruithub {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Store operations ─────────────────────────────────────────────

    /// A repository load or mutation failed; `message` is the
    /// user-facing summary, `detail` the underlying cause.
    #[error("{message}")]
    #[diagnostic(code(fruithub::operation_failed))]
    Operation {
        message: String,
        #[help]
        detail: Option<String>,
        #[source]
        source: OperationError,
    },

    #[error("API error: {message}")]
    #[diagnostic(code(fruithub::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fruithub::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(fruithub::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: fruithub config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file not found")]
    #[diagnostic(
        code(fruithub::no_config),
        help(
            "Create one with: fruithub config init\n\
             Expected at: {path}\n\
             Or pass --base-url / set FRUITHUB_BASE_URL."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(fruithub::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(fruithub::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::Operation { source, .. } => match &source.source {
                CoreError::ConnectionFailed { .. } => exit_code::CONNECTION,
                CoreError::Timeout { .. } => exit_code::TIMEOUT,
                CoreError::AuthenticationFailed { .. } => exit_code::AUTH,
                CoreError::NotFound { .. } => exit_code::NOT_FOUND,
                _ => exit_code::GENERAL,
            },
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::NotFound { path } => Self::NotFound {
                resource_type: "resource".into(),
                identifier: path,
                list_command: "--help".into(),
            },
            CoreError::Rejected { message, .. }
            | CoreError::Serialization { message }
            | CoreError::Internal(message) => Self::ApiError { message },
            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl From<OperationError> for CliError {
    fn from(err: OperationError) -> Self {
        Self::Operation {
            message: err.to_string(),
            detail: Some(err.source.to_string()),
            source: err,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_exit_codes() {
        let timeout: CliError = CoreError::Timeout { timeout_secs: 5 }.into();
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let auth: CliError = CoreError::AuthenticationFailed {
            message: "Login failed".into(),
        }
        .into();
        assert_eq!(auth.exit_code(), exit_code::AUTH);
        assert_eq!(auth.to_string(), "Authentication failed: Login failed");

        let rejected: CliError = CoreError::Rejected {
            message: "nope".into(),
            status: Some(422),
        }
        .into();
        assert_eq!(rejected.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn config_errors_keep_their_category() {
        let missing: CliError = ConfigError::NoCredentials {
            profile: "staging".into(),
        }
        .into();
        assert_eq!(missing.exit_code(), exit_code::AUTH);

        let invalid: CliError = ConfigError::Validation {
            field: "base_url".into(),
            reason: "invalid URL".into(),
        }
        .into();
        assert_eq!(invalid.exit_code(), exit_code::USAGE);
    }
}
