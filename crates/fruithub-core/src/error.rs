// ── Core error types ──
//
// Domain errors from fruithub-core. Consumers never match on HTTP status
// codes or JSON parse failures directly: the `From<fruithub_api::Error>`
// impl folds transport errors into these variants, and `kind()` maps
// each one onto the four-way repository taxonomy.

use thiserror::Error;

use crate::kind::EntityKind;
use crate::state::{ErrorInfo, ErrorKind};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Backend rejections ───────────────────────────────────────────
    #[error("Not found: {path}")]
    NotFound { path: String },

    #[error("Request rejected by backend: {message}")]
    Rejected {
        message: String,
        /// HTTP status code, when the rejection came from a response.
        status: Option<u16>,
    },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Malformed payload: {message}")]
    Serialization { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Repository-level classification of this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout { .. } => ErrorKind::Network,
            Self::Config { .. } => ErrorKind::Config,
            Self::AuthenticationFailed { .. } => ErrorKind::Auth,
            Self::NotFound { .. } | Self::Rejected { .. } | Self::Internal(_) => {
                ErrorKind::RemoteRejection
            }
            Self::Serialization { .. } => ErrorKind::Serialization,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<fruithub_api::Error> for CoreError {
    fn from(err: fruithub_api::Error) -> Self {
        match err {
            fruithub_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            // Timeouts arrive as `Error::Timeout`; the client folds them
            // with the configured duration.
            fruithub_api::Error::Transport(ref e) => {
                if e.is_decode() {
                    CoreError::Serialization {
                        message: e.to_string(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                }
            }
            fruithub_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            fruithub_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            fruithub_api::Error::NotFound { path } => CoreError::NotFound { path },
            fruithub_api::Error::Api { status, message } => CoreError::Rejected {
                message,
                status: Some(status),
            },
            fruithub_api::Error::Deserialization { message, body: _ } => {
                CoreError::Serialization { message }
            }
        }
    }
}

// ── Operation errors ─────────────────────────────────────────────────

/// The repository operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Load,
    Add,
    Update,
    Delete,
}

/// A repository operation failure, scoped to one entity kind.
///
/// `Display` is the user-facing message ("Failed to load products.");
/// the underlying cause stays reachable through `source()`.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct OperationError {
    pub entity: EntityKind,
    pub op: Operation,
    pub message: String,
    #[source]
    pub source: CoreError,
}

impl OperationError {
    pub(crate) fn new(entity: EntityKind, op: Operation, source: CoreError) -> Self {
        let noun = match op {
            Operation::Load => entity.plural(),
            Operation::Add | Operation::Update | Operation::Delete => entity.singular(),
        };
        Self {
            entity,
            op,
            message: format!("Failed to {op} {noun}."),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    /// The error as recorded on repository state.
    pub fn info(&self) -> ErrorInfo {
        ErrorInfo {
            kind: self.kind(),
            message: self.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_scoped_to_kind_and_operation() {
        let cause = || CoreError::Timeout { timeout_secs: 5 };

        let load = OperationError::new(EntityKind::Product, Operation::Load, cause());
        assert_eq!(load.to_string(), "Failed to load products.");

        let add = OperationError::new(EntityKind::Category, Operation::Add, cause());
        assert_eq!(add.to_string(), "Failed to add category.");

        let stats = OperationError::new(EntityKind::Stat, Operation::Load, cause());
        assert_eq!(stats.to_string(), "Failed to load statistics.");
        assert_eq!(stats.kind(), ErrorKind::Network);
    }

    #[test]
    fn api_errors_map_onto_taxonomy() {
        let not_found: CoreError = fruithub_api::Error::NotFound {
            path: "/products/p9".into(),
        }
        .into();
        assert_eq!(not_found.kind(), ErrorKind::RemoteRejection);

        let rejected: CoreError = fruithub_api::Error::Api {
            status: 422,
            message: "slug taken".into(),
        }
        .into();
        assert!(matches!(
            rejected,
            CoreError::Rejected {
                status: Some(422),
                ..
            }
        ));

        let malformed: CoreError = fruithub_api::Error::Deserialization {
            message: "expected array".into(),
            body: "{}".into(),
        }
        .into();
        assert_eq!(malformed.kind(), ErrorKind::Serialization);

        let auth: CoreError = fruithub_api::Error::Authentication {
            message: "Invalid credentials".into(),
        }
        .into();
        assert_eq!(auth.kind(), ErrorKind::Auth);

        let timeout: CoreError = fruithub_api::Error::Timeout { timeout_secs: 5 }.into();
        assert_eq!(timeout.kind(), ErrorKind::Network);
        assert_eq!(timeout.to_string(), "Backend request timed out after 5s");

        let bad_url: CoreError =
            fruithub_api::Error::InvalidUrl(url::ParseError::RelativeUrlWithoutBase).into();
        assert_eq!(bad_url.kind(), ErrorKind::Config);
    }
}
