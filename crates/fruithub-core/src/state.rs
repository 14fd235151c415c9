// ── Repository state ──
//
// The value published through each repository's `watch` channel.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::Display;

/// Load lifecycle of one repository.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Failure taxonomy shared by all repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Backend unreachable or the request timed out.
    Network,
    /// Non-success response: validation, conflict, not-found.
    RemoteRejection,
    /// Malformed body.
    Serialization,
    /// Login rejected.
    Auth,
    /// Local configuration fault, such as an unusable base URL.
    Config,
}

/// An error as recorded on state: a classification plus the user-facing
/// message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

/// `{ data, status, error }` for one entity kind.
///
/// `data` is shared by `Arc`; an unchanged reload republishes the same
/// allocation, so `Arc::ptr_eq` tells consumers nothing moved.
#[derive(Debug)]
pub struct RepositoryState<D> {
    pub(crate) data: Arc<D>,
    pub(crate) status: Status,
    pub(crate) error: Option<ErrorInfo>,
    /// Bumped by `invalidate()` and `reset()`. A load that started under an
    /// older epoch never publishes.
    pub(crate) epoch: u64,
}

impl<D> RepositoryState<D> {
    pub fn data(&self) -> &Arc<D> {
        &self.data
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl<D: Default> Default for RepositoryState<D> {
    fn default() -> Self {
        Self {
            data: Arc::default(),
            status: Status::Idle,
            error: None,
            epoch: 0,
        }
    }
}

// Manual impl: cloning shares `data` and must not require `D: Clone`.
impl<D> Clone for RepositoryState<D> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            status: self.status,
            error: self.error.clone(),
            epoch: self.epoch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_idle_and_empty() {
        let state = RepositoryState::<Vec<u32>>::default();
        assert_eq!(state.status(), Status::Idle);
        assert!(state.data().is_empty());
        assert!(state.error().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn clone_shares_data_allocation() {
        let state = RepositoryState::<Vec<u32>> {
            data: Arc::new(vec![1, 2]),
            ..RepositoryState::default()
        };
        let copy = state.clone();
        assert!(Arc::ptr_eq(state.data(), copy.data()));
    }

    #[test]
    fn status_renders_lowercase() {
        assert_eq!(Status::Succeeded.to_string(), "succeeded");
        assert_eq!(ErrorKind::RemoteRejection.to_string(), "remote_rejection");
    }
}
