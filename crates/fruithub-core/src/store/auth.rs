// ── Auth sub-state ──
//
// Session user plus the login lifecycle: pending, then success or
// failure. Logout and local profile edits never touch the backend.

use std::sync::Arc;

use fruithub_api::ApiClient;
use secrecy::SecretString;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use super::StoreChange;
use crate::error::CoreError;
use crate::model::{User, UserPatch};
use crate::state::ErrorInfo;
use crate::stream::StateStream;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<ErrorInfo>,
}

pub struct AuthStore {
    client: Arc<ApiClient>,
    state: watch::Sender<AuthState>,
    changes: broadcast::Sender<StoreChange>,
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl AuthStore {
    pub(crate) fn new(client: Arc<ApiClient>, changes: broadcast::Sender<StoreChange>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            client,
            state,
            changes,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn subscribe(&self) -> StateStream<AuthState> {
        StateStream::new(self.state.subscribe())
    }

    /// `POST /admins/login`. On success the returned user becomes the
    /// session user; on failure the error is recorded and the session is
    /// cleared.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<User, CoreError> {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
        self.notify();

        match self.client.login::<User>(email, password).await {
            Ok(user) => {
                info!(user_id = %user.id, "logged in");
                self.state.send_modify(|state| {
                    state.user = Some(user.clone());
                    state.is_authenticated = true;
                    state.loading = false;
                    state.error = None;
                });
                self.notify();
                Ok(user)
            }
            Err(err) => {
                let err = CoreError::from(err);
                debug!(error = %err, "login failed");
                let info = ErrorInfo {
                    kind: err.kind(),
                    message: login_message(&err),
                };
                self.state.send_modify(|state| {
                    state.user = None;
                    state.is_authenticated = false;
                    state.loading = false;
                    state.error = Some(info);
                });
                self.notify();
                Err(err)
            }
        }
    }

    pub fn logout(&self) {
        self.state.send_replace(AuthState::default());
        info!("logged out");
        self.notify();
    }

    /// Install a session user directly (e.g. one restored from elsewhere).
    pub fn set_user(&self, user: User) {
        self.state.send_modify(|state| {
            state.user = Some(user);
            state.is_authenticated = true;
            state.error = None;
        });
        self.notify();
    }

    /// Merge a profile edit onto the session user. Does nothing when
    /// nobody is logged in; returns whether a user was updated.
    pub fn update_user(&self, patch: UserPatch) -> bool {
        let updated = self.state.send_if_modified(|state| match state.user.as_mut() {
            Some(user) => {
                user.apply(patch);
                true
            }
            None => false,
        });
        if updated {
            self.notify();
        }
        updated
    }

    pub(crate) fn reset(&self) {
        self.state.send_replace(AuthState::default());
        self.notify();
    }

    fn notify(&self) {
        let _ = self.changes.send(StoreChange::Auth);
    }
}

const LOGIN_FAILED: &str = "Login failed";

/// Rejections surface the backend's own message; anything else gets the
/// generic text. The kind on `ErrorInfo` still tells the cases apart.
fn login_message(err: &CoreError) -> String {
    match err {
        CoreError::AuthenticationFailed { message } if !message.is_empty() => message.clone(),
        _ => LOGIN_FAILED.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ErrorKind;

    #[test]
    fn login_message_prefers_backend_text() {
        let rejected = CoreError::AuthenticationFailed {
            message: "Invalid credentials".into(),
        };
        assert_eq!(login_message(&rejected), "Invalid credentials");

        let offline = CoreError::Timeout { timeout_secs: 5 };
        assert_eq!(offline.kind(), ErrorKind::Network);
        assert_eq!(login_message(&offline), "Login failed");

        let unreachable = CoreError::ConnectionFailed {
            url: "http://127.0.0.1:1/admins/login".into(),
            reason: "connection refused".into(),
        };
        assert_eq!(login_message(&unreachable), "Login failed");
    }
}
