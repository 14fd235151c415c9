// ── Reactive data store ──
//
// One repository per entity kind plus the auth sub-state, each behind its
// own `watch` channel, and a store-wide broadcast of what changed.

mod auth;
mod data_store;
mod reconcile;
mod repository;

use serde::Serialize;

use crate::kind::EntityKind;
use crate::state::Status;

pub use auth::{AuthState, AuthStore};
pub use data_store::DataStore;
pub use reconcile::{Reconciliation, reconcile};
pub use repository::Repository;

pub(crate) use repository::LoadTicket;

/// Store-wide change notification. Exactly one is sent per operation
/// outcome that altered a sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", rename_all = "lowercase")]
pub enum StoreChange {
    Entity { kind: EntityKind, status: Status },
    Auth,
}
