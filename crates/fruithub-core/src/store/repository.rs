// ── Entity repository ──
//
// Owns one collection's `{ data, status, error }` behind a `watch` sender.
// Every transition happens inside a single `send_modify`/`send_if_modified`
// call, so observers see them atomically and in order.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use fruithub_api::ApiClient;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

use super::StoreChange;
use super::reconcile::reconcile;
use crate::cache::SnapshotStore;
use crate::error::{CoreError, Operation, OperationError};
use crate::kind::EntityKind;
use crate::model::Record;
use crate::resource::{Collection, Resource};
use crate::state::{ErrorInfo, RepositoryState, Status};
use crate::stream::StateStream;

/// Proof that a load claimed `Loading` under a given epoch.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LoadTicket {
    epoch: u64,
}

/// Cache-backed repository for a single entity kind.
pub struct Repository<R: Resource> {
    client: Arc<ApiClient>,
    snapshots: Arc<dyn SnapshotStore>,
    state: watch::Sender<RepositoryState<R::Data>>,
    changes: broadcast::Sender<StoreChange>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> std::fmt::Debug for Repository<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Repository")
            .field("kind", &R::KIND)
            .field("status", &state.status)
            .field("epoch", &state.epoch)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> Repository<R> {
    pub(crate) fn new(
        client: Arc<ApiClient>,
        snapshots: Arc<dyn SnapshotStore>,
        changes: broadcast::Sender<StoreChange>,
    ) -> Self {
        let (state, _) = watch::channel(RepositoryState::default());
        Self {
            client,
            snapshots,
            state,
            changes,
            _resource: PhantomData,
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn kind(&self) -> EntityKind {
        R::KIND
    }

    pub fn state(&self) -> RepositoryState<R::Data> {
        self.state.borrow().clone()
    }

    pub fn data(&self) -> Arc<R::Data> {
        Arc::clone(&self.state.borrow().data)
    }

    pub fn status(&self) -> Status {
        self.state.borrow().status
    }

    pub fn error(&self) -> Option<ErrorInfo> {
        self.state.borrow().error.clone()
    }

    pub fn subscribe(&self) -> StateStream<RepositoryState<R::Data>> {
        StateStream::new(self.state.subscribe())
    }

    // ── Load pipeline ────────────────────────────────────────────────

    /// Load the collection from the backend, reconciling against the
    /// persisted snapshot.
    ///
    /// Status flips to `Loading` when this is called, before the returned
    /// future is first polled. Always issues a fetch, even if another load
    /// is already in flight; the last one to settle wins.
    pub fn load(&self) -> impl Future<Output = Result<(), OperationError>> + Send + '_ {
        let ticket = self.begin_load();
        self.run_load(ticket)
    }

    /// Like [`load`](Self::load), but only when the repository is `Idle`.
    ///
    /// The `Idle -> Loading` claim is atomic: of any number of concurrent
    /// callers, exactly one gets a future back.
    pub fn load_if_idle(
        &self,
    ) -> Option<impl Future<Output = Result<(), OperationError>> + Send + '_> {
        self.try_claim().map(|ticket| self.run_load(ticket))
    }

    pub(crate) fn begin_load(&self) -> LoadTicket {
        let mut epoch = 0;
        self.state.send_modify(|state| {
            state.status = Status::Loading;
            state.error = None;
            epoch = state.epoch;
        });
        self.notify();
        LoadTicket { epoch }
    }

    pub(crate) fn try_claim(&self) -> Option<LoadTicket> {
        let mut ticket = None;
        self.state.send_if_modified(|state| {
            if state.status != Status::Idle {
                return false;
            }
            state.status = Status::Loading;
            state.error = None;
            ticket = Some(LoadTicket { epoch: state.epoch });
            true
        });
        if ticket.is_some() {
            self.notify();
        }
        ticket
    }

    pub(crate) async fn run_load(&self, ticket: LoadTicket) -> Result<(), OperationError> {
        let persisted = self.read_snapshot();

        let fetched = match self.client.fetch::<R::Data>(R::KIND.resource()).await {
            Ok(fetched) => fetched,
            Err(err) => return Err(self.fail_load(ticket, err.into())),
        };

        let outcome = reconcile(persisted, fetched);
        let published = self.state.send_if_modified(|state| {
            if state.epoch != ticket.epoch {
                return false;
            }
            // Written under the state lock so a concurrent invalidate()
            // cannot interleave between the write and the publish.
            if let Some(json) = &outcome.write {
                self.write_snapshot(json);
            }
            state.data = Arc::clone(&outcome.published);
            state.status = Status::Succeeded;
            state.error = None;
            true
        });

        if published {
            debug!(kind = %R::KIND, dirty = outcome.is_dirty(), "load settled");
            self.notify();
        } else {
            warn!(kind = %R::KIND, "discarding load result from before invalidation");
        }
        Ok(())
    }

    fn fail_load(&self, ticket: LoadTicket, cause: CoreError) -> OperationError {
        let err = OperationError::new(R::KIND, Operation::Load, cause);
        let info = err.info();
        let recorded = self.state.send_if_modified(|state| {
            if state.epoch != ticket.epoch {
                return false;
            }
            state.status = Status::Failed;
            state.error = Some(info);
            true
        });
        if recorded {
            self.notify();
        }
        debug!(kind = %R::KIND, error = %err.source, "load failed");
        err
    }

    /// Read and decode the persisted snapshot. Absent, unreadable, and
    /// undecodable snapshots all come back as the empty value.
    fn read_snapshot(&self) -> Arc<R::Data> {
        let key = R::KIND.storage_key();
        let raw = match self.snapshots.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Arc::default(),
            Err(err) => {
                warn!(key, error = %err, "snapshot read failed, treating as empty");
                return Arc::default();
            }
        };

        match serde_json::from_str::<R::Data>(&raw) {
            Ok(decoded) => {
                let current = self.data();
                if *current == decoded {
                    current
                } else {
                    Arc::new(decoded)
                }
            }
            Err(err) => {
                warn!(key, error = %err, "discarding undecodable snapshot");
                Arc::default()
            }
        }
    }

    fn write_snapshot(&self, json: &str) {
        let key = R::KIND.storage_key();
        if let Err(err) = self.snapshots.set(key, json) {
            warn!(key, error = %err, "snapshot write failed, continuing in memory");
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Drop the persisted snapshot and return to the initial state.
    /// Any load still in flight will discard its result.
    pub fn invalidate(&self) {
        let key = R::KIND.storage_key();
        self.state.send_modify(|state| {
            if let Err(err) = self.snapshots.remove(key) {
                warn!(key, error = %err, "snapshot removal failed");
            }
            *state = RepositoryState {
                epoch: state.epoch.wrapping_add(1),
                ..RepositoryState::default()
            };
        });
        debug!(kind = %R::KIND, "invalidated");
        self.notify();
    }

    /// Return to the initial state without touching storage.
    pub(crate) fn reset(&self) {
        self.state.send_modify(|state| {
            *state = RepositoryState {
                epoch: state.epoch.wrapping_add(1),
                ..RepositoryState::default()
            };
        });
        self.notify();
    }

    fn notify(&self) {
        let status = self.status();
        // No receivers is fine.
        let _ = self.changes.send(StoreChange::Entity {
            kind: R::KIND,
            status,
        });
    }

    fn failure(&self, op: Operation, err: fruithub_api::Error) -> OperationError {
        let err = OperationError::new(R::KIND, op, err.into());
        debug!(kind = %R::KIND, %op, error = %err.source, "mutation failed");
        err
    }
}

// ── Mutations ────────────────────────────────────────────────────────
//
// Only record collections support these. None of them touch the snapshot;
// the next load reconciles.

impl<C, T> Repository<C>
where
    C: Collection<Record = T, Data = Vec<T>>,
    T: Record + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Create a record and append the backend's canonical copy.
    pub async fn add(&self, draft: &C::Draft) -> Result<T, OperationError> {
        let created: T = self
            .client
            .create(C::KIND.resource(), draft)
            .await
            .map_err(|e| self.failure(Operation::Add, e))?;

        self.state.send_modify(|state| {
            let mut items = Vec::clone(&state.data);
            items.push(created.clone());
            state.data = Arc::new(items);
        });
        self.notify();
        Ok(created)
    }

    /// Patch a record and replace the local copy with the backend's
    /// canonical one. A record missing locally is not inserted.
    pub async fn update(&self, id: &str, patch: &C::Patch) -> Result<T, OperationError> {
        let updated: T = self
            .client
            .update(C::KIND.resource(), id, patch)
            .await
            .map_err(|e| self.failure(Operation::Update, e))?;

        let changed = self.state.send_if_modified(|state| {
            let Some(pos) = state.data.iter().position(|r| r.id() == updated.id()) else {
                return false;
            };
            if state.data[pos] == updated {
                return false;
            }
            let mut items = Vec::clone(&state.data);
            items[pos] = updated.clone();
            state.data = Arc::new(items);
            true
        });
        if changed {
            self.notify();
        }
        Ok(updated)
    }

    /// Delete a record. The request is always sent, even when `id` is not
    /// held locally. Returns whether a local record was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, OperationError> {
        self.client
            .delete(C::KIND.resource(), id)
            .await
            .map_err(|e| self.failure(Operation::Delete, e))?;

        let removed = self.state.send_if_modified(|state| {
            if !state.data.iter().any(|r| r.id() == id) {
                return false;
            }
            let items: Vec<T> = state.data.iter().filter(|r| r.id() != id).cloned().collect();
            state.data = Arc::new(items);
            true
        });
        if removed {
            self.notify();
        }
        Ok(removed)
    }

    /// Look up a record in the current collection.
    pub fn get(&self, id: &str) -> Option<T> {
        self.state.borrow().data.iter().find(|r| r.id() == id).cloned()
    }
}
