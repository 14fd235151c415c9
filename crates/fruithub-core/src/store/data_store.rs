// ── Central reactive data store ──
//
// Explicitly constructed handle aggregating every repository and the auth
// sub-state. Callers share it by `Arc`; there is no global instance.

use std::sync::Arc;

use fruithub_api::{ApiClient, TransportConfig};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::{AuthStore, Repository, StoreChange};
use crate::binding::{Binding, ProductBinding};
use crate::cache::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
use crate::config::{CacheLocation, StoreConfig};
use crate::error::CoreError;
use crate::kind::EntityKind;
use crate::resource::{Admins, Categories, Products, Stats};

const CHANGE_CAPACITY: usize = 64;

/// Central reactive store for all dashboard collections.
///
/// Each repository publishes its own state through a `watch` channel;
/// `subscribe()` additionally yields one `StoreChange` per state change
/// across the whole store.
#[derive(Debug)]
pub struct DataStore {
    products: Arc<Repository<Products>>,
    categories: Arc<Repository<Categories>>,
    admins: Arc<Repository<Admins>>,
    stats: Arc<Repository<Stats>>,
    auth: AuthStore,
    changes: broadcast::Sender<StoreChange>,
}

impl DataStore {
    pub fn new(client: ApiClient, snapshots: Arc<dyn SnapshotStore>) -> Self {
        let client = Arc::new(client);
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);

        Self {
            products: Arc::new(Repository::new(
                Arc::clone(&client),
                Arc::clone(&snapshots),
                changes.clone(),
            )),
            categories: Arc::new(Repository::new(
                Arc::clone(&client),
                Arc::clone(&snapshots),
                changes.clone(),
            )),
            admins: Arc::new(Repository::new(
                Arc::clone(&client),
                Arc::clone(&snapshots),
                changes.clone(),
            )),
            stats: Arc::new(Repository::new(
                Arc::clone(&client),
                snapshots,
                changes.clone(),
            )),
            auth: AuthStore::new(client, changes.clone()),
            changes,
        }
    }

    /// Build the API client and snapshot store described by `config`.
    ///
    /// A cache directory that cannot be opened falls back to an in-memory
    /// store rather than failing.
    pub fn from_config(config: &StoreConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = ApiClient::new(config.base_url.clone(), &transport)?;

        let snapshots: Arc<dyn SnapshotStore> = match &config.cache {
            CacheLocation::Memory => Arc::new(MemorySnapshotStore::new()),
            CacheLocation::Directory(dir) => match FileSnapshotStore::open(dir) {
                Ok(store) => {
                    debug!(dir = %dir.display(), "using file snapshot store");
                    Arc::new(store)
                }
                Err(err) => {
                    warn!(error = %err, "snapshot directory unavailable, caching in memory");
                    Arc::new(MemorySnapshotStore::new())
                }
            },
        };

        Ok(Self::new(client, snapshots))
    }

    // ── Repositories ─────────────────────────────────────────────────

    pub fn products(&self) -> &Arc<Repository<Products>> {
        &self.products
    }

    pub fn categories(&self) -> &Arc<Repository<Categories>> {
        &self.categories
    }

    pub fn admins(&self) -> &Arc<Repository<Admins>> {
        &self.admins
    }

    pub fn stats(&self) -> &Arc<Repository<Stats>> {
        &self.stats
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }

    // ── View bindings ────────────────────────────────────────────────

    pub fn bind_products(&self) -> ProductBinding {
        ProductBinding::attach(Arc::clone(&self.products))
    }

    pub fn bind_categories(&self) -> Binding<Categories> {
        Binding::attach(Arc::clone(&self.categories))
    }

    pub fn bind_admins(&self) -> Binding<Admins> {
        Binding::attach(Arc::clone(&self.admins))
    }

    pub fn bind_stats(&self) -> Binding<Stats> {
        Binding::attach(Arc::clone(&self.stats))
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Invalidate one collection: drop its snapshot and return it to `Idle`.
    pub fn invalidate(&self, kind: EntityKind) {
        match kind {
            EntityKind::Product => self.products.invalidate(),
            EntityKind::Category => self.categories.invalidate(),
            EntityKind::Admin => self.admins.invalidate(),
            EntityKind::Stat => self.stats.invalidate(),
        }
    }

    pub fn invalidate_all(&self) {
        self.products.invalidate();
        self.categories.invalidate();
        self.admins.invalidate();
        self.stats.invalidate();
    }

    /// Return every sub-state to its initial value without touching
    /// persisted snapshots.
    pub fn reset(&self) {
        self.products.reset();
        self.categories.reset();
        self.admins.reset();
        self.stats.reset();
        self.auth.reset();
    }
}
