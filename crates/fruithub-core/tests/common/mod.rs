#![allow(dead_code, clippy::unwrap_used)]
// Shared fixtures for fruithub-core integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};
use url::Url;
use wiremock::MockServer;

use fruithub_api::TransportConfig;
use fruithub_core::{ApiClient, CacheError, DataStore, MemorySnapshotStore, SnapshotStore};

/// Snapshot store that counts writes and removals.
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemorySnapshotStore,
    sets: AtomicUsize,
    removes: AtomicUsize,
}

impl CountingStore {
    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn removes(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.get(key).unwrap()
    }

    /// Seed a snapshot without counting it as a write.
    pub fn seed(&self, key: &str, value: &str) {
        self.inner.set(key, value).unwrap();
    }
}

impl SnapshotStore for CountingStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove(key)
    }
}

pub fn client_for(uri: &str) -> ApiClient {
    ApiClient::new(Url::parse(uri).unwrap(), &TransportConfig::default()).unwrap()
}

pub async fn setup() -> (MockServer, DataStore, Arc<CountingStore>) {
    let server = MockServer::start().await;
    let snapshots = Arc::new(CountingStore::default());
    let store = DataStore::new(client_for(&server.uri()), snapshots.clone());
    (server, store, snapshots)
}

// ── Wire fixtures ───────────────────────────────────────────────────

pub fn product_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "slug": title.to_lowercase().replace(' ', "-"),
        "price": 2.5,
        "images": [],
        "stock": 8,
        "status": "active",
        "isDeleted": false,
        "categoryId": "c1",
        "createdById": "u1",
        "createdAt": "2024-06-15T10:30:00Z",
        "updatedAt": "2024-06-15T10:30:00Z"
    })
}

pub fn category_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "productCount": 3,
        "createdAt": "2024-06-01T08:00:00Z"
    })
}

pub fn admin_json(id: &str, email: &str) -> Value {
    json!({
        "id": id,
        "name": "Store Admin",
        "email": email,
        "role": "admin",
        "status": "active",
        "createdAt": "2024-06-01T08:00:00Z",
        "updatedAt": "2024-06-01T08:00:00Z"
    })
}

pub fn user_json(id: &str, email: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "name": "Dana",
        "gender": "female",
        "role": "admin",
        "createdAt": "2024-06-01T08:00:00Z",
        "updatedAt": "2024-06-01T08:00:00Z"
    })
}
