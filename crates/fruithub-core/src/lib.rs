// fruithub-core: Cache-backed reactive data layer between fruithub-api and
// consumers (CLI, dashboard views).
//
// Each entity kind gets a `Repository` that loads from the backend,
// reconciles against a persisted snapshot, and publishes
// `{ data, status, error }` through a `watch` channel. `DataStore`
// aggregates the repositories with the auth sub-state.

pub mod binding;
pub mod cache;
pub mod config;
pub mod error;
pub mod kind;
pub mod model;
pub mod resource;
pub mod state;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use binding::{Binding, ProductBinding, ProductFilter, UNKNOWN_CATEGORY, View, category_name};
pub use cache::{CacheError, FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use config::{CacheLocation, StoreConfig};
pub use error::{CoreError, Operation, OperationError};
pub use kind::EntityKind;
pub use resource::{Admins, Categories, Collection, Products, Resource, Stats};
pub use state::{ErrorInfo, ErrorKind, RepositoryState, Status};
pub use store::{AuthState, AuthStore, DataStore, Reconciliation, Repository, StoreChange, reconcile};
pub use stream::{StateStream, StateWatchStream};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Admin, AdminPatch, Category, CategoryPatch, NewAdmin, NewCategory, NewProduct, Product,
    ProductPatch, ProductStatus, Record, StatBundle, User, UserPatch,
};

pub use fruithub_api::ApiClient;
