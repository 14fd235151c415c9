// ── Domain model ──
//
// Canonical record shapes for every cached collection. Field names are
// camelCase on the wire and in snapshots; unknown fields are dropped at
// deserialization.

pub mod admin;
pub mod category;
pub mod product;
pub mod stats;
pub mod user;

pub use admin::{Admin, AdminPatch, NewAdmin};
pub use category::{Category, CategoryPatch, NewCategory};
pub use product::{NewProduct, Product, ProductPatch, ProductStatus, slugify};
pub use stats::{
    CategoryStats, ChangeType, LargestCategory, OrderStats, QuickStat, StatBundle, StatValue,
};
pub use user::{User, UserPatch};

/// A record with a backend-assigned, immutable string identity.
pub trait Record {
    fn id(&self) -> &str;
}
