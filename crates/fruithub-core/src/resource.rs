// ── Resource descriptors ──
//
// Zero-sized markers tying an entity kind to its payload types. A
// `Repository<R>` is generic over these, so one implementation serves
// every collection.

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::kind::EntityKind;
use crate::model::{
    Admin, AdminPatch, Category, CategoryPatch, NewAdmin, NewCategory, NewProduct, Product,
    ProductPatch, Record, StatBundle,
};

/// Anything a repository can load and cache.
pub trait Resource: Send + Sync + 'static {
    const KIND: EntityKind;

    /// The published value: a record list, or a single aggregate.
    type Data: Clone
        + Default
        + PartialEq
        + Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;
}

/// A resource made of identified records that supports add/update/delete.
pub trait Collection: Resource {
    type Record: Record
        + Clone
        + PartialEq
        + Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;
    /// Body for `POST /{kind}`.
    type Draft: Serialize + Send + Sync;
    /// Body for `PUT /{kind}/{id}`.
    type Patch: Serialize + Send + Sync;
}

pub enum Products {}
pub enum Categories {}
pub enum Admins {}
pub enum Stats {}

impl Resource for Products {
    const KIND: EntityKind = EntityKind::Product;
    type Data = Vec<Product>;
}

impl Collection for Products {
    type Record = Product;
    type Draft = NewProduct;
    type Patch = ProductPatch;
}

impl Resource for Categories {
    const KIND: EntityKind = EntityKind::Category;
    type Data = Vec<Category>;
}

impl Collection for Categories {
    type Record = Category;
    type Draft = NewCategory;
    type Patch = CategoryPatch;
}

impl Resource for Admins {
    const KIND: EntityKind = EntityKind::Admin;
    type Data = Vec<Admin>;
}

impl Collection for Admins {
    type Record = Admin;
    type Draft = NewAdmin;
    type Patch = AdminPatch;
}

impl Resource for Stats {
    const KIND: EntityKind = EntityKind::Stat;
    type Data = StatBundle;
}
