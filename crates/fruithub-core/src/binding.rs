// ── View bindings ──
//
// Per-collection adapters for presentation code. Attaching a binding to an
// `Idle` repository starts exactly one load; after that, loads only happen
// through `reload()`. Derived views are pure projections of state.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::OperationError;
use crate::model::{Category, Product};
use crate::resource::{Products, Resource};
use crate::state::{RepositoryState, Status};
use crate::store::{LoadTicket, Repository};
use crate::stream::StateStream;

/// Display name used for products whose category is not loaded.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// What a screen renders: `{ items, loading, error, status }`.
#[derive(Debug, Clone, PartialEq)]
pub struct View<T> {
    pub items: T,
    pub loading: bool,
    pub error: Option<String>,
    pub status: Status,
}

impl<D> View<Arc<D>> {
    fn of(state: &RepositoryState<D>) -> Self {
        Self {
            items: Arc::clone(state.data()),
            loading: state.is_loading(),
            error: state.error().map(|e| e.message.clone()),
            status: state.status(),
        }
    }
}

type LoadHandle = JoinHandle<Result<(), OperationError>>;

fn spawn_load<R: Resource>(repo: &Arc<Repository<R>>, ticket: LoadTicket) -> LoadHandle {
    let repo = Arc::clone(repo);
    tokio::spawn(async move { repo.run_load(ticket).await })
}

/// A view binding over one repository. Must be attached from within a
/// Tokio runtime.
pub struct Binding<R: Resource> {
    repo: Arc<Repository<R>>,
    stream: StateStream<RepositoryState<R::Data>>,
}

impl<R: Resource> Binding<R> {
    /// Attach to `repo`, starting the initial load if it is `Idle`.
    /// Failed repositories are left alone until `reload()`.
    pub fn attach(repo: Arc<Repository<R>>) -> Self {
        if let Some(ticket) = repo.try_claim() {
            debug!(kind = %R::KIND, "initial load on attach");
            // Detached: the outcome lands on repository state.
            drop(spawn_load(&repo, ticket));
        }
        let stream = repo.subscribe();
        Self { repo, stream }
    }

    pub fn repository(&self) -> &Arc<Repository<R>> {
        &self.repo
    }

    pub fn view(&self) -> View<Arc<R::Data>> {
        View::of(&self.repo.state())
    }

    /// Unconditionally start a new load. `Loading` is set before this
    /// returns.
    pub fn reload(&self) -> LoadHandle {
        let ticket = self.repo.begin_load();
        spawn_load(&self.repo, ticket)
    }

    /// Wait for the next state change.
    pub async fn changed(&mut self) -> Option<View<Arc<R::Data>>> {
        self.stream.changed().await.map(|state| View::of(&state))
    }

    /// Wait until no load is in flight.
    pub async fn settled(&mut self) -> Option<View<Arc<R::Data>>> {
        self.stream
            .wait_until(|state| !state.is_loading())
            .await
            .map(|state| View::of(&state))
    }
}

// ── Products ─────────────────────────────────────────────────────────

/// Listing filter for products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Show soft-deleted and archived products too.
    pub include_archived: bool,
    /// Case-insensitive match on title or category name.
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product, categories: &[Category]) -> bool {
        if !self.include_archived && !product.is_listed() {
            return false;
        }
        let Some(needle) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            return true;
        };
        let needle = needle.to_lowercase();
        product.title.to_lowercase().contains(&needle)
            || category_name(categories, &product.category_id)
                .to_lowercase()
                .contains(&needle)
    }

    pub fn apply(&self, products: &[Product], categories: &[Category]) -> Vec<Product> {
        products
            .iter()
            .filter(|p| self.matches(p, categories))
            .cloned()
            .collect()
    }
}

/// Resolve a category id to its name, or [`UNKNOWN_CATEGORY`].
pub fn category_name<'a>(categories: &'a [Category], id: &str) -> &'a str {
    categories
        .iter()
        .find(|c| c.id == id)
        .map_or(UNKNOWN_CATEGORY, |c| c.name.as_str())
}

/// Product binding with listing projection.
pub struct ProductBinding {
    inner: Binding<Products>,
    filter: ProductFilter,
}

impl ProductBinding {
    pub fn attach(repo: Arc<Repository<Products>>) -> Self {
        Self {
            inner: Binding::attach(repo),
            filter: ProductFilter::default(),
        }
    }

    #[must_use]
    pub fn include_archived(mut self, include: bool) -> Self {
        self.filter.include_archived = include;
        self
    }

    #[must_use]
    pub fn search(mut self, needle: impl Into<String>) -> Self {
        self.filter.search = Some(needle.into());
        self
    }

    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    pub fn binding(&mut self) -> &mut Binding<Products> {
        &mut self.inner
    }

    /// Filtered listing. `categories` resolves names for search.
    pub fn view(&self, categories: &[Category]) -> View<Vec<Product>> {
        let View {
            items,
            loading,
            error,
            status,
        } = self.inner.view();
        View {
            items: self.filter.apply(&items, categories),
            loading,
            error,
            status,
        }
    }

    pub fn reload(&self) -> LoadHandle {
        self.inner.reload()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::ProductStatus;

    fn product(id: &str, title: &str, category: &str, status: ProductStatus) -> Product {
        Product {
            id: id.into(),
            title: title.into(),
            slug: id.into(),
            description: None,
            price: 1.5,
            images: Vec::new(),
            stock: 10,
            status,
            is_deleted: false,
            category_id: category.into(),
            created_by_id: "u1".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.into(),
            name: name.into(),
            image: None,
            description: None,
            product_count: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn dangling_category_resolves_to_unknown() {
        let categories = vec![category("c1", "Dairy")];
        assert_eq!(category_name(&categories, "c1"), "Dairy");
        assert_eq!(category_name(&categories, "c404"), "Unknown");
        assert_eq!(category_name(&[], "c1"), "Unknown");
    }

    #[test]
    fn default_filter_hides_archived_and_deleted() {
        let mut deleted = product("p3", "Cheese", "c1", ProductStatus::Active);
        deleted.is_deleted = true;
        let products = vec![
            product("p1", "Milk", "c1", ProductStatus::Active),
            product("p2", "Old Milk", "c1", ProductStatus::Archived),
            deleted,
        ];

        let listed = ProductFilter::default().apply(&products, &[]);
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "p1");

        let all = ProductFilter {
            include_archived: true,
            ..ProductFilter::default()
        }
        .apply(&products, &[]);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn search_matches_title_or_category_name() {
        let categories = vec![category("c1", "Dairy"), category("c2", "Fruit")];
        let products = vec![
            product("p1", "Milk", "c1", ProductStatus::Active),
            product("p2", "Apple", "c2", ProductStatus::Active),
            product("p3", "Mystery", "c9", ProductStatus::LowStock),
        ];

        let by_category = ProductFilter {
            search: Some("dairy".into()),
            ..ProductFilter::default()
        };
        let ids: Vec<_> = by_category
            .apply(&products, &categories)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["p1"]);

        let by_title = ProductFilter {
            search: Some("  APP ".into()),
            ..ProductFilter::default()
        };
        assert_eq!(by_title.apply(&products, &categories)[0].id, "p2");

        let blank = ProductFilter {
            search: Some("   ".into()),
            ..ProductFilter::default()
        };
        assert_eq!(blank.apply(&products, &categories).len(), 3);
    }
}
