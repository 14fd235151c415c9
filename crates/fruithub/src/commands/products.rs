//! Product command handlers.

use tabled::Tabled;

use fruithub_core::model::slugify;
use fruithub_core::{Category, DataStore, NewProduct, Product, ProductPatch, category_name};

use crate::cli::{GlobalOpts, ProductsArgs, ProductsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: u32,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl ProductRow {
    fn new(p: &Product, categories: &[Category]) -> Self {
        let status = if p.is_deleted {
            format!("{} (deleted)", p.status)
        } else {
            p.status.to_string()
        };
        Self {
            id: p.id.clone(),
            title: p.title.clone(),
            category: category_name(categories, &p.category_id).to_owned(),
            price: format!("{:.2}", p.price),
            stock: p.stock,
            status,
            updated: util::short_time(&p.updated_at),
        }
    }
}

fn detail(p: &Product, categories: &[Category]) -> String {
    output::detail_lines(&[
        ("ID", p.id.clone()),
        ("Title", p.title.clone()),
        ("Slug", p.slug.clone()),
        (
            "Category",
            format!("{} ({})", category_name(categories, &p.category_id), p.category_id),
        ),
        ("Price", format!("{:.2}", p.price)),
        ("Stock", p.stock.to_string()),
        ("Status", p.status.to_string()),
        ("Deleted", p.is_deleted.to_string()),
        ("Description", util::or_dash(p.description.as_deref())),
        ("Images", p.images.len().to_string()),
        ("Created", util::short_time(&p.created_at)),
        ("Updated", util::short_time(&p.updated_at)),
    ])
}

/// Categories resolve display names only; a failed load degrades to
/// "Unknown" instead of failing the command.
async fn load_categories(store: &DataStore, global: &GlobalOpts) -> Vec<Category> {
    if let Err(e) = store.categories().load().await {
        output::notice(global, &format!("{e} Category names are unavailable."));
    }
    store.categories().data().as_ref().clone()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    store: &DataStore,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProductsCommand::List {
            include_archived,
            search,
        } => {
            store.products().load().await?;
            let categories = load_categories(store, global).await;

            let mut listing = store.bind_products().include_archived(include_archived);
            if let Some(needle) = search {
                listing = listing.search(needle);
            }
            let view = listing.view(&categories);

            let out = output::render_list(
                &global.output,
                &view.items,
                |p| ProductRow::new(p, &categories),
                |p| p.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Get { id } => {
            store.products().load().await?;
            let product = store.products().get(&id).ok_or_else(|| not_found(&id))?;
            let categories = load_categories(store, global).await;

            let out = output::render_single(
                &global.output,
                &product,
                |p| detail(p, &categories),
                |p| p.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ProductsCommand::Add {
            title,
            slug,
            price,
            stock,
            category,
            description,
            images,
            status,
        } => {
            let draft = NewProduct {
                slug: slug.unwrap_or_else(|| slugify(&title)),
                title,
                description,
                price,
                images,
                stock,
                status: status.map(Into::into),
                category_id: category,
                created_by_id: None,
            };
            let created = store.products().add(&draft).await?;
            output::success(global, &format!("Product '{}' created", created.title));
            output::print_output(&created.id, global.quiet);
            Ok(())
        }

        ProductsCommand::Update {
            id,
            title,
            slug,
            price,
            stock,
            category,
            description,
            status,
        } => {
            let patch = ProductPatch {
                title,
                slug,
                description,
                price,
                stock,
                status: status.map(Into::into),
                category_id: category,
                ..ProductPatch::default()
            };
            if patch == ProductPatch::default() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "no fields to change were given".into(),
                });
            }
            let updated = store.products().update(&id, &patch).await?;
            output::success(global, &format!("Product '{}' updated", updated.title));
            Ok(())
        }

        ProductsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete product '{id}'?"), global.yes)? {
                return Ok(());
            }
            store.products().delete(&id).await?;
            output::success(global, &format!("Product '{id}' deleted"));
            Ok(())
        }
    }
}

fn not_found(id: &str) -> CliError {
    CliError::NotFound {
        resource_type: "product".into(),
        identifier: id.into(),
        list_command: "products list --include-archived".into(),
    }
}
