//! Category command handlers.

use tabled::Tabled;

use fruithub_core::{Category, CategoryPatch, DataStore, NewCategory};

use crate::cli::{CategoriesArgs, CategoriesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Products")]
    products: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            products: c.product_count.map(|n| n.to_string()).unwrap_or_default(),
            description: util::or_dash(c.description.as_deref()),
        }
    }
}

pub async fn handle(
    store: &DataStore,
    args: CategoriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let repo = store.categories();
    match args.command {
        CategoriesCommand::List => {
            repo.load().await?;
            let data = repo.data();
            let out = output::render_list(
                &global.output,
                data.as_slice(),
                |c| CategoryRow::from(c),
                |c| c.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CategoriesCommand::Add {
            name,
            description,
            image,
        } => {
            let created = repo
                .add(&NewCategory {
                    name,
                    image,
                    description,
                })
                .await?;
            output::success(global, &format!("Category '{}' created", created.name));
            output::print_output(&created.id, global.quiet);
            Ok(())
        }

        CategoriesCommand::Update {
            id,
            name,
            description,
            image,
        } => {
            let patch = CategoryPatch {
                name,
                image,
                description,
            };
            if patch == CategoryPatch::default() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "no fields to change were given".into(),
                });
            }
            let updated = repo.update(&id, &patch).await?;
            output::success(global, &format!("Category '{}' updated", updated.name));
            Ok(())
        }

        CategoriesCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete category '{id}'? Its products keep a dangling reference."),
                global.yes,
            )? {
                return Ok(());
            }
            repo.delete(&id).await?;
            output::success(global, &format!("Category '{id}' deleted"));
            Ok(())
        }
    }
}
