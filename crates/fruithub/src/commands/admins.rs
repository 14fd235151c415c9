//! Administrator command handlers.

use tabled::Tabled;

use fruithub_core::{Admin, AdminPatch, DataStore, NewAdmin};

use crate::cli::{AdminsArgs, AdminsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AdminRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last login")]
    last_login: String,
}

impl From<&Admin> for AdminRow {
    fn from(a: &Admin) -> Self {
        Self {
            id: a.id.clone(),
            name: a.name.clone(),
            email: a.email.clone(),
            role: a.role.clone(),
            status: a.status.clone(),
            last_login: a
                .last_login
                .as_ref()
                .map_or_else(|| "never".into(), util::short_time),
        }
    }
}

pub async fn handle(
    store: &DataStore,
    args: AdminsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let repo = store.admins();
    match args.command {
        AdminsCommand::List => {
            repo.load().await?;
            let data = repo.data();
            let out = output::render_list(
                &global.output,
                data.as_slice(),
                |a| AdminRow::from(a),
                |a| a.email.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminsCommand::Add {
            name,
            email,
            role,
            status,
            phone,
            no_password,
        } => {
            let password = if no_password {
                None
            } else {
                Some(util::prompt_new_password("Initial password")?)
            };
            let created = repo
                .add(&NewAdmin {
                    name,
                    email,
                    role,
                    status,
                    phone,
                    password,
                })
                .await?;
            output::success(global, &format!("Admin '{}' created", created.email));
            output::print_output(&created.id, global.quiet);
            Ok(())
        }

        AdminsCommand::Update {
            id,
            name,
            email,
            role,
            status,
            phone,
            reset_password,
        } => {
            let password = if reset_password {
                Some(util::prompt_new_password("New password")?)
            } else {
                None
            };
            if !reset_password
                && [&name, &email, &role, &status, &phone]
                    .iter()
                    .all(|field| field.is_none())
            {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "no fields to change were given".into(),
                });
            }
            let updated = repo
                .update(
                    &id,
                    &AdminPatch {
                        name,
                        email,
                        role,
                        status,
                        phone,
                        password,
                    },
                )
                .await?;
            output::success(global, &format!("Admin '{}' updated", updated.email));
            Ok(())
        }

        AdminsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete admin '{id}'?"), global.yes)? {
                return Ok(());
            }
            repo.delete(&id).await?;
            output::success(global, &format!("Admin '{id}' deleted"));
            Ok(())
        }
    }
}
