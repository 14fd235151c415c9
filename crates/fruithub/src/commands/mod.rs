//! Command dispatch: bridges CLI args -> store operations -> output formatting.

pub mod admins;
pub mod cache;
pub mod categories;
pub mod config_cmd;
pub mod login;
pub mod products;
pub mod stats;
pub mod util;

use fruithub_core::{DataStore, StoreConfig};

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    store: &DataStore,
    store_config: &StoreConfig,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    match cmd {
        Command::Products(args) => products::handle(store, args, global).await,
        Command::Categories(args) => categories::handle(store, args, global).await,
        Command::Admins(args) => admins::handle(store, args, global).await,
        Command::Stats => stats::handle(store, global).await,
        Command::Login(args) => login::handle(store, args, global, cfg).await,
        Command::Cache(args) => {
            cache::handle(store, store_config, args, global);
            Ok(())
        }
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
