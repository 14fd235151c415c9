//! `cache`: inspect and drop persisted snapshots for the active profile.

use fruithub_core::{CacheLocation, DataStore, EntityKind, StoreConfig};

use crate::cli::{CacheArgs, CacheCommand, GlobalOpts};
use crate::output;

pub fn handle(store: &DataStore, store_config: &StoreConfig, args: CacheArgs, global: &GlobalOpts) {
    match args.command {
        CacheCommand::Path => match &store_config.cache {
            CacheLocation::Directory(dir) => {
                output::print_output(&dir.display().to_string(), global.quiet);
            }
            CacheLocation::Memory => {
                output::notice(global, "Snapshots are kept in memory for this profile.");
            }
        },

        CacheCommand::Clear { collection } => {
            if let Some(collection) = collection {
                let kind = EntityKind::from(collection);
                store.invalidate(kind);
                output::success(global, &format!("Cleared cached {}", kind.plural()));
            } else {
                store.invalidate_all();
                output::success(global, "Cleared all cached collections");
            }
        }
    }
}
