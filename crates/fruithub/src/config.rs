//! CLI configuration: thin wrapper around `fruithub_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--base-url, --timeout, --no-cache).

use std::time::Duration;

use fruithub_core::{CacheLocation, StoreConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use fruithub_config::{
    Config, Defaults, Profile, cache_root, config_path, load_config_or_default,
    profile_to_store_config, resolve_email, resolve_password, save_config, store_password,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the `StoreConfig` for this invocation.
///
/// Profile values first, then flag / env overrides. Without a matching
/// profile a `--base-url` alone is enough; snapshots then go under the
/// cache root for the requested profile name.
pub fn resolve_store_config(global: &GlobalOpts, cfg: &Config) -> Result<StoreConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let mut store = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile_to_store_config(profile, &profile_name)?,
        None => {
            let url_str = global.base_url.as_deref().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            StoreConfig::new(parse_base_url(url_str)?)
                .with_timeout(Duration::from_secs(cfg.defaults.timeout))
                .with_cache(CacheLocation::Directory(cache_root().join(&profile_name)))
        }
    };

    if let Some(ref url_str) = global.base_url {
        store.base_url = parse_base_url(url_str)?;
    }
    if let Some(secs) = global.timeout {
        store.timeout = Duration::from_secs(secs);
    }
    if global.no_cache {
        store.cache = CacheLocation::Memory;
    }

    Ok(store)
}

fn parse_base_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "base_url".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Look up a profile by name, listing the alternatives on failure.
pub fn require_profile<'a>(cfg: &'a Config, name: &str) -> Result<&'a Profile, CliError> {
    cfg.profiles.get(name).ok_or_else(|| {
        let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
        available.sort();
        CliError::ProfileNotFound {
            name: name.into(),
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["fruithub"];
        argv.extend_from_slice(args);
        argv.push("stats");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_profile() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                base_url: "http://cms.internal/api/".into(),
                timeout: Some(9),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn flags_override_profile_values() {
        let cfg = config_with_profile();
        let store = resolve_store_config(
            &global(&["--base-url", "http://other/api/", "--timeout", "2", "--no-cache"]),
            &cfg,
        )
        .unwrap();

        assert_eq!(store.base_url.as_str(), "http://other/api/");
        assert_eq!(store.timeout, Duration::from_secs(2));
        assert_eq!(store.cache, CacheLocation::Memory);
    }

    #[test]
    fn profile_values_apply_without_flags() {
        let store = resolve_store_config(&global(&[]), &config_with_profile()).unwrap();
        assert_eq!(store.base_url.as_str(), "http://cms.internal/api/");
        assert_eq!(store.timeout, Duration::from_secs(9));
        assert!(matches!(store.cache, CacheLocation::Directory(_)));
    }

    #[test]
    fn missing_profile_without_base_url_is_no_config() {
        let err = resolve_store_config(&global(&["--profile", "ghost"]), &Config::default())
            .unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn unknown_profile_lists_alternatives() {
        let cfg = config_with_profile();
        let err = require_profile(&cfg, "ghost").unwrap_err();
        assert!(matches!(
            err,
            CliError::ProfileNotFound { ref available, .. } if available == "default"
        ));
    }
}
