//! Config subcommand handlers.

use std::path::PathBuf;

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Defaults, Profile};
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of `cfg` with plaintext passwords masked, for structured output.
fn redacted(cfg: &Config) -> Config {
    Config {
        default_profile: cfg.default_profile.clone(),
        defaults: Defaults {
            output: cfg.defaults.output.clone(),
            color: cfg.defaults.color.clone(),
            timeout: cfg.defaults.timeout,
        },
        profiles: cfg
            .profiles
            .iter()
            .map(|(name, p)| {
                let mut p = p.clone();
                if p.password.is_some() {
                    p.password = Some(MASK.into());
                }
                (name.clone(), p)
            })
            .collect(),
    }
}

/// TOML-like rendering for the table format.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "base_url = \"{}\"", p.base_url);
        if let Some(ref email) = p.email {
            let _ = writeln!(out, "email = \"{email}\"");
        }
        if let Some(ref pw) = p.password {
            let _ = writeln!(out, "password = \"{pw}\"");
        }
        if let Some(ref env) = p.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
        if let Some(ref dir) = p.cache_dir {
            let _ = writeln!(out, "cache_dir = \"{}\"", dir.display());
        }
        if let Some(cache) = p.cache {
            let _ = writeln!(out, "cache = {cache}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out.trim_end().to_owned()
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn invalid(field: &str, reason: &str) -> CliError {
    CliError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

/// Relative paths resolve against the working directory.
fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

/// Apply `key = value` to a profile.
fn set_profile_value(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "base_url" | "base-url" => {
            value
                .parse::<url::Url>()
                .map_err(|_| invalid("base_url", "must be an absolute URL"))?;
            profile.base_url = value;
        }
        "email" => profile.email = Some(value),
        "password_env" | "password-env" => profile.password_env = Some(value),
        "cache" => {
            profile.cache = Some(
                value
                    .parse()
                    .map_err(|_| invalid("cache", "must be 'true' or 'false'"))?,
            );
        }
        "cache_dir" | "cache-dir" => profile.cache_dir = Some(absolute(value.into())),
        "timeout" => {
            profile.timeout = Some(
                value
                    .parse()
                    .map_err(|_| invalid("timeout", "must be a number (seconds)"))?,
            );
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: base_url, email, \
                     password_env, cache, cache_dir, timeout"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, format_config, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_profile_value(profile, &key, value)?;

            config::save_config(&cfg)?;
            output::success(global, &format!("Set {key} on profile '{profile_name}'"));
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                output::notice(global, "No profiles configured. Run: fruithub config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                let lines: Vec<String> = names
                    .into_iter()
                    .map(|name| {
                        let marker = if name.as_str() == default { " *" } else { "" };
                        format!("{name}{marker}")
                    })
                    .collect();
                output::print_output(&lines.join("\n"), global.quiet);
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            config::require_profile(&cfg, &name)?;

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::success(global, &format!("Default profile set to '{name}'"));
            Ok(())
        }

        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            config::require_profile(&cfg, &profile_name)?;

            let secret = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if secret.is_empty() {
                return Err(invalid("password", "value cannot be empty"));
            }
            config::store_password(&profile_name, &secret)?;
            output::success(
                global,
                &format!("Password stored in system keyring for profile '{profile_name}'"),
            );
            Ok(())
        }
    }
}

// ── Init: interactive wizard ────────────────────────────────────────

fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("Fruithub CLI configuration");
    eprintln!("   Config path: {}\n", config_path.display());

    let mut cfg = config::load_config_or_default();

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let base_url: String = Input::new()
        .with_prompt("API base URL")
        .default("http://localhost:3000/api/".into())
        .validate_with(|input: &String| -> Result<(), String> {
            input
                .parse::<url::Url>()
                .map(|_| ())
                .map_err(|e| format!("invalid URL: {e}"))
        })
        .interact_text()
        .map_err(prompt_err)?;

    let email: String = Input::new()
        .with_prompt("Login email (blank to skip)")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let mut profile = Profile {
        base_url,
        email: (!email.is_empty()).then_some(email),
        ..Profile::default()
    };

    if profile.email.is_some() {
        let choices = &[
            "Store password in system keyring (recommended)",
            "Save password to config file (plaintext)",
            "Skip",
        ];
        let selection = Select::new()
            .with_prompt("Password storage")
            .items(choices)
            .default(0)
            .interact()
            .map_err(prompt_err)?;

        if selection < 2 {
            let secret = rpassword::prompt_password("Password: ").map_err(prompt_err)?;
            if secret.is_empty() {
                return Err(invalid("password", "value cannot be empty"));
            }
            if selection == 0 {
                config::store_password(&profile_name, &secret)?;
                eprintln!("   Password stored in system keyring");
            } else {
                profile.password = Some(secret);
            }
        }
    }

    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());
    config::save_config(&cfg)?;

    eprintln!("\nConfiguration written to {}", config_path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: fruithub login");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_validates_values() {
        let mut profile = Profile::default();
        set_profile_value(&mut profile, "timeout", "12".into()).unwrap();
        set_profile_value(&mut profile, "cache", "false".into()).unwrap();
        set_profile_value(&mut profile, "base-url", "http://cms/api/".into()).unwrap();
        assert_eq!(profile.timeout, Some(12));
        assert_eq!(profile.cache, Some(false));
        assert_eq!(profile.base_url, "http://cms/api/");

        assert!(set_profile_value(&mut profile, "timeout", "soon".into()).is_err());
        assert!(set_profile_value(&mut profile, "base_url", "nope".into()).is_err());
        assert!(set_profile_value(&mut profile, "api_key", "x".into()).is_err());
    }

    #[test]
    fn show_masks_plaintext_passwords() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                base_url: "http://cms/api/".into(),
                password: Some("hunter2".into()),
                ..Profile::default()
            },
        );

        let shown = format_config(&redacted(&cfg));
        assert!(shown.contains("password = \"****\""));
        assert!(!shown.contains("hunter2"));
    }
}
