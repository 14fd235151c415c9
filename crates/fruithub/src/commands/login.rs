//! `login`: check credentials against the backend and show the session user.

use std::io::IsTerminal;

use secrecy::SecretString;
use tracing::debug;

use fruithub_core::{DataStore, User};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(user: &User) -> String {
    output::detail_lines(&[
        ("ID", user.id.clone()),
        ("Name", user.display_name().to_owned()),
        ("Email", user.email.clone()),
        ("Role", user.role.clone()),
        ("Phone", util::or_dash(user.phone.as_deref())),
        ("City", util::or_dash(user.city.as_deref())),
        ("Country", util::or_dash(user.country.as_deref())),
        ("Member since", util::short_time(&user.created_at)),
    ])
}

/// Password from the profile's credential chain, falling back to a prompt
/// when a terminal is attached.
fn password_for(profile: &Profile, profile_name: &str) -> Result<SecretString, CliError> {
    match config::resolve_password(profile, profile_name) {
        Ok(secret) => Ok(secret),
        Err(_) if std::io::stdin().is_terminal() => {
            debug!(profile = profile_name, "no stored password, prompting");
            Ok(SecretString::from(rpassword::prompt_password("Password: ")?))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn handle(
    store: &DataStore,
    args: LoginArgs,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    let profile_name = config::active_profile_name(global, cfg);
    let profile = cfg.profiles.get(&profile_name).cloned().unwrap_or_default();

    let email = match args.email {
        Some(email) => email,
        None => config::resolve_email(&profile, &profile_name)?,
    };
    let password = password_for(&profile, &profile_name)?;

    let user = store.auth().login(&email, &password).await?;
    output::success(global, &format!("Logged in as {}", user.display_name()));

    let out = output::render_single(&global.output, &user, detail, |u| u.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
