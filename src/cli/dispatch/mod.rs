//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the action to execute plus the arguments
//! every subcommand shares.

use crate::auth::types::Role;
use crate::cli::actions::Action;
use crate::cli::globals::GlobalArgs;
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let session_file = matches
        .get_one::<String>("session-file")
        .cloned()
        .context("missing required argument: --session-file")?;
    let globals = GlobalArgs::new(PathBuf::from(session_file));

    let action = match matches.subcommand() {
        Some(("login", sub)) => Action::Login {
            email: required(sub, "email")?,
            password: SecretString::from(required(sub, "password")?),
        },
        Some(("demo", sub)) => {
            let key = required(sub, "role")?;
            let role =
                Role::from_key(&key).ok_or_else(|| anyhow!("unknown demo role key: {key}"))?;
            Action::Demo { role }
        }
        Some(("status", _)) => Action::Status,
        Some(("visit", sub)) => Action::Visit {
            path: required(sub, "path")?,
        },
        Some(("logout", _)) => Action::Logout,
        Some(("signup", sub)) => Action::Signup {
            email: required(sub, "email")?,
            code: sub.get_one::<String>("code").cloned(),
            name: required(sub, "name")?,
            password: SecretString::from(required(sub, "password")?),
            confirm: SecretString::from(required(sub, "confirm")?),
        },
        _ => return Err(anyhow!("missing subcommand")),
    };

    Ok((action, globals))
}

fn required(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .with_context(|| format!("missing required argument: --{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    #[test]
    fn demo_subcommand_dispatches_with_role() -> Result<()> {
        let matches =
            commands::new().get_matches_from(["healthflow", "demo", "nutritionist"]);
        let (action, globals) = handler(&matches)?;
        assert_eq!(globals.session_file, PathBuf::from("healthflow-session.json"));
        match action {
            Action::Demo { role } => assert_eq!(role, Role::Nutritionist),
            other => panic!("unexpected action: {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn visit_subcommand_carries_the_path() -> Result<()> {
        let matches = commands::new().get_matches_from([
            "healthflow",
            "--session-file",
            "/tmp/record.json",
            "visit",
            "/admin",
        ]);
        let (action, globals) = handler(&matches)?;
        assert_eq!(globals.session_file, PathBuf::from("/tmp/record.json"));
        match action {
            Action::Visit { path } => assert_eq!(path, "/admin"),
            other => panic!("unexpected action: {other:?}"),
        }
        Ok(())
    }
}
