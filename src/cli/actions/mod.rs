//! Actions executed after dispatch.

use crate::auth::guard::{self, RouteDecision};
use crate::auth::session::{SessionConfig, SessionManager};
use crate::auth::signup::SignupFlow;
use crate::auth::store::CredentialStore;
use crate::auth::types::{Role, Session};
use crate::auth::vault::{FileVault, SessionVault};
use crate::cli::globals::GlobalArgs;
use anyhow::{anyhow, Result};
use secrecy::SecretString;
use std::sync::Arc;

/// One executable CLI action.
#[derive(Debug)]
pub enum Action {
    Login {
        email: String,
        password: SecretString,
    },
    Demo {
        role: Role,
    },
    Status,
    Visit {
        path: String,
    },
    Logout,
    Signup {
        email: String,
        code: Option<String>,
        name: String,
        password: SecretString,
        confirm: SecretString,
    },
}

/// Execute the action against a file-persisted session.
///
/// # Errors
///
/// Returns an error when the action fails; auth errors carry their
/// user-facing message.
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    // Auth state hydrates before any action runs, signup included.
    let manager = manager(globals)?;
    manager.restore().await;

    match action {
        Action::Login { email, password } => {
            manager
                .login(&email, password)
                .await
                .map_err(|err| anyhow!("{err}"))?;
            print_session(&manager);
        }
        Action::Demo { role } => {
            manager
                .login_as_demo(role)
                .await
                .map_err(|err| anyhow!("{err}"))?;
            print_session(&manager);
        }
        Action::Status => print_session(&manager),
        Action::Visit { path } => {
            let access = guard::page_access(&path)
                .ok_or_else(|| anyhow!("unknown page: {path}"))?;
            match guard::evaluate(&manager.state(), access) {
                RouteDecision::Wait => println!("waiting: session state is not ready"),
                RouteDecision::Allow => println!("allow {path}"),
                RouteDecision::Redirect(target) => {
                    println!("redirect {path} -> {}", target.path());
                }
            }
        }
        Action::Logout => {
            manager.logout().await;
            println!("signed out");
        }
        Action::Signup {
            email,
            code,
            name,
            password,
            confirm,
        } => run_signup(&email, code.as_deref(), &name, &password, &confirm)?,
    }

    Ok(())
}

fn manager(globals: &GlobalArgs) -> Result<SessionManager> {
    let store = CredentialStore::with_demo_identities()?;
    let vault: Arc<dyn SessionVault> = Arc::new(FileVault::new(&globals.session_file));
    Ok(SessionManager::new(store, vault, SessionConfig::new()))
}

fn print_session(manager: &SessionManager) {
    match manager.current_session() {
        Some(Session {
            identity, token, ..
        }) => {
            println!(
                "signed in as {} <{}> role={}",
                identity.display_name, identity.email, identity.role
            );
            println!(
                "token {} issued at {}",
                token.fingerprint(),
                token.issued_at_unix()
            );
            println!("navigation:");
            for item in guard::visible_navigation(identity.role) {
                println!("  {:<20} {}", item.label, item.path);
            }
        }
        None => println!("not signed in"),
    }
}

fn run_signup(
    email: &str,
    code: Option<&str>,
    name: &str,
    password: &SecretString,
    confirm: &SecretString,
) -> Result<()> {
    let mut flow = SignupFlow::new();
    flow.submit_email(email).map_err(|err| anyhow!("{err}"))?;
    let code = match code {
        Some(code) => code.to_string(),
        None => flow
            .sent_code()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("no one-time code was sent"))?,
    };
    flow.submit_code(&code).map_err(|err| anyhow!("{err}"))?;
    let pending = flow
        .submit_profile(name, password, confirm)
        .map_err(|err| anyhow!("{err}"))?;
    println!(
        "signup complete for {} <{}>; sign in to continue",
        pending.name, pending.email
    );
    Ok(())
}
