//! Process-wide session state with explicit lifecycle.
//!
//! The manager owns the only mutable auth state. `login`, `logout`, and
//! `restore` serialize on a single writer lock and publish complete
//! [`SessionState`] values through a watch channel, so readers never observe
//! a half-updated identity/token pair.

use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tracing::{error, info, warn};

use super::authenticator::Authenticator;
use super::errors::AuthError;
use super::store::{demo_credentials, CredentialStore};
use super::token::TokenIssuer;
use super::types::{Role, Session, SessionState};
use super::vault::SessionVault;

/// Session manager tunables.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    login_latency: Duration,
}

impl SessionConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            login_latency: Duration::ZERO,
        }
    }

    /// Artificial delay before credential verification, standing in for the
    /// round trip a real credential backend would cost.
    #[must_use]
    pub fn with_login_latency(mut self, latency: Duration) -> Self {
        self.login_latency = latency;
        self
    }

    #[must_use]
    pub const fn login_latency(&self) -> Duration {
        self.login_latency
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner of the live session and its persisted record.
pub struct SessionManager {
    authenticator: Authenticator,
    issuer: TokenIssuer,
    vault: Arc<dyn SessionVault>,
    config: SessionConfig,
    state: watch::Sender<SessionState>,
    writer: Mutex<()>,
}

impl SessionManager {
    #[must_use]
    pub fn new(store: CredentialStore, vault: Arc<dyn SessionVault>, config: SessionConfig) -> Self {
        let (state, _) = watch::channel(SessionState::Restoring);
        Self {
            authenticator: Authenticator::new(store),
            issuer: TokenIssuer,
            vault,
            config,
            state,
            writer: Mutex::new(()),
        }
    }

    /// Hydrate the live session from the persisted record.
    ///
    /// Always transitions the manager to ready. A missing record, an
    /// unreadable store, and a corrupt record all resolve to logged out; a
    /// corrupt record is additionally discarded so it is only seen once.
    pub async fn restore(&self) {
        let _writer = self.writer.lock().await;
        let session = match self.vault.load().await {
            Ok(Some(raw)) => match decode_record(&raw) {
                Ok(session) => {
                    info!(email = %session.identity.email, "restored persisted session");
                    Some(session)
                }
                Err(err) => {
                    warn!("discarding persisted session: {err}");
                    if let Err(err) = self.vault.clear().await {
                        warn!("failed to discard session record: {err}");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!("failed to read persisted session: {err}");
                None
            }
        };
        self.state.send_replace(SessionState::Ready(session));
    }

    /// Authenticate and open a session, replacing any existing one.
    ///
    /// On failure nothing changes, so the call is safe to retry.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] for a bad pair;
    /// [`AuthError::LoginFailed`] if token issuance fails.
    pub async fn login(&self, email: &str, secret: SecretString) -> Result<(), AuthError> {
        let _writer = self.writer.lock().await;
        let latency = self.config.login_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        let identity = self.authenticator.authenticate(email, &secret)?;
        let token = self.issuer.issue(identity.id).map_err(|err| {
            error!("failed to issue session token: {err}");
            AuthError::LoginFailed
        })?;
        let session = Session::new(identity, token);
        self.persist(&session).await;
        info!(
            email = %session.identity.email,
            role = %session.identity.role,
            token = %session.token.fingerprint(),
            "session established"
        );
        self.state.send_replace(SessionState::Ready(Some(session)));
        Ok(())
    }

    /// Open a session with one of the fixed demo identities.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SessionManager::login`].
    pub async fn login_as_demo(&self, role: Role) -> Result<(), AuthError> {
        let demo = demo_credentials(role);
        self.login(demo.email, SecretString::from(demo.password))
            .await
    }

    /// Drop the live session and the persisted record. Never errors, even
    /// when no session was live.
    pub async fn logout(&self) {
        let _writer = self.writer.lock().await;
        if let Err(err) = self.vault.clear().await {
            warn!("failed to clear persisted session: {err}");
        }
        self.state.send_replace(SessionState::Ready(None));
        info!("session cleared");
    }

    /// Cloned snapshot of the most recently committed session.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.state.borrow().session().cloned()
    }

    /// Snapshot including readiness, for route guards.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every committed login/logout/restore.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    async fn persist(&self, session: &Session) {
        // A failed write costs restore-after-restart, not the live session.
        match serde_json::to_string(session) {
            Ok(raw) => {
                if let Err(err) = self.vault.save(&raw).await {
                    warn!("failed to persist session record: {err}");
                }
            }
            Err(err) => warn!("failed to serialize session record: {err}"),
        }
    }
}

fn decode_record(raw: &str) -> Result<Session, AuthError> {
    serde_json::from_str(raw).map_err(|_| AuthError::CorruptSessionRecord)
}
