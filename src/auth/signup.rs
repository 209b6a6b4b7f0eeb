//! Staged signup flow: email, one-time code, profile.
//!
//! The flow is a transient value discarded on completion or abandonment. No
//! account is created here; a finished flow hands back the collected email
//! and name and the caller redirects to login. Every backward transition is
//! an explicit action, and no stage can be skipped.

use rand::{rngs::OsRng, RngCore};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use super::errors::AuthError;

/// Current stage of the flow.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SignupStage {
    Email,
    Code,
    Profile,
    Done,
}

/// Result of a completed flow. No credential entry is registered.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingRegistration {
    pub email: String,
    pub name: String,
}

/// The signup state machine.
///
/// The one-time code is ephemeral and never persisted; delivery is simulated
/// by logging it. Any six ASCII digits pass the code stage.
pub struct SignupFlow {
    stage: SignupStage,
    email: Option<String>,
    sent_code: Option<String>,
}

impl SignupFlow {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: SignupStage::Email,
            email: None,
            sent_code: None,
        }
    }

    #[must_use]
    pub const fn stage(&self) -> SignupStage {
        self.stage
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// The ephemeral code last "sent". Demo surface only; a real backend
    /// would deliver it out of band.
    #[must_use]
    pub fn sent_code(&self) -> Option<&str> {
        self.sent_code.as_deref()
    }

    /// Accept the email and "send" a one-time code.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidEmail`] for a missing or malformed address;
    /// [`AuthError::WrongStage`] outside the email stage.
    pub fn submit_email(&mut self, email: &str) -> Result<(), AuthError> {
        if self.stage != SignupStage::Email {
            return Err(AuthError::WrongStage);
        }
        let email = email.trim();
        if !valid_email(email) {
            return Err(AuthError::InvalidEmail);
        }
        let code = one_time_code();
        // Simulated delivery; a real backend would email this.
        info!(email = %email, code = %code, "one-time code sent");
        self.email = Some(email.to_string());
        self.sent_code = Some(code);
        self.stage = SignupStage::Code;
        Ok(())
    }

    /// Accept a one-time code: exactly six ASCII digits.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCode`] keeps the flow in the code stage;
    /// [`AuthError::WrongStage`] outside the code stage.
    pub fn submit_code(&mut self, code: &str) -> Result<(), AuthError> {
        if self.stage != SignupStage::Code {
            return Err(AuthError::WrongStage);
        }
        if code.len() != 6 || !code.bytes().all(|byte| byte.is_ascii_digit()) {
            debug!("one-time code rejected");
            return Err(AuthError::InvalidCode);
        }
        self.stage = SignupStage::Profile;
        Ok(())
    }

    /// Return to the email stage, discarding the sent code.
    pub fn back_to_email(&mut self) {
        if self.stage == SignupStage::Code {
            self.sent_code = None;
            self.stage = SignupStage::Email;
        }
    }

    /// Return from the profile stage to the code stage.
    pub fn back_to_code(&mut self) {
        if self.stage == SignupStage::Profile {
            self.stage = SignupStage::Code;
        }
    }

    /// Accept name, secret, and confirmation; completes the flow.
    ///
    /// # Errors
    ///
    /// [`AuthError::SecretMismatch`] keeps the flow in the profile stage;
    /// [`AuthError::WrongStage`] outside the profile stage.
    pub fn submit_profile(
        &mut self,
        name: &str,
        secret: &SecretString,
        confirmation: &SecretString,
    ) -> Result<PendingRegistration, AuthError> {
        if self.stage != SignupStage::Profile {
            return Err(AuthError::WrongStage);
        }
        if secret.expose_secret() != confirmation.expose_secret() {
            return Err(AuthError::SecretMismatch);
        }
        let email = self.email.clone().unwrap_or_default();
        self.stage = SignupStage::Done;
        self.sent_code = None;
        info!(email = %email, "signup flow completed");
        Ok(PendingRegistration {
            email,
            name: name.to_string(),
        })
    }
}

impl Default for SignupFlow {
    fn default() -> Self {
        Self::new()
    }
}

fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

fn one_time_code() -> String {
    let mut bytes = [0u8; 4];
    OsRng.fill_bytes(&mut bytes);
    format!("{:06}", u32::from_be_bytes(bytes) % 1_000_000)
}
