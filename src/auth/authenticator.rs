//! Credential verification in front of the store.

use secrecy::SecretString;
use tracing::debug;

use super::errors::AuthError;
use super::store::CredentialStore;
use super::types::Identity;

/// Validates email/password pairs and hands out sanitized identities.
///
/// There is no lockout, rate limiting, or timing-attack mitigation here; the
/// credential backend this fronts is a fixed in-process list.
pub struct Authenticator {
    store: CredentialStore,
}

impl Authenticator {
    #[must_use]
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    /// Verify the pair against the store.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when no entry matches both
    /// fields exactly.
    pub fn authenticate(&self, email: &str, secret: &SecretString) -> Result<Identity, AuthError> {
        match self.store.verify(email, secret) {
            Some(identity) => Ok(identity),
            None => {
                debug!(email = %email, "credential verification failed");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::demo_credentials;
    use crate::auth::types::Role;
    use anyhow::Result;

    #[test]
    fn seeded_pairs_authenticate_and_carry_no_secret() -> Result<()> {
        let authenticator = Authenticator::new(CredentialStore::with_demo_identities()?);
        for role in [Role::Standard, Role::Nutritionist, Role::Admin] {
            let demo = demo_credentials(role);
            let identity = authenticator
                .authenticate(demo.email, &SecretString::from(demo.password))
                .expect("seeded pair should authenticate");
            assert_eq!(identity.email, demo.email);
            let value = serde_json::to_value(&identity)?;
            assert!(value.get("password").is_none());
            assert!(value.get("secret_hash").is_none());
        }
        Ok(())
    }

    #[test]
    fn any_other_pair_is_invalid() -> Result<()> {
        let authenticator = Authenticator::new(CredentialStore::with_demo_identities()?);
        let cases = [
            ("user@example.com", "wrong-password"),
            ("unknown@example.com", "password123"),
            ("", ""),
        ];
        for (email, secret) in cases {
            let result = authenticator.authenticate(email, &SecretString::from(secret));
            assert_eq!(result, Err(AuthError::InvalidCredentials));
        }
        Ok(())
    }
}
