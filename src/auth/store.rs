//! Seeded credential store with salted-hash verification.
//!
//! Secrets are stored as argon2 PHC strings and never leave this module;
//! lookups hand out sanitized [`Identity`] copies only. Email matching is
//! exact string equality with no normalization or case folding.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use super::types::{Identity, Role};

/// A stored credential. The hash never leaves the store.
pub struct Credential {
    identity: Identity,
    secret_hash: String,
}

impl Credential {
    /// Hash the secret with a fresh salt and bind it to the identity.
    ///
    /// # Errors
    ///
    /// Returns an error if argon2 rejects the input.
    pub fn new(identity: Identity, secret: &str) -> Result<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let secret_hash = Argon2::default()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|err| anyhow!("failed to hash credential secret: {err}"))?
            .to_string();
        Ok(Self {
            identity,
            secret_hash,
        })
    }

    fn matches(&self, secret: &SecretString) -> bool {
        PasswordHash::new(&self.secret_hash).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(secret.expose_secret().as_bytes(), &parsed)
                .is_ok()
        })
    }
}

/// Fixed set of known identities.
pub struct CredentialStore {
    entries: Vec<Credential>,
}

impl CredentialStore {
    #[must_use]
    pub fn new(entries: Vec<Credential>) -> Self {
        Self { entries }
    }

    /// Store seeded with the three demo identities.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing a demo secret fails.
    pub fn with_demo_identities() -> Result<Self> {
        let entries = demo_identities()
            .into_iter()
            .map(|(identity, secret)| Credential::new(identity, secret))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(entries))
    }

    /// Look up an identity by exact email match.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<Identity> {
        self.entries
            .iter()
            .find(|entry| entry.identity.email == email)
            .map(|entry| entry.identity.clone())
    }

    /// Verify an email/secret pair; both must match exactly.
    #[must_use]
    pub fn verify(&self, email: &str, secret: &SecretString) -> Option<Identity> {
        self.entries
            .iter()
            .find(|entry| entry.identity.email == email && entry.matches(secret))
            .map(|entry| entry.identity.clone())
    }
}

/// Fixed demo email/password pair, discoverable by role for one-click login.
#[derive(Clone, Copy, Debug)]
pub struct DemoCredential {
    pub email: &'static str,
    pub password: &'static str,
}

const DEMO_PASSWORD: &str = "password123";

/// The demo login pair for a role. Every role has exactly one.
#[must_use]
pub const fn demo_credentials(role: Role) -> DemoCredential {
    let email = match role {
        Role::Standard => "user@example.com",
        Role::Nutritionist => "nutritionist@example.com",
        Role::Admin => "admin@example.com",
    };
    DemoCredential {
        email,
        password: DEMO_PASSWORD,
    }
}

fn demo_identities() -> Vec<(Identity, &'static str)> {
    vec![
        (
            Identity {
                id: Uuid::from_u128(1),
                email: "user@example.com".to_string(),
                display_name: "Alex Johnson".to_string(),
                role: Role::Standard,
                avatar: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=Alex".to_string()),
                age: Some(28),
                gender: Some("Male".to_string()),
                height_cm: Some(180),
                weight_kg: Some(75),
            },
            DEMO_PASSWORD,
        ),
        (
            Identity {
                id: Uuid::from_u128(2),
                email: "nutritionist@example.com".to_string(),
                display_name: "Dr. Sarah Williams".to_string(),
                role: Role::Nutritionist,
                avatar: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=Sarah".to_string()),
                age: None,
                gender: None,
                height_cm: None,
                weight_kg: None,
            },
            DEMO_PASSWORD,
        ),
        (
            Identity {
                id: Uuid::from_u128(3),
                email: "admin@example.com".to_string(),
                display_name: "Admin User".to_string(),
                role: Role::Admin,
                avatar: Some("https://api.dicebear.com/7.x/avataaars/svg?seed=Admin".to_string()),
                age: None,
                gender: None,
                height_cm: None,
                weight_kg: None,
            },
            DEMO_PASSWORD,
        ),
    ]
}
