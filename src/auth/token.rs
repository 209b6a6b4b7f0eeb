//! Opaque session token issuance.

use anyhow::{Context, Result};
use base64::Engine;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use super::types::unix_now;

/// An opaque session token.
///
/// The value is 32 random bytes, URL-safe base64 without padding. Callers
/// must not depend on its structure; the issue timestamp is carried so an
/// expiry policy could be added without changing the contract.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    value: String,
    issued_at_unix: i64,
}

impl Token {
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn issued_at_unix(&self) -> i64 {
        self.issued_at_unix
    }

    /// Short digest safe to include in logs; raw values never appear there.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.value.as_bytes());
        hasher
            .finalize()
            .iter()
            .take(4)
            .map(|byte| format!("{byte:02x}"))
            .collect()
    }
}

/// Produces unguessable session tokens bound to an identity by the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokenIssuer;

impl TokenIssuer {
    /// Issue a fresh opaque token for the given identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the operating system RNG fails.
    pub fn issue(&self, identity_id: Uuid) -> Result<Token> {
        let mut bytes = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut bytes)
            .context("failed to generate session token")?;
        let token = Token {
            value: base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes),
            issued_at_unix: unix_now(),
        };
        debug!(identity_id = %identity_id, token = %token.fingerprint(), "issued session token");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    #[test]
    fn issued_tokens_decode_to_32_random_bytes() -> Result<()> {
        let issuer = TokenIssuer;
        let token = issuer.issue(Uuid::from_u128(1))?;
        let decoded = URL_SAFE_NO_PAD.decode(token.value().as_bytes())?;
        assert_eq!(decoded.len(), 32);
        assert!(token.issued_at_unix() > 0);
        Ok(())
    }

    #[test]
    fn issued_tokens_are_distinct() -> Result<()> {
        let issuer = TokenIssuer;
        let first = issuer.issue(Uuid::from_u128(1))?;
        let second = issuer.issue(Uuid::from_u128(1))?;
        assert_ne!(first.value(), second.value());
        Ok(())
    }

    #[test]
    fn fingerprint_is_stable_and_short() -> Result<()> {
        let issuer = TokenIssuer;
        let token = issuer.issue(Uuid::from_u128(2))?;
        assert_eq!(token.fingerprint(), token.fingerprint());
        assert_eq!(token.fingerprint().len(), 8);
        assert_ne!(token.fingerprint(), token.value());
        Ok(())
    }

    #[test]
    fn token_round_trips_through_serde() -> Result<()> {
        let issuer = TokenIssuer;
        let token = issuer.issue(Uuid::from_u128(3))?;
        let raw = serde_json::to_string(&token)?;
        let decoded: Token = serde_json::from_str(&raw)?;
        assert_eq!(decoded, token);
        Ok(())
    }
}
