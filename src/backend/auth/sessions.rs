/**
 * Session Management and JWT Tokens
 *
 * Stateless HS256 session tokens. A token names the account's email in
 * `sub` and expires after the configured lifetime.
 *
 * # Secret Rotation
 *
 * New tokens are always signed with the current secret. Verification tries
 * the current secret first, then each retired secret from
 * `JWT_PREVIOUS_SECRETS`, so rotating the secret does not log anyone out
 * until the retired one is dropped from configuration.
 */

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::shared::AppConfig;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account email
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Token issuing failures
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error("system clock is before the Unix epoch")]
    Clock,
    #[error("token lifetime overflows the expiry timestamp")]
    Expiry,
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct TokenService {
    signing_key: EncodingKey,
    /// Current secret first, then retired ones
    verification_keys: Vec<DecodingKey>,
    ttl: Duration,
    validation: Validation,
}

impl TokenService {
    /// # Arguments
    /// * `secret` - current signing secret
    /// * `previous` - retired secrets still accepted for verification
    /// * `ttl` - lifetime of issued tokens
    pub fn new(secret: &str, previous: &[String], ttl: Duration) -> Self {
        let verification_keys = std::iter::once(secret)
            .chain(previous.iter().map(String::as_str))
            .map(|s| DecodingKey::from_secret(s.as_bytes()))
            .collect();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            signing_key: EncodingKey::from_secret(secret.as_bytes()),
            verification_keys,
            ttl,
            validation,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.jwt_secret, &config.previous_jwt_secrets, config.token_ttl)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Create a token for `email`
    pub fn issue_token(&self, email: &str) -> Result<String, TokenError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| TokenError::Clock)?
            .as_secs();

        let exp = now.checked_add(self.ttl.as_secs()).ok_or(TokenError::Expiry)?;

        self.sign(&Claims {
            sub: email.to_string(),
            iat: now,
            exp,
        })
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.signing_key)?)
    }

    /// Verify a token and return the email it names
    ///
    /// Returns `None` for anything that is not a well-formed, unexpired token
    /// signed by a known secret. Never fails otherwise.
    pub fn verify_token(&self, token: &str) -> Option<String> {
        for key in &self.verification_keys {
            match decode::<Claims>(token, key, &self.validation) {
                Ok(data) if !data.claims.sub.is_empty() => return Some(data.claims.sub),
                Ok(_) => return None,
                Err(e) if matches!(e.kind(), ErrorKind::InvalidSignature) => continue,
                Err(e) => {
                    tracing::debug!("Token rejected: {:?}", e.kind());
                    return None;
                }
            }
        }
        tracing::debug!("Token rejected: signature matches no configured secret");
        None
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("verification_keys", &self.verification_keys.len())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
