//! services/api/src/adapters/token.rs
//!
//! Stateless session tokens signed with HMAC-SHA256. Implements the
//! `TokenService` port from the `core` crate.
//!
//! ## Token Format
//!
//! `hex(claims_json) + "." + hex(hmac_sha256(secret, claims_json))`
//!
//! where the claims are `{"username": ..., "exp": <unix seconds>}`. Nothing is
//! stored on the server; every request re-checks the signature and the expiry.

use bookstore_core::domain::SessionClaims;
use bookstore_core::ports::{PortError, PortResult, TokenService};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Serialize, Deserialize)]
struct TokenPayload {
    username: String,
    exp: i64,
}

/// Issues and verifies session tokens with a single shared secret.
#[derive(Clone)]
pub struct HmacTokenAdapter {
    secret: Vec<u8>,
    ttl: Duration,
}

impl HmacTokenAdapter {
    /// Creates a new adapter. `ttl` is the lifetime of every issued token.
    pub fn new(secret: impl Into<Vec<u8>>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    /// Issues a token as if the current time were `now`.
    pub fn issue_at(&self, username: &str, now: DateTime<Utc>) -> PortResult<String> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| PortError::Unexpected("token expiry overflows".to_string()))?;
        let payload = TokenPayload {
            username: username.to_string(),
            exp: expires_at.timestamp(),
        };
        let claims_json =
            serde_json::to_vec(&payload).map_err(|e| PortError::Unexpected(e.to_string()))?;

        let mut mac = self.mac()?;
        mac.update(&claims_json);
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            hex::encode(&claims_json),
            hex::encode(signature)
        ))
    }

    /// Verifies a token as if the current time were `now`.
    pub fn verify_at(&self, token: Option<&str>, now: DateTime<Utc>) -> PortResult<SessionClaims> {
        let token = match token.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return Err(PortError::MissingToken),
        };

        let (claims_hex, signature_hex) = token
            .split_once('.')
            .ok_or_else(|| PortError::InvalidToken("malformed token".to_string()))?;
        let claims_json = hex::decode(claims_hex)
            .map_err(|_| PortError::InvalidToken("malformed claims".to_string()))?;
        let signature = hex::decode(signature_hex)
            .map_err(|_| PortError::InvalidToken("malformed signature".to_string()))?;

        // Constant-time comparison.
        let mut mac = self.mac()?;
        mac.update(&claims_json);
        mac.verify_slice(&signature)
            .map_err(|_| PortError::InvalidToken("signature mismatch".to_string()))?;

        let payload: TokenPayload = serde_json::from_slice(&claims_json)
            .map_err(|_| PortError::InvalidToken("unreadable claims".to_string()))?;
        let expires_at = DateTime::<Utc>::from_timestamp(payload.exp, 0)
            .ok_or_else(|| PortError::InvalidToken("expiry out of range".to_string()))?;

        if now >= expires_at {
            return Err(PortError::InvalidToken("token expired".to_string()));
        }

        Ok(SessionClaims {
            username: payload.username,
            expires_at,
        })
    }

    fn mac(&self) -> PortResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret).map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

impl TokenService for HmacTokenAdapter {
    fn issue(&self, username: &str) -> PortResult<String> {
        self.issue_at(username, Utc::now())
    }

    fn verify(&self, token: Option<&str>) -> PortResult<SessionClaims> {
        self.verify_at(token, Utc::now())
    }
}
