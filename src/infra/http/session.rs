//! Signed session cookies for the admin panel.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use time::OffsetDateTime;

type HmacSha256 = Hmac<Sha256>;

/// Cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "tinta_session";

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("session token is malformed")]
    Malformed,
    #[error("session token signature mismatch")]
    Signature,
    #[error("session token has expired")]
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: i64,
    pub issued_at: i64,
}

/// Issues and verifies HMAC-SHA256 signed session tokens.
///
/// Token layout: `base64url(claims-json) "." base64url(mac)`. Verification
/// uses the MAC implementation's constant-time comparison.
pub struct SessionSigner {
    key: Vec<u8>,
    ttl: Duration,
}

impl SessionSigner {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: i64, now: OffsetDateTime) -> String {
        let claims = SessionClaims {
            user_id,
            issued_at: now.unix_timestamp(),
        };
        // SessionClaims serialization cannot fail: two integer fields.
        let payload =
            serde_json::to_vec(&claims).expect("session claims serialize to JSON");

        let encoded_payload = URL_SAFE_NO_PAD.encode(&payload);
        let mac = self.mac(encoded_payload.as_bytes());
        let encoded_mac = URL_SAFE_NO_PAD.encode(mac);

        format!("{encoded_payload}.{encoded_mac}")
    }

    pub fn verify(&self, token: &str, now: OffsetDateTime) -> Result<SessionClaims, SessionError> {
        let (encoded_payload, encoded_mac) =
            token.split_once('.').ok_or(SessionError::Malformed)?;

        let mac_bytes = URL_SAFE_NO_PAD
            .decode(encoded_mac)
            .map_err(|_| SessionError::Malformed)?;

        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(encoded_payload.as_bytes());
        mac.verify_slice(&mac_bytes)
            .map_err(|_| SessionError::Signature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(encoded_payload)
            .map_err(|_| SessionError::Malformed)?;
        let claims: SessionClaims =
            serde_json::from_slice(&payload).map_err(|_| SessionError::Malformed)?;

        let age = now.unix_timestamp().saturating_sub(claims.issued_at);
        if age < 0 || age as u64 > self.ttl.as_secs() {
            return Err(SessionError::Expired);
        }

        Ok(claims)
    }

    fn mac(&self, data: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length");
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn signer() -> SessionSigner {
        SessionSigner::new("unit-test-secret", Duration::from_secs(3600))
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let now = datetime!(2026-01-10 12:00 UTC);
        let token = signer().issue(42, now);
        let claims = signer().verify(&token, now).expect("valid token");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.issued_at, now.unix_timestamp());
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let now = datetime!(2026-01-10 12:00 UTC);
        let token = signer().issue(42, now);
        let (_, mac) = token.split_once('.').unwrap();
        let forged_payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&SessionClaims { user_id: 1, issued_at: now.unix_timestamp() }).unwrap());
        let forged = format!("{forged_payload}.{mac}");

        assert_eq!(
            signer().verify(&forged, now).unwrap_err(),
            SessionError::Signature
        );
    }

    #[test]
    fn wrong_key_is_rejected() {
        let now = datetime!(2026-01-10 12:00 UTC);
        let token = signer().issue(7, now);
        let other = SessionSigner::new("different-secret", Duration::from_secs(3600));
        assert_eq!(other.verify(&token, now).unwrap_err(), SessionError::Signature);
    }

    #[test]
    fn expired_token_is_rejected() {
        let issued = datetime!(2026-01-10 12:00 UTC);
        let token = signer().issue(7, issued);
        let later = issued + Duration::from_secs(3601);
        assert_eq!(
            signer().verify(&token, later).unwrap_err(),
            SessionError::Expired
        );
    }

    #[test]
    fn garbage_tokens_are_malformed() {
        let now = datetime!(2026-01-10 12:00 UTC);
        assert_eq!(
            signer().verify("no-separator", now).unwrap_err(),
            SessionError::Malformed
        );
        assert_eq!(
            signer().verify("", now).unwrap_err(),
            SessionError::Malformed
        );
    }
}
