//! Access token claims.
//!
//! The backend issues HS256 JWTs whose payload carries the user identity
//! (`userName`, `userType`, `nicNo`). The payload is decoded without
//! verification: the server verifies the token on every request, the client
//! only needs to know who is logged in.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("Invalid JWT format")]
    Format,
    #[error("Failed to decode JWT payload: {0}")]
    Encoding(String),
    #[error("Failed to parse JWT payload: {0}")]
    Payload(String),
}

/// Account type of the logged-in user.
///
/// Matches the backend's `userType`: `'PARENT' | 'DOCTOR'`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Parent,
    Doctor,
}

impl Role {
    /// Parse the backend's `userType` string. Unknown types yield `None`.
    pub fn parse(user_type: &str) -> Option<Self> {
        match user_type {
            "PARENT" => Some(Role::Parent),
            "DOCTOR" => Some(Role::Doctor),
            _ => None,
        }
    }
}

/// Decoded access token payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub sub: Option<String>,
    pub user_name: Option<String>,
    pub user_type: Option<String>,
    pub nic_no: Option<String>,
    pub iat: Option<u64>,
    pub exp: Option<u64>,
}

impl SessionClaims {
    /// Decode the payload (second segment) of a JWT.
    pub fn decode(token: &str) -> Result<Self, ClaimsError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(ClaimsError::Format);
        }

        // base64url, padding optional
        let payload = parts[1].trim_end_matches('=');
        let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| ClaimsError::Encoding(e.to_string()))?;

        serde_json::from_slice(&decoded).map_err(|e| ClaimsError::Payload(e.to_string()))
    }

    pub fn role(&self) -> Option<Role> {
        self.user_type.as_deref().and_then(Role::parse)
    }

    /// Whether `exp` lies at or before `now` (Unix seconds). Tokens without
    /// `exp` never expire locally.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }

    pub fn is_expired(&self) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        self.is_expired_at(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token(payload: &str) -> String {
        let header = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(b"{\"alg\":\"HS256\",\"typ\":\"JWT\"}");
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(payload);
        format!("{}.{}.fake-signature", header, payload)
    }

    #[test]
    fn test_decode_parent_claims() {
        let token = make_token(
            r#"{"sub":"123456789","userName":"Supipi","userType":"PARENT","nicNo":"123456789","iat":1733488290,"exp":1733488890}"#,
        );

        let claims = SessionClaims::decode(&token).unwrap();
        assert_eq!(claims.user_name.as_deref(), Some("Supipi"));
        assert_eq!(claims.nic_no.as_deref(), Some("123456789"));
        assert_eq!(claims.role(), Some(Role::Parent));
        assert_eq!(claims.exp, Some(1733488890));
    }

    #[test]
    fn test_decode_padded_payload() {
        let header = "eyJhbGciOiJIUzI1NiJ9";
        let payload =
            base64::engine::general_purpose::URL_SAFE.encode(b"{\"userType\":\"DOCTOR\"} ");
        assert!(payload.ends_with('='));
        let token = format!("{}.{}.sig", header, payload);

        let claims = SessionClaims::decode(&token).unwrap();
        assert_eq!(claims.role(), Some(Role::Doctor));
    }

    #[test]
    fn test_decode_invalid_jwt() {
        assert!(matches!(
            SessionClaims::decode("not-a-jwt"),
            Err(ClaimsError::Format)
        ));
    }

    #[test]
    fn test_decode_garbage_payload() {
        let token = make_token("not json");
        assert!(matches!(
            SessionClaims::decode(&token),
            Err(ClaimsError::Payload(_))
        ));
    }

    #[test]
    fn test_unknown_role() {
        let token = make_token(r#"{"userType":"NURSE"}"#);
        let claims = SessionClaims::decode(&token).unwrap();
        assert_eq!(claims.role(), None);
    }

    #[test]
    fn test_expiry() {
        let token = make_token(r#"{"exp":1000}"#);
        let claims = SessionClaims::decode(&token).unwrap();
        assert!(!claims.is_expired_at(999));
        assert!(claims.is_expired_at(1000));

        let token = make_token(r#"{"sub":"x"}"#);
        let claims = SessionClaims::decode(&token).unwrap();
        assert!(!claims.is_expired_at(u64::MAX));
    }
}
