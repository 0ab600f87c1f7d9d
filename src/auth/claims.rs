// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use serde::Deserialize;
use uuid::Uuid;

use super::AuthError;

/// Claims read from an incoming access token.
///
/// `sub` is kept loosely typed so that a non-string subject can be reported
/// as a claims error instead of a decoding error.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Subject (caller's user ID)
    #[serde(default)]
    pub sub: Option<serde_json::Value>,

    /// Expiration timestamp
    pub exp: u64,

    /// Issued at timestamp
    #[serde(default)]
    pub iat: Option<u64>,
}

/// Authenticated caller extracted from a verified token.
///
/// This is the single identity value bound into request extensions by the
/// auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Caller's user ID (`sub` claim)
    pub user_id: String,
}

impl AuthenticatedUser {
    /// Create from verified claims.
    pub fn from_claims(claims: TokenClaims) -> Result<Self, AuthError> {
        let user_id = match claims.sub {
            Some(serde_json::Value::String(sub)) => sub,
            _ => return Err(AuthError::MissingSubjectClaim),
        };

        Ok(Self { user_id })
    }

    /// The caller's ID as a UUID, if it is one.
    pub fn user_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.user_id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims(sub: Option<serde_json::Value>) -> TokenClaims {
        TokenClaims {
            sub,
            exp: 1_700_003_600,
            iat: Some(1_700_000_000),
        }
    }

    #[test]
    fn from_claims_extracts_user_id() {
        let claims = sample_claims(Some("user_123".into()));
        let user = AuthenticatedUser::from_claims(claims).unwrap();
        assert_eq!(user.user_id, "user_123");
    }

    #[test]
    fn from_claims_rejects_missing_subject() {
        let result = AuthenticatedUser::from_claims(sample_claims(None));
        assert_eq!(result, Err(AuthError::MissingSubjectClaim));
    }

    #[test]
    fn from_claims_rejects_non_string_subject() {
        let result = AuthenticatedUser::from_claims(sample_claims(Some(42.into())));
        assert_eq!(result, Err(AuthError::MissingSubjectClaim));
    }

    #[test]
    fn user_uuid_parses_only_valid_ids() {
        let user = AuthenticatedUser {
            user_id: "123e4567-e89b-12d3-a456-426614174000".to_string(),
        };
        assert!(user.user_uuid().is_some());

        let user = AuthenticatedUser {
            user_id: "user_123".to_string(),
        };
        assert!(user.user_uuid().is_none());
    }
}
