// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access token minting.
//!
//! Tokens are normally issued by the identity service; this is used by the
//! `mint-token` binary and by tests.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct IssuedClaims<'a> {
    sub: &'a str,
    exp: i64,
    iat: i64,
}

/// Sign an HS256 token for `user_id` that expires `ttl_secs` from now.
pub fn issue_token(
    user_id: &str,
    secret: &[u8],
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();
    let claims = IssuedClaims {
        sub: user_id,
        exp: now + ttl_secs,
        iat: now,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::decode_header;

    #[test]
    fn issued_token_uses_hs256() {
        let token = issue_token("user_123", b"secret", 60).unwrap();
        let header = decode_header(&token).unwrap();
        assert_eq!(header.alg, jsonwebtoken::Algorithm::HS256);
        assert_eq!(token.split('.').count(), 3);
    }
}
