// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token verification and the authentication middleware.
//!
//! The middleware is applied to the whole order router subtree:
//!
//! ```rust,ignore
//! let orders = Router::new()
//!     .route("/order", get(list_orders))
//!     .layer(axum::middleware::from_fn_with_state(
//!         verifier.clone(),
//!         require_auth,
//!     ));
//! ```
//!
//! On success the [`AuthenticatedUser`] is inserted into the request
//! extensions, where the [`Auth`](super::Auth) extractor picks it up.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

use super::{claims::TokenClaims, AuthError, AuthenticatedUser};

/// Default clock skew tolerance (60 seconds).
pub const DEFAULT_LEEWAY_SECS: u64 = 60;

const BEARER_PREFIX: &str = "Bearer ";

/// Stateless verifier for HMAC-signed bearer tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    leeway: u64,
}

impl TokenVerifier {
    /// Create a verifier for tokens signed with `secret`.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            leeway: DEFAULT_LEEWAY_SECS,
        }
    }

    /// Set the clock skew tolerance applied to `exp`.
    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }

    /// Verify a raw `Authorization` header value and extract the caller.
    pub fn verify(&self, authorization: Option<&str>) -> Result<AuthenticatedUser, AuthError> {
        let token = authorization
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let header = decode_header(token).map_err(|_| AuthError::InvalidOrExpiredToken)?;
        if !is_hmac(header.alg) {
            return Err(AuthError::InvalidSignature);
        }

        let mut validation = Validation::new(header.alg);
        validation.leeway = self.leeway;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::InvalidOrExpiredToken)?;

        AuthenticatedUser::from_claims(token_data.claims)
    }
}

fn is_hmac(algorithm: Algorithm) -> bool {
    matches!(
        algorithm,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    )
}

/// Authentication middleware function.
pub async fn require_auth(
    State(verifier): State<TokenVerifier>,
    mut request: Request,
    next: Next,
) -> Response {
    // A header that is not visible ASCII cannot carry a bearer token.
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match verifier.verify(authorization) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(
                error_code = e.error_code(),
                path = %request.uri().path(),
                "Rejected unauthenticated request"
            );
            e.into_response()
        }
    }
}
