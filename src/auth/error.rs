// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
///
/// Every variant is terminal for the request: the pipeline stops and the
/// caller receives a 401 with the failure envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No authorization header, or it does not use the `Bearer` scheme
    MissingToken,
    /// Token was not signed with an HMAC algorithm
    InvalidSignature,
    /// Signature check failed, the token is malformed, or `exp` has passed
    InvalidOrExpiredToken,
    /// The `sub` claim is absent or not a string
    MissingSubjectClaim,
    /// A handler ran without an identity bound by the middleware
    MissingIdentity,
}

#[derive(Serialize)]
struct AuthErrorBody {
    status: &'static str,
    msg: String,
    error_code: &'static str,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::InvalidOrExpiredToken => "invalid_or_expired_token",
            AuthError::MissingSubjectClaim => "missing_subject_claim",
            AuthError::MissingIdentity => "missing_identity",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "Authorization token required"),
            AuthError::InvalidSignature => write!(f, "Unexpected token signing method"),
            AuthError::InvalidOrExpiredToken => write!(f, "Invalid or expired token"),
            AuthError::MissingSubjectClaim => write!(f, "Invalid token claims"),
            AuthError::MissingIdentity => write!(f, "User ID not found in token"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            status: "failed",
            msg: self.to_string(),
            error_code: self.error_code(),
        });
        (status, body).into_response()
    }
}
