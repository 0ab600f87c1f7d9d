// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer-token authentication for the Orders API.
//!
//! ## Auth Flow
//!
//! 1. Client sends `Authorization: Bearer <JWT>`
//! 2. `require_auth` middleware:
//!    - Rejects anything not using the `Bearer` scheme
//!    - Requires an HMAC algorithm (HS256/HS384/HS512)
//!    - Verifies signature against `ACCESS_TOKEN_SECRET` and checks `exp`
//!    - Extracts `sub` → canonical `user_id`
//! 3. Handlers read the caller through the `Auth` extractor
//!
//! ## Security
//!
//! - All order endpoints require authentication
//! - Failures are terminal (401) and never reach the store
//! - Clock skew tolerance defaults to 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod token;

pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::Auth;
pub use middleware::{require_auth, TokenVerifier};
