// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Store error type.

/// Error type for order store operations.
///
/// Store errors are never retried or reclassified by the layers above; the
/// API maps them to 500.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query, decode, or connection failure reported by the database driver
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// Failure reported by a non-SQL backend
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
