// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Orders Service - Order Management Microservice
//!
//! REST API for creating, listing, reading and re-statusing orders. Every
//! order endpoint requires an HMAC-signed bearer token, and callers only see
//! their own orders. Persistence goes through PostgreSQL stored routines.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer token verification
//! - `usecase` - Order invariants and ownership checks
//! - `storage` - Repository trait, PostgreSQL and in-memory stores

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod shutdown;
pub mod state;
pub mod storage;
pub mod usecase;
