// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Order Storage Module
//!
//! Data access for orders behind the [`OrderRepository`] trait.
//!
//! ## Implementations
//!
//! - [`PgOrderRepository`] - PostgreSQL stored routines (production)
//! - [`InMemoryOrderRepository`] - per-instance map (tests, local runs)
//!
//! ## Stored Routines
//!
//! The schema and routines the PostgreSQL store expects live in
//! `migrations/`. Their signatures are fixed; this crate never issues ad-hoc
//! table queries.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryOrderRepository;
pub use postgres::PgOrderRepository;
#[cfg(test)]
pub use repository::MockOrderRepository;
pub use repository::{page_offset, OrderRepository, PAGE_SIZE};
