// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Order repository contract.
//!
//! Implemented by [`PgOrderRepository`](super::PgOrderRepository) for
//! production and [`InMemoryOrderRepository`](super::InMemoryOrderRepository)
//! for tests and local runs.

use async_trait::async_trait;
use uuid::Uuid;

use super::StoreResult;
use crate::models::{Order, OrderRequest};

/// Fixed number of orders per page.
pub const PAGE_SIZE: u32 = 20;

/// Row offset for a 1-based page number.
///
/// Page 0 is treated as page 1.
pub fn page_offset(page: u32) -> i64 {
    i64::from(PAGE_SIZE) * i64::from(page.saturating_sub(1))
}

/// Data access for orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// List one page of orders owned by `owner_id`.
    ///
    /// Ownership filtering is done by the store, never by the caller.
    async fn list_orders(&self, page: u32, owner_id: Uuid) -> StoreResult<Vec<Order>>;

    /// Fetch a single order. `None` means no such order.
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Order>>;

    /// Create an order and its line items atomically, returning the new id.
    async fn create(&self, request: &OrderRequest) -> StoreResult<Uuid>;

    /// Set the status of an order and return the re-fetched entity.
    async fn update_status(&self, id: Uuid, status: i32) -> StoreResult<Option<Order>>;
}
