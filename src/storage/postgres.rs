// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! PostgreSQL order store.
//!
//! Every operation is a parameterized call to a stored routine:
//!
//! | Operation | Routine |
//! |-----------|---------|
//! | list | `get_user_orders(owner, offset, limit)` |
//! | get | `get_order(id)` |
//! | create | `orders_insert(owner, total, status, details[], INOUT id)` |
//! | update status | `orders_update_status(id, status)` |
//!
//! Connections come from the pool and go back to it when the borrowing
//! future completes, fails, or is dropped.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions, PgRow},
    query, query_as, FromRow, PgPool, Postgres, Row,
};
use uuid::Uuid;

use super::{page_offset, OrderRepository, StoreResult, PAGE_SIZE};
use crate::models::{Order, OrderDetailRequest, OrderRequest};

const LIST_ORDERS_SQL: &str = "SELECT * FROM get_user_orders($1, $2, $3)";
const GET_ORDER_SQL: &str = "SELECT * FROM get_order($1)";
const INSERT_ORDER_SQL: &str = "CALL orders_insert($1, $2, $3, $4::order_detail_type[], $5)";
const UPDATE_STATUS_SQL: &str = "CALL orders_update_status($1, $2)";
const PING_SQL: &str = "SELECT 1";

/// Line item in the shape of the `order_detail_type` composite.
///
/// The derive also provides the `order_detail_type[]` array mapping.
#[derive(Debug, Clone, PartialEq, sqlx::Type)]
#[sqlx(type_name = "order_detail_type")]
struct OrderDetailRecord {
    product_id: String,
    quantity: i32,
    unit_price: f64,
}

impl From<&OrderDetailRequest> for OrderDetailRecord {
    fn from(detail: &OrderDetailRequest) -> Self {
        Self {
            product_id: detail.product_id.clone(),
            quantity: detail.quantity,
            unit_price: detail.unit_price,
        }
    }
}

/// Open a connection pool.
pub async fn connect(
    options: PgConnectOptions,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await
}

/// `(offset, limit)` for a page, as `INT` parameters.
///
/// `None` when the offset does not fit; no stored row can be that far in.
fn page_window(page: u32) -> Option<(i32, i32)> {
    let offset = i32::try_from(page_offset(page)).ok()?;
    let limit = i32::try_from(PAGE_SIZE).ok()?;
    Some((offset, limit))
}

/// Order repository backed by PostgreSQL stored routines.
#[derive(Debug, Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Round-trip a trivial query; used by the readiness probe.
    pub async fn ping(&self) -> StoreResult<()> {
        query(PING_SQL).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn list_orders(&self, page: u32, owner_id: Uuid) -> StoreResult<Vec<Order>> {
        let Some((offset, limit)) = page_window(page) else {
            return Ok(Vec::new());
        };

        let orders = query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(owner_id)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Order>> {
        let order = query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    async fn create(&self, request: &OrderRequest) -> StoreResult<Uuid> {
        let new_id = Uuid::new_v4();
        let details: Vec<OrderDetailRecord> =
            request.order_details.iter().map(Into::into).collect();

        query(INSERT_ORDER_SQL)
            .bind(request.user_id)
            .bind(request.total_price)
            .bind(request.status)
            .bind(details)
            .bind(new_id)
            .execute(&self.pool)
            .await?;

        tracing::info!(order_id = %new_id, user_id = %request.user_id, "Order created");
        Ok(new_id)
    }

    async fn update_status(&self, id: Uuid, status: i32) -> StoreResult<Option<Order>> {
        query(UPDATE_STATUS_SQL)
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        self.get_by_id(id).await
    }
}

/// Positional mapping: id, user id, total price, status, created at, updated at.
impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get(0)?,
            user_id: row.try_get(1)?,
            total_price: row.try_get(2)?,
            status: row.try_get(3)?,
            created_at: row.try_get(4)?,
            updated_at: row.try_get(5)?,
        })
    }
}
