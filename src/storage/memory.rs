// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory order store.
//!
//! Each instance owns its own map, so tests never share state. Orders are
//! listed newest first, like `get_user_orders`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{page_offset, OrderRepository, StoreError, StoreResult, PAGE_SIZE};
use crate::models::{Order, OrderDetail, OrderRequest};

#[derive(Debug, Default)]
struct Tables {
    orders: HashMap<Uuid, Order>,
    details: HashMap<Uuid, Vec<OrderDetail>>,
}

/// Order repository holding everything in process memory.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    tables: RwLock<Tables>,
    failure: Option<String>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every operation fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            tables: RwLock::default(),
            failure: Some(message.into()),
        }
    }

    /// Store an order as-is.
    pub async fn insert(&self, order: Order) {
        self.tables.write().await.orders.insert(order.id, order);
    }

    /// Line items stored for an order.
    pub async fn details_for(&self, order_id: Uuid) -> Vec<OrderDetail> {
        self.tables
            .read()
            .await
            .details
            .get(&order_id)
            .cloned()
            .unwrap_or_default()
    }

    fn check_available(&self) -> StoreResult<()> {
        match &self.failure {
            Some(message) => Err(StoreError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn list_orders(&self, page: u32, owner_id: Uuid) -> StoreResult<Vec<Order>> {
        self.check_available()?;

        let tables = self.tables.read().await;
        let mut owned: Vec<Order> = tables
            .orders
            .values()
            .filter(|order| order.user_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let offset = usize::try_from(page_offset(page)).unwrap_or(usize::MAX);
        Ok(owned
            .into_iter()
            .skip(offset)
            .take(PAGE_SIZE as usize)
            .collect())
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Order>> {
        self.check_available()?;
        Ok(self.tables.read().await.orders.get(&id).cloned())
    }

    async fn create(&self, request: &OrderRequest) -> StoreResult<Uuid> {
        self.check_available()?;

        let new_id = Uuid::new_v4();
        let now = Utc::now();
        let order = Order {
            id: new_id,
            user_id: request.user_id,
            total_price: request.total_price,
            status: request.status,
            created_at: now,
            updated_at: now,
        };
        let details = request
            .order_details
            .iter()
            .map(|detail| OrderDetail {
                id: Uuid::new_v4(),
                order_id: new_id,
                product_id: detail.product_id.clone(),
                quantity: detail.quantity,
                unit_price: detail.unit_price,
                total_price: detail.line_total(),
                created_at: now,
                updated_at: now,
            })
            .collect();

        // Single write guard: order and details land together.
        let mut tables = self.tables.write().await;
        tables.orders.insert(new_id, order);
        tables.details.insert(new_id, details);

        Ok(new_id)
    }

    async fn update_status(&self, id: Uuid, status: i32) -> StoreResult<Option<Order>> {
        self.check_available()?;

        let mut tables = self.tables.write().await;
        Ok(tables.orders.get_mut(&id).map(|order| {
            order.status = status;
            order.updated_at = Utc::now();
            order.clone()
        }))
    }
}
