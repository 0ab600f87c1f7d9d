// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Order use case.
//!
//! Sits between the HTTP handlers and the repository. Apart from forwarding
//! calls it enforces the order invariants:
//!
//! - pages are 1-based
//! - status codes must be a known [`OrderStatus`]
//! - callers only see and modify their own orders (a foreign order is
//!   reported as not found)
//! - orders can only be created for the caller

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    models::{Order, OrderRequest, OrderStatus},
    storage::{OrderRepository, StoreError},
};

/// Error type for order use case operations.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// Input violates an order invariant
    #[error("{0}")]
    Validation(String),
    /// No order with that id is visible to the caller
    #[error("Order not found")]
    NotFound,
    /// Caller may not act on behalf of another user
    #[error("{0}")]
    Forbidden(String),
    /// Underlying store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Application service for orders.
#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    /// One page of the caller's orders.
    pub async fn get_orders(&self, page: u32, owner_id: Uuid) -> Result<Vec<Order>, OrderError> {
        if page == 0 {
            return Err(OrderError::Validation("Invalid page number".into()));
        }
        Ok(self.repo.list_orders(page, owner_id).await?)
    }

    /// A single order, if it exists and belongs to `owner_id`.
    pub async fn get_by_id(&self, owner_id: Uuid, id: Uuid) -> Result<Order, OrderError> {
        self.repo
            .get_by_id(id)
            .await?
            .filter(|order| order.user_id == owner_id)
            .ok_or(OrderError::NotFound)
    }

    /// Create an order for `owner_id`, returning its id.
    pub async fn create(&self, owner_id: Uuid, request: &OrderRequest) -> Result<Uuid, OrderError> {
        if request.user_id != owner_id {
            return Err(OrderError::Forbidden(
                "Orders can only be created for the authenticated user".into(),
            ));
        }
        validate_status(request.status)?;
        if !request.total_price.is_finite() || request.total_price < 0.0 {
            return Err(OrderError::Validation("Invalid total price".into()));
        }
        if request.order_details.iter().any(|d| d.quantity <= 0) {
            return Err(OrderError::Validation("Invalid quantity".into()));
        }

        Ok(self.repo.create(request).await?)
    }

    /// Change the status of one of the caller's orders.
    pub async fn update_status(
        &self,
        owner_id: Uuid,
        id: Uuid,
        status: i32,
    ) -> Result<Order, OrderError> {
        validate_status(status)?;

        // Ownership check before the write.
        self.get_by_id(owner_id, id).await?;

        self.repo
            .update_status(id, status)
            .await?
            .ok_or(OrderError::NotFound)
    }
}

fn validate_status(status: i32) -> Result<OrderStatus, OrderError> {
    OrderStatus::from_code(status).ok_or_else(|| OrderError::Validation("Invalid status".into()))
}
