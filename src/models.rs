// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Order Data Models
//!
//! Domain types shared by the HTTP layer, the use case and the repositories.
//! All types derive `Serialize`, `Deserialize`, and `ToSchema` for JSON
//! handling and OpenAPI documentation.
//!
//! ## Naming
//!
//! Identifiers are always `id` and `user_id` (snake_case in JSON), and UUIDs
//! travel as hyphenated strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle status of an order, stored as a positive integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order was placed (code 1)
    Created,
    /// Order is being prepared (code 2)
    Processing,
    /// Order was fulfilled (code 3)
    Completed,
    /// Order was cancelled (code 4)
    Cancelled,
}

impl OrderStatus {
    /// Integer code used by the store.
    pub fn code(self) -> i32 {
        match self {
            OrderStatus::Created => 1,
            OrderStatus::Processing => 2,
            OrderStatus::Completed => 3,
            OrderStatus::Cancelled => 4,
        }
    }

    /// Map a store code back to a status. Unknown codes yield `None`.
    pub fn from_code(code: i32) -> Option<OrderStatus> {
        match code {
            1 => Some(OrderStatus::Created),
            2 => Some(OrderStatus::Processing),
            3 => Some(OrderStatus::Completed),
            4 => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Created => write!(f, "created"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// =============================================================================
// Order Models
// =============================================================================

/// A stored order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: Uuid,
    /// The user who owns this order.
    pub user_id: Uuid,
    /// Total price of the order.
    pub total_price: f64,
    /// Status code (1 created, 2 processing, 3 completed, 4 cancelled).
    pub status: i32,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A line item belonging to an order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct OrderDetail {
    /// Unique line item identifier.
    pub id: Uuid,
    /// Parent order.
    pub order_id: Uuid,
    /// External product identifier (not validated by this service).
    pub product_id: String,
    /// Number of units ordered.
    pub quantity: i32,
    /// Price of a single unit.
    pub unit_price: f64,
    /// Line total (`quantity * unit_price`).
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Line item as submitted by a client, before it has an id or timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct OrderDetailRequest {
    /// External product identifier.
    #[schema(example = "1")]
    pub product_id: String,
    /// Number of units ordered.
    #[schema(example = 2)]
    pub quantity: i32,
    /// Price of a single unit.
    #[serde(default)]
    pub unit_price: f64,
}

impl OrderDetailRequest {
    /// Computed line total.
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// Request to create a new order together with its line items.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct OrderRequest {
    /// Owning user. Must match the authenticated caller; any other user id
    /// is rejected with 403 Forbidden.
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub user_id: Uuid,
    /// Total price of the order.
    pub total_price: f64,
    /// Initial status code.
    pub status: i32,
    /// Line items, in submission order.
    #[serde(default)]
    pub order_details: Vec<OrderDetailRequest>,
}

/// Request body for a status update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// New status code.
    #[schema(example = 2)]
    pub status: i32,
}
