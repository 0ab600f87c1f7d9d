// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Order API endpoints.
//!
//! All routes sit behind [`require_auth`](crate::auth::require_auth). Every
//! response uses the `{status, data|id, msg}` envelope.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    auth::{Auth, AuthError, AuthenticatedUser},
    error::{ApiError, ErrorBody},
    models::{Order, OrderRequest, UpdateStatusRequest},
    state::AppState,
};

/// Success envelope carrying a payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DataEnvelope<T> {
    /// Always `success`.
    pub status: String,
    pub data: T,
    /// Always null on success.
    pub msg: Option<String>,
}

impl<T> DataEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data,
            msg: None,
        }
    }
}

/// Success envelope carrying the id of a created order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IdEnvelope {
    /// Always `success`.
    pub status: String,
    pub id: Uuid,
    /// Always null on success.
    pub msg: Option<String>,
}

/// Raw `page` query parameter; parsed by the handler so that bad input is
/// reported with the failure envelope.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

fn parse_page(raw: Option<&str>) -> Result<u32, ApiError> {
    raw.and_then(|page| page.trim().parse::<u32>().ok())
        .filter(|page| *page > 0)
        .ok_or_else(|| ApiError::bad_request("Invalid page number"))
}

fn parse_order_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request("Invalid order id"))
}

fn caller_id(user: &AuthenticatedUser) -> Result<Uuid, ApiError> {
    user.user_uuid()
        .ok_or_else(|| ApiError::bad_request("Invalid user id"))
}

/// List the caller's orders, one page at a time.
///
/// The owner is always taken from the token, never from the request.
#[utoipa::path(
    get,
    path = "/api/v1/order",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(
        ("page" = u32, Query, description = "1-based page number (20 orders per page)")
    ),
    responses(
        (status = 200, description = "Page of orders", body = DataEnvelope<Vec<Order>>),
        (status = 400, description = "Invalid page number or user id", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "No orders on this page", body = ErrorBody)
    )
)]
pub async fn list_orders(
    auth: Option<Auth>,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<DataEnvelope<Vec<Order>>>, ApiError> {
    let page = parse_page(query.page.as_deref())?;
    let Auth(user) = auth.ok_or(AuthError::MissingIdentity)?;
    let owner_id = caller_id(&user)?;

    let orders = state.orders.get_orders(page, owner_id).await?;
    if orders.is_empty() {
        return Err(ApiError::not_found("No orders found for this page"));
    }

    Ok(Json(DataEnvelope::success(orders)))
}

/// Get one of the caller's orders by id.
#[utoipa::path(
    get,
    path = "/api/v1/order/{id}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order", body = DataEnvelope<Order>),
        (status = 400, description = "Invalid order id", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody)
    )
)]
pub async fn get_order(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataEnvelope<Order>>, ApiError> {
    let id = parse_order_id(&id)?;
    let owner_id = caller_id(&user)?;

    let order = state.orders.get_by_id(owner_id, id).await?;
    Ok(Json(DataEnvelope::success(order)))
}

/// Create an order with its line items.
#[utoipa::path(
    post,
    path = "/api/v1/order",
    tag = "Orders",
    security(("bearer_auth" = [])),
    request_body = OrderRequest,
    responses(
        (status = 201, description = "Order created", body = IdEnvelope),
        (status = 400, description = "Invalid request body", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 403, description = "Order belongs to another user", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn create_order(
    Auth(user): Auth,
    State(state): State<AppState>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IdEnvelope>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let owner_id = caller_id(&user)?;

    let id = state.orders.create(owner_id, &request).await?;

    Ok((
        StatusCode::CREATED,
        Json(IdEnvelope {
            status: "success".to_string(),
            id,
            msg: None,
        }),
    ))
}

/// Update the status of one of the caller's orders.
#[utoipa::path(
    put,
    path = "/api/v1/order/{id}/status",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated order", body = DataEnvelope<Order>),
        (status = 400, description = "Invalid order id or status", body = ErrorBody),
        (status = 401, description = "Unauthorized", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn update_order_status(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<DataEnvelope<Order>>, ApiError> {
    let id = parse_order_id(&id)?;
    let Json(request) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    if request.status == 0 {
        return Err(ApiError::bad_request("status is required"));
    }
    let owner_id = caller_id(&user)?;

    let order = state.orders.update_status(owner_id, id, request.status).await?;
    Ok(Json(DataEnvelope::success(order)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::router,
        auth::{token::issue_token, TokenVerifier},
        storage::{InMemoryOrderRepository, MockOrderRepository},
    };
    use axum::{
        body::{to_bytes, Body},
        http::{header::AUTHORIZATION, header::CONTENT_TYPE, Request},
        Router,
    };
    use chrono::Utc;
    use std::sync::Arc;
    use tower::ServiceExt;

    const SECRET: &[u8] = b"test-secret";
    const USER: &str = "123e4567-e89b-12d3-a456-426614174000";

    fn user_id() -> Uuid {
        Uuid::parse_str(USER).unwrap()
    }

    fn token_for(user: &str) -> String {
        issue_token(user, SECRET, 3600).unwrap()
    }

    fn app_with(repo: Arc<dyn crate::storage::OrderRepository>) -> Router {
        router(AppState::new(repo, TokenVerifier::new(SECRET)))
    }

    fn test_app() -> (Router, Arc<InMemoryOrderRepository>) {
        let repo = Arc::new(InMemoryOrderRepository::new());
        (app_with(repo.clone()), repo)
    }

    fn stored_order(owner: Uuid) -> Order {
        Order {
            id: Uuid::new_v4(),
            user_id: owner,
            total_price: 100.0,
            status: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn send(
        app: Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[test]
    fn parse_page_accepts_positive_integers() {
        assert_eq!(parse_page(Some("1")).unwrap(), 1);
        assert_eq!(parse_page(Some("12")).unwrap(), 12);
        assert!(parse_page(Some("abc")).is_err());
        assert!(parse_page(Some("0")).is_err());
        assert!(parse_page(Some("-1")).is_err());
        assert!(parse_page(None).is_err());
    }

    #[tokio::test]
    async fn list_returns_callers_orders() {
        let (app, repo) = test_app();
        let order = stored_order(user_id());
        repo.insert(order.clone()).await;
        repo.insert(stored_order(Uuid::new_v4())).await;

        let (status, body) =
            send(app, "GET", "/api/v1/order?page=1", Some(&token_for(USER)), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
        assert!(body["msg"].is_null());
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], order.id.to_string());
        assert_eq!(data[0]["user_id"], USER);
    }

    #[tokio::test]
    async fn list_rejects_non_numeric_page() {
        let (app, _repo) = test_app();

        let (status, body) =
            send(app, "GET", "/api/v1/order?page=abc", Some(&token_for(USER)), None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "failed");
        assert_eq!(body["msg"], "Invalid page number");
    }

    #[tokio::test]
    async fn list_rejects_missing_page() {
        let (app, _repo) = test_app();

        let (status, _) = send(app, "GET", "/api/v1/order", Some(&token_for(USER)), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_rejects_non_uuid_identity() {
        let (app, _repo) = test_app();

        let (status, body) = send(
            app,
            "GET",
            "/api/v1/order?page=1",
            Some(&token_for("user_123")),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Invalid user id");
    }

    #[tokio::test]
    async fn list_empty_page_is_not_found() {
        let (app, _repo) = test_app();

        let (status, body) =
            send(app, "GET", "/api/v1/order?page=2", Some(&token_for(USER)), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "failed");
    }

    #[tokio::test]
    async fn create_then_get_returns_same_totals() {
        let (app, repo) = test_app();
        let token = token_for(USER);
        let payload = serde_json::json!({
            "user_id": USER,
            "total_price": 150,
            "status": 1,
            "order_details": [{"product_id": "1", "quantity": 2}]
        });

        let (status, body) =
            send(app.clone(), "POST", "/api/v1/order", Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "success");
        let id = body["id"].as_str().unwrap().to_string();
        assert!(!id.is_empty());

        let (status, body) =
            send(app, "GET", &format!("/api/v1/order/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_price"], 150.0);
        assert_eq!(body["data"]["status"], 1);
        assert_eq!(body["data"]["user_id"], USER);

        let details = repo.details_for(Uuid::parse_str(&id).unwrap()).await;
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].quantity, 2);
    }

    #[tokio::test]
    async fn create_rejects_malformed_body() {
        let (app, _repo) = test_app();

        let (status, body) = send(
            app,
            "POST",
            "/api/v1/order",
            Some(&token_for(USER)),
            Some(serde_json::json!({ "total_price": "lots" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "failed");
    }

    #[tokio::test]
    async fn create_for_another_user_is_forbidden() {
        let (app, _repo) = test_app();
        let payload = serde_json::json!({
            "user_id": Uuid::new_v4(),
            "total_price": 10,
            "status": 1,
            "order_details": []
        });

        let (status, _) =
            send(app, "POST", "/api/v1/order", Some(&token_for(USER)), Some(payload)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn create_store_failure_is_500() {
        let app = app_with(Arc::new(InMemoryOrderRepository::failing("connection reset")));
        let payload = serde_json::json!({
            "user_id": USER,
            "total_price": 10,
            "status": 1,
            "order_details": []
        });

        let (status, body) =
            send(app, "POST", "/api/v1/order", Some(&token_for(USER)), Some(payload)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["msg"], "Internal server error");
    }

    #[tokio::test]
    async fn get_unknown_order_is_not_found() {
        let (app, _repo) = test_app();

        let uri = format!("/api/v1/order/{}", Uuid::new_v4());
        let (status, body) = send(app, "GET", &uri, Some(&token_for(USER)), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["msg"], "Order not found");
    }

    #[tokio::test]
    async fn get_foreign_order_is_not_found() {
        let (app, repo) = test_app();
        let order = stored_order(Uuid::new_v4());
        repo.insert(order.clone()).await;

        let uri = format!("/api/v1/order/{}", order.id);
        let (status, _) = send(app, "GET", &uri, Some(&token_for(USER)), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn get_rejects_malformed_id() {
        let (app, _repo) = test_app();

        let (status, body) =
            send(app, "GET", "/api/v1/order/not-a-uuid", Some(&token_for(USER)), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "Invalid order id");
    }

    #[tokio::test]
    async fn update_status_reads_after_write() {
        let (app, repo) = test_app();
        let token = token_for(USER);
        let order = stored_order(user_id());
        repo.insert(order.clone()).await;

        let uri = format!("/api/v1/order/{}/status", order.id);
        let (status, body) = send(
            app.clone(),
            "PUT",
            &uri,
            Some(&token),
            Some(serde_json::json!({ "status": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], 3);

        let (_, body) =
            send(app, "GET", &format!("/api/v1/order/{}", order.id), Some(&token), None).await;
        assert_eq!(body["data"]["status"], 3);
    }

    #[tokio::test]
    async fn update_status_requires_status_field() {
        let (app, repo) = test_app();
        let order = stored_order(user_id());
        repo.insert(order.clone()).await;
        let uri = format!("/api/v1/order/{}/status", order.id);

        let (status, _) = send(
            app.clone(),
            "PUT",
            &uri,
            Some(&token_for(USER)),
            Some(serde_json::json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            app,
            "PUT",
            &uri,
            Some(&token_for(USER)),
            Some(serde_json::json!({ "status": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_status_store_failure_is_500() {
        let app = app_with(Arc::new(InMemoryOrderRepository::failing("deadlock detected")));

        let uri = format!("/api/v1/order/{}/status", Uuid::new_v4());
        let (status, _) = send(
            app,
            "PUT",
            &uri,
            Some(&token_for(USER)),
            Some(serde_json::json!({ "status": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn bad_tokens_never_reach_the_store() {
        let mut repo = MockOrderRepository::new();
        repo.expect_list_orders().never();
        repo.expect_get_by_id().never();
        repo.expect_create().never();
        repo.expect_update_status().never();
        let app = app_with(Arc::new(repo));

        let expired = issue_token(USER, SECRET, -3600).unwrap();
        let forged = issue_token(USER, b"wrong-secret", 3600).unwrap();
        let order_uri = format!("/api/v1/order/{}", Uuid::new_v4());
        let status_uri = format!("{order_uri}/status");

        for token in [None, Some(expired.as_str()), Some(forged.as_str()), Some("garbage")] {
            let requests = [
                ("GET", "/api/v1/order?page=1", None),
                ("GET", order_uri.as_str(), None),
                (
                    "POST",
                    "/api/v1/order",
                    Some(serde_json::json!({
                        "user_id": USER, "total_price": 1, "status": 1, "order_details": []
                    })),
                ),
                ("PUT", status_uri.as_str(), Some(serde_json::json!({ "status": 2 }))),
            ];
            for (method, uri, body) in requests {
                let (status, body) = send(app.clone(), method, uri, token, body).await;
                assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
                assert_eq!(body["status"], "failed");
            }
        }
    }
}
