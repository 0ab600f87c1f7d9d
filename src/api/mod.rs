// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::require_auth,
    error::ErrorBody,
    models::{Order, OrderDetailRequest, OrderRequest, OrderStatus, UpdateStatusRequest},
    state::AppState,
};

pub mod health;
pub mod orders;

pub use orders::{DataEnvelope, IdEnvelope};

pub fn router(state: AppState) -> Router {
    let order_routes = Router::new()
        .route(
            "/order",
            get(orders::list_orders).post(orders::create_order),
        )
        .route("/order/{id}", get(orders::get_order))
        .route("/order/{id}/status", put(orders::update_order_status))
        .route_layer(middleware::from_fn_with_state(
            state.verifier.clone(),
            require_auth,
        ));

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    let request_timeout = state.request_timeout;

    Router::new()
        .nest("/api/v1", order_routes)
        .merge(health_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                )),
        )
        .layer(CorsLayer::permissive())
}

/// Registers the bearer token scheme referenced by the order endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        orders::list_orders,
        orders::get_order,
        orders::create_order,
        orders::update_order_status,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Order,
            OrderStatus,
            OrderRequest,
            OrderDetailRequest,
            UpdateStatusRequest,
            IdEnvelope,
            ErrorBody,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Orders", description = "Order management for the authenticated user"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
