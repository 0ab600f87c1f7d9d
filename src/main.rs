// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process;

use orders_service::{
    api::router,
    auth::TokenVerifier,
    config::Config,
    logging::init_tracing,
    shutdown,
    state::AppState,
    storage::{postgres, PgOrderRepository},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Logging is not up yet.
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = init_tracing(config.log_format) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(1);
    }

    info!(?config, "Starting orders service");

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let pool = match postgres::connect(
        config.database.clone(),
        config.db_max_connections,
        config.request_timeout,
    )
    .await
    {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            process::exit(1);
        }
    };
    info!(max_connections = config.db_max_connections, "Database pool ready");

    let verifier = TokenVerifier::new(config.token.secret.as_bytes())
        .with_leeway(config.jwt_leeway_secs);
    let state = AppState::with_database(PgOrderRepository::new(pool.clone()), verifier)
        .with_request_timeout(config.request_timeout);
    let app = router(state);

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %addr, "Failed to bind");
            process::exit(1);
        }
    };

    let shutdown_token = CancellationToken::new();
    tokio::spawn({
        let token = shutdown_token.clone();
        async move {
            if let Err(e) = shutdown::listen(token).await {
                error!("failed to listen for shutdown signal: {e}");
            }
        }
    });

    info!("Orders service listening on http://{addr} (docs at /docs)");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_token.cancelled_owned())
        .await;

    pool.close().await;

    if let Err(e) = served {
        error!(error = %e, "Server failed");
        process::exit(1);
    }
    info!("Orders service stopped");
}
