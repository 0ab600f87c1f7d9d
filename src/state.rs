// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{sync::Arc, time::Duration};

use crate::{
    auth::TokenVerifier,
    storage::{OrderRepository, PgOrderRepository},
    usecase::OrderService,
};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared, immutable per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderService,
    pub verifier: TokenVerifier,
    /// Present when backed by PostgreSQL; probed by `/health/ready`.
    pub database: Option<PgOrderRepository>,
    /// Upper bound on the time spent handling one request.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(repo: Arc<dyn OrderRepository>, verifier: TokenVerifier) -> Self {
        Self {
            orders: OrderService::new(repo),
            verifier,
            database: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// State backed by the PostgreSQL store.
    pub fn with_database(repo: PgOrderRepository, verifier: TokenVerifier) -> Self {
        let mut state = Self::new(Arc::new(repo.clone()), verifier);
        state.database = Some(repo);
        state
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
