// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Print a bearer token for local testing.
//!
//! ```text
//! ACCESS_TOKEN_SECRET=... mint-token <user-id> [ttl-secs]
//! ```
//!
//! The TTL defaults to `TOKEN_TTL` (or one day).

use std::{env, process};

use orders_service::{auth::token::issue_token, config::TokenSettings};

fn main() {
    let mut args = env::args().skip(1);
    let Some(user_id) = args.next() else {
        eprintln!("usage: mint-token <user-id> [ttl-secs]");
        process::exit(2);
    };

    let settings = match TokenSettings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    let ttl = match args.next().map(|raw| raw.trim().parse::<i64>()) {
        None => settings.ttl_secs,
        Some(Ok(ttl)) => ttl,
        Some(Err(e)) => {
            eprintln!("invalid TTL: {e}");
            process::exit(2);
        }
    };

    match issue_token(&user_id, settings.secret.as_bytes(), ttl) {
        Ok(token) => println!("{token}"),
        Err(e) => {
            eprintln!("failed to sign token: {e}");
            process::exit(1);
        }
    }
}
