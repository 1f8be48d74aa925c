// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! SMR Wallet Client - session and transaction-submission controller
//!
//! This crate drives a remote Shimmer wallet service: it turns four user
//! intents (create account, recover from phrase, sign in, send) into the
//! right sequence of authenticated calls, and keeps the passphrase, recovery
//! phrase and session token in transient memory that is wiped on logout.
//!
//! ## Modules
//!
//! - `api` - HTTP gateway and wire models
//! - `auth` - sign-in modes and the auth flow controller
//! - `wallet` - address grammar, amount codec, signed-in operations
//! - `session` - the session store
//! - `client` - action boundary shared by front-ends
//! - `shell` - terminal front-end
//! - `config` / `logging` / `error` - ambient plumbing

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod shell;
pub mod ui;
pub mod wallet;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::WalletClient;
pub use config::ClientConfig;
pub use error::ClientError;
