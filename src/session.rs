// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Session Store
//!
//! The single piece of process-wide mutable state: who is signed in and the
//! bearer token that proves it.
//!
//! ## Invariants
//!
//! - `token` is present iff the user is signed in.
//! - Mutation goes through [`SessionStore::set`] and [`SessionStore::clear`]
//!   only. The auth flow is the only caller of `set`; logout is the only
//!   caller of `clear`.
//! - Nothing here is ever written to disk. Secret fields are zeroized when
//!   replaced or cleared.

use std::{fmt, sync::Arc};

use tokio::sync::RwLock;
use zeroize::Zeroizing;

/// Authenticated identity for the lifetime of a signed-in session.
#[derive(Default)]
pub struct Session {
    token: Option<Zeroizing<String>>,
    account_name: String,
    alias: String,
    passphrase: Zeroizing<String>,
    /// Descriptive account text returned by login, for display only.
    account_label: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn account_label(&self) -> Option<&str> {
        self.account_label.as_deref()
    }

    fn merge(&mut self, update: SessionUpdate) {
        if let Some(token) = update.token {
            self.token = Some(token);
        }
        if let Some(account_name) = update.account_name {
            self.account_name = account_name;
        }
        if let Some(alias) = update.alias {
            self.alias = alias;
        }
        if let Some(passphrase) = update.passphrase {
            self.passphrase = passphrase;
        }
        if let Some(label) = update.account_label {
            self.account_label = Some(label);
        }
    }

    fn wipe(&mut self) {
        // Dropping the Zeroizing wrappers overwrites their buffers.
        *self = Session::default();
    }
}

#[cfg(test)]
impl Session {
    pub(crate) fn alias(&self) -> &str {
        &self.alias
    }

    pub(crate) fn has_passphrase(&self) -> bool {
        !self.passphrase.is_empty()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("account_name", &self.account_name)
            .field("alias", &self.alias)
            .field("passphrase", &"<redacted>")
            .field("account_label", &self.account_label)
            .finish()
    }
}

/// Fields to merge into the session. `None` leaves a field untouched.
#[derive(Default)]
pub struct SessionUpdate {
    pub token: Option<Zeroizing<String>>,
    pub account_name: Option<String>,
    pub alias: Option<String>,
    pub passphrase: Option<Zeroizing<String>>,
    pub account_label: Option<String>,
}

/// Shared handle to the session.
///
/// Cloning shares the same session; readers (the API gateway, display code)
/// always see the latest write.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `update` into the current session.
    pub async fn set(&self, update: SessionUpdate) {
        self.inner.write().await.merge(update);
    }

    /// Reset every field to empty, zeroizing secrets.
    pub async fn clear(&self) {
        self.inner.write().await.wipe();
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_authenticated()
    }

    /// Current bearer token, read fresh on every call.
    pub async fn token(&self) -> Option<Zeroizing<String>> {
        self.inner.read().await.token.clone()
    }

    /// Run `f` against a read-only view of the session.
    pub async fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&*self.inner.read().await)
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
