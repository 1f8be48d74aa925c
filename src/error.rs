// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client error taxonomy.
//!
//! Every flow-level error ends at the action boundary in
//! [`crate::client::WalletClient`], where it becomes the status line shown
//! to the user via [`ClientError::user_message`].

use crate::wallet::amount::AmountError;

/// Message shown when a call could not complete at all.
pub const TRANSPORT_FALLBACK_MESSAGE: &str =
    "Could not reach the wallet service. Check your connection and try again.";

/// Coarse classification used for display and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Pre-flight check failed; nothing was sent.
    Validation,
    /// The service answered with a non-2xx status.
    Remote,
    /// The call never completed.
    Transport,
    /// The client was not in a state to perform the action.
    State,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    // --- Validation (never reaches the network) ---
    #[error("Account name and password are required")]
    MissingCredentials,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Recovery phrase is required")]
    MissingRecoveryPhrase,

    #[error("Invalid recipient address")]
    InvalidRecipient,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    // --- Flow failures carrying the remote reason verbatim ---
    #[error("Account creation failed: {0}")]
    AccountCreationFailed(String),

    #[error("Wallet recovery failed: {0}")]
    WalletRecoveryFailed(String),

    #[error("Login failed: {0}")]
    LoginFailed(String),

    // --- Generic remote / transport ---
    #[error("Wallet service returned HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Request could not complete: {0}")]
    Transport(String),

    #[error("Unexpected response from wallet service: {0}")]
    InvalidResponse(String),

    // --- Client state ---
    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Another action is still in progress")]
    Busy,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::MissingCredentials
            | ClientError::PasswordMismatch
            | ClientError::MissingRecoveryPhrase
            | ClientError::InvalidRecipient
            | ClientError::InvalidAmount(_) => ErrorKind::Validation,
            ClientError::AccountCreationFailed(_)
            | ClientError::WalletRecoveryFailed(_)
            | ClientError::LoginFailed(_)
            | ClientError::Remote { .. }
            | ClientError::InvalidResponse(_) => ErrorKind::Remote,
            ClientError::Transport(_) => ErrorKind::Transport,
            ClientError::NotAuthenticated | ClientError::Busy => ErrorKind::State,
        }
    }

    /// Text for the status line.
    ///
    /// Remote bodies are passed through verbatim. Transport failures get a
    /// generic message; their detail goes to the log only.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Remote { body, .. } if !body.trim().is_empty() => body.clone(),
            ClientError::Transport(_) => TRANSPORT_FALLBACK_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<AmountError> for ClientError {
    fn from(e: AmountError) -> Self {
        match e {
            AmountError::InvalidAmount(raw) => ClientError::InvalidAmount(raw),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport(e.to_string())
    }
}
