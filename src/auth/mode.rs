// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Sign-in modes and the transitions between them.

use std::{fmt, str::FromStr};

/// Which sign-in form is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Sign in to a wallet whose keystore already exists on the service.
    #[default]
    LoginWithAlias,
    /// Restore the keystore from a recovery phrase, then sign in.
    LoginWithRecoveryPhrase,
    /// Create a new wallet; yields a recovery phrase but no session.
    CreateAccount,
}

/// Something that moves the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// The user picked a mode.
    Select(AuthMode),
    /// Account creation succeeded and a recovery phrase was shown.
    AccountCreated,
    /// A login response carried a token.
    SignedIn,
    /// The session was cleared.
    LoggedOut,
}

impl AuthMode {
    /// Transition function.
    ///
    /// The only transition not chosen by the user is `CreateAccount` →
    /// `LoginWithRecoveryPhrase` on [`AuthEvent::AccountCreated`]: creating a
    /// wallet never signs in, the user has to submit the phrase they were
    /// just shown.
    pub fn next(self, event: AuthEvent) -> AuthMode {
        match (self, event) {
            (_, AuthEvent::Select(mode)) => mode,
            (AuthMode::CreateAccount, AuthEvent::AccountCreated) => {
                AuthMode::LoginWithRecoveryPhrase
            }
            (mode, AuthEvent::AccountCreated) => mode,
            (mode, AuthEvent::SignedIn) => mode,
            (_, AuthEvent::LoggedOut) => AuthMode::LoginWithAlias,
        }
    }

    pub fn requires_confirmation(self) -> bool {
        self == AuthMode::CreateAccount
    }

    pub fn requires_recovery_phrase(self) -> bool {
        self == AuthMode::LoginWithRecoveryPhrase
    }

    /// Label of the submit action in this mode.
    pub fn action_label(self) -> &'static str {
        match self {
            AuthMode::LoginWithAlias => "Sign in",
            AuthMode::LoginWithRecoveryPhrase => "Recover & sign in",
            AuthMode::CreateAccount => "Create account",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthMode::LoginWithAlias => "alias",
            AuthMode::LoginWithRecoveryPhrase => "phrase",
            AuthMode::CreateAccount => "create",
        };
        f.write_str(name)
    }
}

impl FromStr for AuthMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alias" | "login" => Ok(AuthMode::LoginWithAlias),
            "phrase" | "recover" => Ok(AuthMode::LoginWithRecoveryPhrase),
            "create" => Ok(AuthMode::CreateAccount),
            other => Err(format!(
                "Unknown mode `{other}` (expected `alias`, `phrase` or `create`)"
            )),
        }
    }
}
