// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Auth Flow Controller
//!
//! Turns one submit of the sign-in form into the right sequence of calls:
//!
//! | Mode | Calls |
//! |------|-------|
//! | `CreateAccount` | `POST /create` |
//! | `LoginWithRecoveryPhrase` | `POST /recover`, then `POST /login` |
//! | `LoginWithAlias` | `POST /login` |
//!
//! Pre-flight validation runs before any call. Each call completes before the
//! next is issued. The session is written only from a successful login
//! response; every failure leaves it untouched.

use std::fmt;

use tracing::{info, warn};
use zeroize::Zeroizing;

use super::mode::{AuthEvent, AuthMode};
use crate::{
    api::{
        models::{
            CreateAccountRequest, CreateAccountResponse, LoginRequest, LoginResponse,
            RecoverRequest,
        },
        ApiGateway, CREATE_PATH, LOGIN_PATH, RECOVER_PATH,
    },
    error::ClientError,
    session::{SessionStore, SessionUpdate},
};

/// The alias sent as `pin` for `account_name`.
///
/// Always the account name itself: one combined identifier per wallet. The
/// service would accept a distinct alias, but every wallet this client has
/// created uses the combined form.
pub fn alias_for(account_name: &str) -> &str {
    account_name
}

/// One press of the submit button. Built fresh, dropped (and zeroized) once
/// the attempt resolves.
pub struct AuthAttempt {
    pub mode: AuthMode,
    pub account_name: String,
    pub password: Zeroizing<String>,
    pub confirm_password: Option<Zeroizing<String>>,
    pub recovery_phrase: Option<Zeroizing<String>>,
}

impl AuthAttempt {
    /// Pre-flight checks, in order, stopping at the first failure.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.account_name.trim().is_empty() || self.password.trim().is_empty() {
            return Err(ClientError::MissingCredentials);
        }

        if self.mode.requires_confirmation()
            && self.confirm_password.as_deref().map(String::as_str) != Some(self.password.as_str())
        {
            return Err(ClientError::PasswordMismatch);
        }

        if self.mode.requires_recovery_phrase()
            && self
                .recovery_phrase
                .as_ref()
                .is_none_or(|phrase| phrase.trim().is_empty())
        {
            return Err(ClientError::MissingRecoveryPhrase);
        }

        Ok(())
    }

    fn account_name(&self) -> &str {
        self.account_name.trim()
    }

    fn recovery_phrase(&self) -> &str {
        self.recovery_phrase
            .as_deref()
            .map(|phrase| phrase.trim())
            .unwrap_or_default()
    }
}

impl fmt::Debug for AuthAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthAttempt")
            .field("mode", &self.mode)
            .field("account_name", &self.account_name)
            .field("password", &"<redacted>")
            .field("recovery_phrase", &self.recovery_phrase.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Result of a successful submit.
pub enum AuthOutcome {
    /// A wallet was created. The phrase must be shown to the user; the mode
    /// has moved to `LoginWithRecoveryPhrase` and nobody is signed in yet.
    AccountCreated { recovery_phrase: Zeroizing<String> },
    /// The session now holds a token.
    SignedIn { account_name: String },
}

impl fmt::Debug for AuthOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthOutcome::AccountCreated { .. } => f
                .debug_struct("AccountCreated")
                .field("recovery_phrase", &"<redacted>")
                .finish(),
            AuthOutcome::SignedIn { account_name } => f
                .debug_struct("SignedIn")
                .field("account_name", account_name)
                .finish(),
        }
    }
}

pub struct AuthFlowController {
    gateway: ApiGateway,
    session: SessionStore,
    mode: AuthMode,
    /// Account whose keystore was restored in this process but which has not
    /// signed in yet. A retry for it skips straight to login.
    restored_account: Option<String>,
}

impl AuthFlowController {
    pub fn new(gateway: ApiGateway, session: SessionStore) -> Self {
        Self {
            gateway,
            session,
            mode: AuthMode::default(),
            restored_account: None,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn apply(&mut self, event: AuthEvent) -> AuthMode {
        self.mode = self.mode.next(event);
        if event == AuthEvent::LoggedOut {
            self.restored_account = None;
        }
        self.mode
    }

    /// True when `account_name` was restored but its login has not succeeded.
    pub fn awaiting_login_after_restore(&self, account_name: &str) -> bool {
        self.restored_account.as_deref() == Some(account_name.trim())
    }

    /// Run one attempt to completion.
    pub async fn submit(&mut self, attempt: AuthAttempt) -> Result<AuthOutcome, ClientError> {
        attempt.validate()?;

        match attempt.mode {
            AuthMode::CreateAccount => self.create_account(&attempt).await,
            AuthMode::LoginWithRecoveryPhrase => self.recover_then_login(&attempt).await,
            AuthMode::LoginWithAlias => self.login(&attempt).await,
        }
    }

    async fn create_account(&mut self, attempt: &AuthAttempt) -> Result<AuthOutcome, ClientError> {
        let account_name = attempt.account_name();
        info!(account = %account_name, "creating account");

        let response = self
            .gateway
            .post(
                CREATE_PATH,
                &CreateAccountRequest {
                    account_name,
                    password: &attempt.password,
                },
            )
            .await?;

        if !response.is_success() {
            warn!(
                account = %account_name,
                status = response.status.as_u16(),
                "account creation rejected"
            );
            return Err(ClientError::AccountCreationFailed(response.reason()));
        }

        let created: CreateAccountResponse = response.json()?;
        let recovery_phrase = Zeroizing::new(created.mnemonic);
        // An existing account comes back as 200 with the phrase rendered as "None".
        if matches!(recovery_phrase.trim(), "" | "None" | "null") {
            return Err(ClientError::InvalidResponse(
                "account created without a recovery phrase".to_string(),
            ));
        }

        self.mode = attempt.mode.next(AuthEvent::AccountCreated);
        info!(account = %account_name, "account created; awaiting recovery-phrase sign-in");

        Ok(AuthOutcome::AccountCreated { recovery_phrase })
    }

    async fn recover_then_login(
        &mut self,
        attempt: &AuthAttempt,
    ) -> Result<AuthOutcome, ClientError> {
        let account_name = attempt.account_name();

        if self.awaiting_login_after_restore(account_name) {
            info!(account = %account_name, "keystore already restored; retrying login only");
        } else {
            info!(account = %account_name, "restoring wallet from recovery phrase");
            let response = self
                .gateway
                .post(
                    RECOVER_PATH,
                    &RecoverRequest {
                        account_name,
                        pin: alias_for(account_name),
                        password: &attempt.password,
                        mnemonic: attempt.recovery_phrase(),
                    },
                )
                .await?;

            if !response.is_success() {
                warn!(
                    account = %account_name,
                    status = response.status.as_u16(),
                    "wallet recovery rejected"
                );
                return Err(ClientError::WalletRecoveryFailed(response.reason()));
            }

            // Not rolled back if the login below fails: the keystore now exists.
            self.restored_account = Some(account_name.to_string());
        }

        self.login(attempt).await
    }

    async fn login(&mut self, attempt: &AuthAttempt) -> Result<AuthOutcome, ClientError> {
        let account_name = attempt.account_name();
        let alias = alias_for(account_name);

        let response = self
            .gateway
            .post(
                LOGIN_PATH,
                &LoginRequest {
                    account_name,
                    pin: alias,
                    password: &attempt.password,
                },
            )
            .await?;

        if !response.is_success() {
            warn!(
                account = %account_name,
                status = response.status.as_u16(),
                "login rejected"
            );
            return Err(ClientError::LoginFailed(response.reason()));
        }

        let login: LoginResponse = response.json()?;
        if login.token.is_empty() {
            return Err(ClientError::InvalidResponse(
                "login response did not include a token".to_string(),
            ));
        }

        self.session
            .set(SessionUpdate {
                token: Some(Zeroizing::new(login.token)),
                account_name: Some(account_name.to_string()),
                alias: Some(alias.to_string()),
                passphrase: Some(attempt.password.clone()),
                account_label: login.account,
            })
            .await;

        self.restored_account = None;
        self.mode = self.mode.next(AuthEvent::SignedIn);
        info!(account = %account_name, "signed in");

        Ok(AuthOutcome::SignedIn {
            account_name: account_name.to_string(),
        })
    }
}
