// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Wallet Client
//!
//! The action boundary: one method per user gesture. Each method
//!
//! - runs inside a span tagged with a fresh `action_id`
//! - catches every error and turns it into the status line
//! - always resets the progress flag when it returns, success or not
//!
//! Submit and send are exclusive: while one is in flight a second gesture is
//! refused with [`ClientError::Busy`] instead of interleaving with it.
//! Balance and address refreshes are not exclusive; both are idempotent and
//! the last response to arrive is what is shown.
//!
//! Logout starts a new UI epoch. Wallet actions record the epoch they started
//! in, and a result that arrives after a logout is dropped instead of being
//! written onto the signed-out screen.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::{
    api::ApiGateway,
    auth::{AuthAttempt, AuthEvent, AuthFlowController, AuthMode, AuthOutcome},
    config::ClientConfig,
    error::ClientError,
    session::SessionStore,
    ui::{DisplayState, Screen, UiState},
    wallet::WalletViewController,
};

/// Holds the busy flag for the duration of one exclusive action.
struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self, ClientError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ClientError::Busy)?;
        Ok(Self { flag: flag.clone() })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Client state shared by every front-end handle.
#[derive(Clone)]
pub struct WalletClient {
    session: SessionStore,
    auth: Arc<tokio::sync::Mutex<AuthFlowController>>,
    view: Arc<WalletViewController>,
    ui: Arc<Mutex<UiState>>,
    busy: Arc<AtomicBool>,
}

impl WalletClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let session = SessionStore::new();
        let gateway = ApiGateway::new(config, session.clone())?;
        Ok(Self::with_gateway(gateway, session))
    }

    /// `gateway` must read its token from `session`.
    pub fn with_gateway(gateway: ApiGateway, session: SessionStore) -> Self {
        Self {
            auth: Arc::new(tokio::sync::Mutex::new(AuthFlowController::new(
                gateway.clone(),
                session.clone(),
            ))),
            view: Arc::new(WalletViewController::new(gateway, session.clone())),
            session,
            ui: Arc::new(Mutex::new(UiState::default())),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    fn ui(&self) -> MutexGuard<'_, UiState> {
        self.ui.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The UI, if no logout has happened since `epoch`.
    fn ui_for(&self, epoch: u64) -> Option<MutexGuard<'_, UiState>> {
        let ui = self.ui();
        if ui.is_current(epoch) {
            Some(ui)
        } else {
            debug!("signed out while the action was in flight; result dropped");
            None
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Progress indicator: an exclusive action is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Copy of the display fields for rendering.
    pub fn display(&self) -> DisplayState {
        self.ui().display.clone()
    }

    /// Run `f` against the form and display state.
    pub fn with_ui<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> R {
        f(&mut self.ui())
    }

    pub fn set_account_name(&self, name: &str) {
        self.ui().form.account_name = name.to_string();
    }

    pub fn set_password(&self, password: Zeroizing<String>) {
        self.ui().form.password = password;
    }

    pub fn set_confirm_password(&self, password: Zeroizing<String>) {
        self.ui().form.confirm_password = password;
    }

    pub fn set_recovery_phrase(&self, phrase: Zeroizing<String>) {
        self.ui().form.recovery_phrase = phrase;
    }

    pub fn set_send_fields(&self, recipient: &str, amount: &str) {
        let mut ui = self.ui();
        ui.form.send_recipient = recipient.to_string();
        ui.form.send_amount = amount.to_string();
    }

    /// Switch the sign-in form.
    pub async fn select_mode(&self, mode: AuthMode) -> Result<AuthMode, ClientError> {
        let _busy =
            BusyGuard::acquire(&self.busy).inspect_err(|e| self.ui().error(e.user_message()))?;

        let mode = self.auth.lock().await.apply(AuthEvent::Select(mode));
        let mut ui = self.ui();
        ui.display.mode = mode;
        ui.display.status = None;
        Ok(mode)
    }

    /// Submit the sign-in form in the current mode.
    pub async fn submit(&self) -> Result<(), ClientError> {
        let span = info_span!("action", action = "submit", action_id = %Uuid::new_v4());
        async {
            let _busy = BusyGuard::acquire(&self.busy)
                .inspect_err(|e| self.ui().error(e.user_message()))?;
            self.submit_inner().await
        }
        .instrument(span)
        .await
    }

    async fn submit_inner(&self) -> Result<(), ClientError> {
        let mut auth = self.auth.lock().await;
        // Logout needs the auth lock, so the epoch cannot move until it is released.
        let epoch = self.ui().epoch();

        let attempt = {
            let ui = self.ui();
            AuthAttempt {
                mode: auth.mode(),
                account_name: ui.form.account_name.clone(),
                password: ui.form.password.clone(),
                confirm_password: Some(ui.form.confirm_password.clone()),
                recovery_phrase: Some(ui.form.recovery_phrase.clone()),
            }
        };
        let account_name = attempt.account_name.trim().to_string();

        match auth.submit(attempt).await {
            Ok(AuthOutcome::AccountCreated { recovery_phrase }) => {
                let mut ui = self.ui();
                ui.display.mode = auth.mode();
                ui.form.recovery_phrase = recovery_phrase.clone();
                ui.display.pending_recovery_phrase = Some(recovery_phrase);
                ui.info(format!(
                    "Account created. Write down the recovery phrase, then choose \"{}\".",
                    auth.mode().action_label()
                ));
                Ok(())
            }
            Ok(AuthOutcome::SignedIn { account_name }) => {
                {
                    let mut ui = self.ui();
                    ui.wipe_secrets();
                    ui.display.mode = auth.mode();
                    ui.display.screen = Screen::Wallet;
                    ui.display.account_name = account_name.clone();
                    ui.info(format!("Signed in as {account_name}"));
                }
                drop(auth);
                self.refresh_views(epoch).await;
                Ok(())
            }
            Err(e) => {
                // The keystore stays restored when the login after it fails.
                let message = match &e {
                    ClientError::LoginFailed(_)
                        if auth.awaiting_login_after_restore(&account_name) =>
                    {
                        format!("Wallet restored, but sign-in failed: {}", e.user_message())
                    }
                    _ => e.user_message(),
                };
                warn!(kind = ?e.kind(), error = %e, "sign-in action failed");
                self.ui().error(message);
                Err(e)
            }
        }
    }

    /// Refresh the balance display.
    pub async fn refresh_balance(&self) -> Result<(), ClientError> {
        let epoch = self.ui().epoch();
        self.refresh_balance_in(epoch).await
    }

    async fn refresh_balance_in(&self, epoch: u64) -> Result<(), ClientError> {
        let span = info_span!("action", action = "balance", action_id = %Uuid::new_v4());
        let result = self.view.refresh_balance().instrument(span).await;

        let Some(mut ui) = self.ui_for(epoch) else {
            return result.map(drop);
        };
        match result {
            Ok(balance) => {
                ui.display.balance = balance;
                Ok(())
            }
            Err(e) => {
                ui.error(e.user_message());
                Err(e)
            }
        }
    }

    /// Refresh the receive-address display.
    pub async fn load_my_address(&self) -> Result<(), ClientError> {
        let epoch = self.ui().epoch();
        self.load_my_address_in(epoch).await
    }

    async fn load_my_address_in(&self, epoch: u64) -> Result<(), ClientError> {
        let span = info_span!("action", action = "address", action_id = %Uuid::new_v4());
        let result = self.view.load_my_address().instrument(span).await;

        let Some(mut ui) = self.ui_for(epoch) else {
            return result.map(drop);
        };
        match result {
            Ok(address) => {
                ui.display.address = address.unwrap_or_default();
                Ok(())
            }
            Err(e) => {
                ui.error(e.user_message());
                Err(e)
            }
        }
    }

    async fn refresh_views(&self, epoch: u64) {
        // Both degrade to safe defaults on service errors; only a missing
        // session can fail here and that has already been reported.
        let _ = self.refresh_balance_in(epoch).await;
        let _ = self.load_my_address_in(epoch).await;
    }

    /// Send using the recipient and amount fields.
    pub async fn send(&self) -> Result<(), ClientError> {
        let span = info_span!("action", action = "send", action_id = %Uuid::new_v4());
        let epoch = self.ui().epoch();
        let result = async {
            let _busy = BusyGuard::acquire(&self.busy)?;
            let (recipient, amount) = {
                let ui = self.ui();
                (ui.form.send_recipient.clone(), ui.form.send_amount.clone())
            };
            self.view.send(&recipient, &amount).await
        }
        .instrument(span)
        .await;

        if let Err(e) = &result {
            warn!(kind = ?e.kind(), error = %e, "send action failed");
        }

        {
            let Some(mut ui) = self.ui_for(epoch) else {
                return result.map(drop);
            };
            match result {
                Ok(receipt) => {
                    ui.form.clear_send_fields();
                    ui.display.last_txid = receipt.txid.clone();
                    ui.info(format!(
                        "Sent {} SMR (tx {})",
                        receipt.amount_display(),
                        receipt.txid.as_deref().unwrap_or("pending")
                    ));
                }
                Err(e) => {
                    ui.error(e.user_message());
                    return Err(e);
                }
            }
        }

        let _ = self.refresh_balance_in(epoch).await;
        Ok(())
    }

    /// Forget the session and every secret-holding field.
    ///
    /// Waits for an in-flight sign-in to finish so it cannot re-populate the
    /// session afterwards. Balance, address and send calls still in flight
    /// complete without touching the display.
    pub async fn logout(&self) {
        let span = info_span!("action", action = "logout", action_id = %Uuid::new_v4());
        async {
            let mut auth = self.auth.lock().await;
            self.view.logout().await;
            let mode = auth.apply(AuthEvent::LoggedOut);

            let mut ui = self.ui();
            ui.reset();
            ui.display.mode = mode;
            ui.info("Signed out");
        }
        .instrument(span)
        .await;
    }
}
