// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! UI-visible state: what the user typed and what the client shows.
//!
//! Every field that ever holds a password or recovery phrase is a
//! `Zeroizing<String>` and is covered by [`UiState::wipe_secrets`].

use std::fmt;

use zeroize::Zeroizing;

use crate::{auth::AuthMode, wallet::amount::from_micros};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    SignIn,
    Wallet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line feedback after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

/// Editable input fields.
#[derive(Default)]
pub struct FormState {
    pub account_name: String,
    pub password: Zeroizing<String>,
    pub confirm_password: Zeroizing<String>,
    pub recovery_phrase: Zeroizing<String>,
    pub send_recipient: String,
    pub send_amount: String,
}

impl FormState {
    pub fn clear_send_fields(&mut self) {
        self.send_recipient.clear();
        self.send_amount.clear();
    }
}

impl fmt::Debug for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("account_name", &self.account_name)
            .field("password_set", &!self.password.is_empty())
            .field("recovery_phrase_set", &!self.recovery_phrase.is_empty())
            .field("send_recipient", &self.send_recipient)
            .field("send_amount", &self.send_amount)
            .finish()
    }
}

/// Read-only display fields.
#[derive(Clone)]
pub struct DisplayState {
    pub screen: Screen,
    pub mode: AuthMode,
    /// Recovery phrase returned by account creation, shown until sign-in.
    pub pending_recovery_phrase: Option<Zeroizing<String>>,
    pub account_name: String,
    pub balance: String,
    pub address: String,
    pub last_txid: Option<String>,
    pub status: Option<StatusLine>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            screen: Screen::default(),
            mode: AuthMode::default(),
            pending_recovery_phrase: None,
            account_name: String::new(),
            balance: from_micros(0),
            address: String::new(),
            last_txid: None,
            status: None,
        }
    }
}

impl fmt::Debug for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayState")
            .field("screen", &self.screen)
            .field("mode", &self.mode)
            .field(
                "pending_recovery_phrase",
                &self.pending_recovery_phrase.as_ref().map(|_| "<redacted>"),
            )
            .field("account_name", &self.account_name)
            .field("balance", &self.balance)
            .field("address", &self.address)
            .field("status", &self.status)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct UiState {
    pub form: FormState,
    pub display: DisplayState,
    /// Bumped by every [`UiState::reset`]. Work started under an older epoch
    /// must not write to the display.
    epoch: u64,
}

impl UiState {
    pub fn info(&mut self, text: impl Into<String>) {
        self.display.status = Some(StatusLine {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.display.status = Some(StatusLine {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }

    /// Overwrite and empty every field that held a password or phrase.
    pub fn wipe_secrets(&mut self) {
        self.form.password = Zeroizing::default();
        self.form.confirm_password = Zeroizing::default();
        self.form.recovery_phrase = Zeroizing::default();
        self.display.pending_recovery_phrase = None;
    }

    /// Back to a fresh sign-in screen, starting a new epoch.
    pub fn reset(&mut self) {
        self.wipe_secrets();
        self.form = FormState::default();
        self.display = DisplayState::default();
        self.epoch = self.epoch.wrapping_add(1);
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True when nothing has reset the state since `epoch` was read.
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    /// True when no field holds a password or recovery phrase.
    pub fn secrets_empty(&self) -> bool {
        self.form.password.is_empty()
            && self.form.confirm_password.is_empty()
            && self.form.recovery_phrase.is_empty()
            && self.display.pending_recovery_phrase.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> UiState {
        let mut ui = UiState::default();
        ui.form.account_name = "alice".into();
        ui.form.password = Zeroizing::new("pw".into());
        ui.form.confirm_password = Zeroizing::new("pw".into());
        ui.form.recovery_phrase = Zeroizing::new("word word".into());
        ui.form.send_recipient = "smr1".into();
        ui.display.pending_recovery_phrase = Some(Zeroizing::new("word word".into()));
        ui.display.balance = "3.000000".into();
        ui
    }

    #[test]
    fn default_display_shows_zero_balance() {
        let ui = UiState::default();
        assert_eq!(ui.display.balance, "0.000000");
        assert_eq!(ui.display.screen, Screen::SignIn);
        assert!(ui.secrets_empty());
    }

    #[test]
    fn wipe_secrets_leaves_other_fields() {
        let mut ui = filled();
        ui.wipe_secrets();
        assert!(ui.secrets_empty());
        assert_eq!(ui.form.account_name, "alice");
        assert_eq!(ui.display.balance, "3.000000");
    }

    #[test]
    fn reset_clears_everything() {
        let mut ui = filled();
        ui.error("bad");
        ui.reset();
        assert!(ui.secrets_empty());
        assert_eq!(ui.form.account_name, "");
        assert_eq!(ui.form.send_recipient, "");
        assert_eq!(ui.display.balance, "0.000000");
        assert_eq!(ui.display.status, None);
    }

    #[test]
    fn reset_starts_a_new_epoch() {
        let mut ui = UiState::default();
        let before = ui.epoch();
        ui.wipe_secrets();
        assert!(ui.is_current(before));

        ui.reset();
        assert!(!ui.is_current(before));
        assert!(ui.is_current(ui.epoch()));
    }

    #[test]
    fn debug_never_prints_secrets() {
        let ui = filled();
        let rendered = format!("{ui:?}");
        assert!(!rendered.contains("word word"));
        assert!(!rendered.contains("\"pw\""));
    }
}
