// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Wallet View Controller
//!
//! Operations available once signed in. Each one checks the session first
//! and fails with [`ClientError::NotAuthenticated`] without calling out.
//!
//! ## Failure policy
//!
//! - balance falls back to `0.000000`
//! - address falls back to empty, never to a previously shown address
//!
//! Both failures are logged at `warn`. Send failures surface the service's
//! reason verbatim.

use serde_json::json;
use tracing::{info, warn};

use super::{
    address::is_valid_address,
    amount::{from_micros, to_micros},
};
use crate::{
    api::{
        models::{AddressResponse, AvailableBalance, BalanceResponse, SendRequest, SendResponse},
        ApiGateway, ADDRESS_PATH, BALANCE_PATH, LOGOUT_PATH, SEND_PATH,
    },
    error::ClientError,
    session::SessionStore,
};

/// Confirmation of an accepted transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    pub txid: Option<String>,
    pub amount_micros: i64,
}

impl SendReceipt {
    pub fn amount_display(&self) -> String {
        from_micros(self.amount_micros)
    }
}

pub struct WalletViewController {
    gateway: ApiGateway,
    session: SessionStore,
}

impl WalletViewController {
    pub fn new(gateway: ApiGateway, session: SessionStore) -> Self {
        Self { gateway, session }
    }

    async fn ensure_signed_in(&self) -> Result<(), ClientError> {
        if self.session.is_authenticated().await {
            Ok(())
        } else {
            Err(ClientError::NotAuthenticated)
        }
    }

    /// Fetch the spendable balance.
    pub async fn fetch_balance(&self) -> Result<AvailableBalance, ClientError> {
        self.ensure_signed_in().await?;

        let response = self.gateway.get(BALANCE_PATH).await?;
        if !response.is_success() {
            return Err(response.into_remote_error());
        }
        Ok(response.json::<BalanceResponse>()?.available)
    }

    /// Balance text for display; `0.000000` if the fetch fails.
    pub async fn refresh_balance(&self) -> Result<String, ClientError> {
        self.ensure_signed_in().await?;

        match self.fetch_balance().await {
            Ok(AvailableBalance::Micros(micros)) => Ok(from_micros(micros)),
            Ok(AvailableBalance::Display(raw)) => Ok(raw),
            Err(e) => {
                warn!(error = %e, "balance refresh failed; showing zero");
                Ok(from_micros(0))
            }
        }
    }

    /// Fetch the wallet's receive address.
    pub async fn fetch_address(&self) -> Result<String, ClientError> {
        self.ensure_signed_in().await?;

        let response = self.gateway.get(ADDRESS_PATH).await?;
        if !response.is_success() {
            return Err(response.into_remote_error());
        }
        Ok(response.json::<AddressResponse>()?.address)
    }

    /// Receive address for display; `None` if the fetch fails.
    pub async fn load_my_address(&self) -> Result<Option<String>, ClientError> {
        self.ensure_signed_in().await?;

        match self.fetch_address().await {
            Ok(address) => Ok(Some(address)),
            Err(e) => {
                warn!(error = %e, "address lookup failed; clearing displayed address");
                Ok(None)
            }
        }
    }

    /// Transfer `amount` (display units) to `recipient`.
    ///
    /// Recipient and amount are checked before anything is sent. The amount
    /// must be positive; the service rejects anything else.
    pub async fn send(&self, recipient: &str, amount: &str) -> Result<SendReceipt, ClientError> {
        self.ensure_signed_in().await?;

        let recipient = recipient.trim();
        if !is_valid_address(recipient) {
            return Err(ClientError::InvalidRecipient);
        }

        let amount_micros = to_micros(amount)?;
        if amount_micros <= 0 {
            return Err(ClientError::InvalidAmount(amount.to_string()));
        }

        let response = self
            .gateway
            .post(
                SEND_PATH,
                &SendRequest {
                    recipient,
                    amount: amount_micros,
                },
            )
            .await?;

        if !response.is_success() {
            warn!(status = response.status.as_u16(), "send rejected");
            return Err(response.into_remote_error());
        }

        let sent: SendResponse = response.json()?;
        info!(
            txid = sent.txid.as_deref().unwrap_or("pending"),
            amount = sent.amount,
            "transfer submitted"
        );

        Ok(SendReceipt {
            txid: sent.txid,
            amount_micros: sent.amount,
        })
    }

    /// End the session. Always succeeds locally; the server call is
    /// best-effort and its result is discarded.
    pub async fn logout(&self) {
        if self.session.is_authenticated().await {
            let _ = self
                .gateway
                .post(LOGOUT_PATH, &json!({}))
                .await
                .inspect_err(|e| info!(error = %e, "logout call failed; clearing session anyway"));
        }

        self.session.clear().await;
    }
}
