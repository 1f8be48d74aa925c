// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request and response bodies exchanged with the wallet service.
//!
//! `pin` is always sent equal to `account_name`. The service treats them as
//! distinct identifiers (account vs. in-wallet alias), but this client has
//! only ever used one combined value and existing wallets were created that
//! way; changing it would lock users out of their aliases.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize)]
pub struct CreateAccountRequest<'a> {
    pub account_name: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct RecoverRequest<'a> {
    pub account_name: &'a str,
    pub pin: &'a str,
    pub password: &'a str,
    pub mnemonic: &'a str,
}

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub account_name: &'a str,
    pub pin: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    pub recipient: &'a str,
    /// Integer micro-units.
    pub amount: i64,
}

#[derive(Deserialize)]
pub struct CreateAccountResponse {
    pub mnemonic: String,
}

#[derive(Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub account: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BalanceResponse {
    pub available: AvailableBalance,
}

#[derive(Debug, Deserialize)]
pub struct AddressResponse {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SendResponse {
    /// Not every transaction reports an id immediately.
    #[serde(default)]
    pub txid: Option<String>,
    pub amount: i64,
}

/// The `available` field of a balance response.
///
/// The service normally returns integer micro-units but has been seen to send
/// a pre-formatted string. Rather than sniffing at display time, the value is
/// tagged once at decode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailableBalance {
    /// Integer micro-units, as a JSON number or an integer string.
    Micros(i64),
    /// Anything else, shown to the user unchanged.
    Display(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAvailable {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for AvailableBalance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawAvailable::deserialize(deserializer)? {
            RawAvailable::Integer(micros) => AvailableBalance::Micros(micros),
            RawAvailable::Float(value)
                if value.is_finite()
                    && value.fract() == 0.0
                    && value >= i64::MIN as f64
                    && value < i64::MAX as f64 =>
            {
                AvailableBalance::Micros(value as i64)
            }
            RawAvailable::Float(value) => AvailableBalance::Display(value.to_string()),
            RawAvailable::Text(text) => match text.trim().parse::<i64>() {
                Ok(micros) => AvailableBalance::Micros(micros),
                Err(_) => AvailableBalance::Display(text),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn available(value: serde_json::Value) -> AvailableBalance {
        serde_json::from_value::<BalanceResponse>(json!({ "available": value }))
            .unwrap()
            .available
    }

    #[test]
    fn integer_balance_is_micros() {
        assert_eq!(available(json!(1_500_000)), AvailableBalance::Micros(1_500_000));
        assert_eq!(available(json!(0)), AvailableBalance::Micros(0));
    }

    #[test]
    fn integral_float_and_numeric_string_are_micros() {
        assert_eq!(available(json!(2000000.0)), AvailableBalance::Micros(2_000_000));
        assert_eq!(available(json!("42")), AvailableBalance::Micros(42));
    }

    #[test]
    fn other_values_are_kept_for_display() {
        assert_eq!(available(json!("1.5 SMR")), AvailableBalance::Display("1.5 SMR".into()));
        assert_eq!(available(json!(0.25)), AvailableBalance::Display("0.25".into()));
    }

    #[test]
    fn request_bodies_use_wire_names() {
        let body = serde_json::to_value(RecoverRequest {
            account_name: "alice",
            pin: "alice",
            password: "pw",
            mnemonic: "word word",
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "account_name": "alice",
                "pin": "alice",
                "password": "pw",
                "mnemonic": "word word"
            })
        );

        let send = serde_json::to_value(SendRequest {
            recipient: "smr1q",
            amount: 5,
        })
        .unwrap();
        assert_eq!(send, json!({ "recipient": "smr1q", "amount": 5 }));
    }

    #[test]
    fn optional_response_fields_default() {
        let login: LoginResponse = serde_json::from_value(json!({ "token": "t" })).unwrap();
        assert_eq!(login.account, None);

        let sent: SendResponse =
            serde_json::from_value(json!({ "txid": null, "amount": 10 })).unwrap();
        assert_eq!(sent, SendResponse { txid: None, amount: 10 });
    }
}
