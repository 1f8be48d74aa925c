// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet operations for a signed-in session.
//!
//! - `address` - recipient address grammar
//! - `amount` - decimal ↔ micro-unit conversion
//! - `view` - balance, address and send

pub mod address;
pub mod amount;
pub mod view;

pub use address::is_valid_address;
pub use amount::{from_micros, to_micros, AmountError};
pub use view::{SendReceipt, WalletViewController};
