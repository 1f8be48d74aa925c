// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication
//!
//! Client side of the wallet service's sign-in protocol.
//!
//! ## Auth Flow
//!
//! 1. The user picks a mode (`alias`, `phrase`, `create`) and fills the form
//! 2. Pre-flight validation runs; nothing is sent if it fails
//! 3. `create` calls `/create`, shows the recovery phrase and switches to
//!    `phrase` mode. No session yet.
//! 4. `phrase` calls `/recover` then `/login` in one action
//! 5. `alias` calls `/login`
//! 6. A login response's token is written to the session store
//!
//! ## Security
//!
//! - Passwords and phrases live in `Zeroizing` buffers and are never logged
//! - `pin` is always the account name (see [`flow::alias_for`])

pub mod flow;
pub mod mode;

pub use flow::{alias_for, AuthAttempt, AuthFlowController, AuthOutcome};
pub use mode::{AuthEvent, AuthMode};
