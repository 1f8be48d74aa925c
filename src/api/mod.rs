// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Wallet Service API
//!
//! All endpoints live under the configured base path (`/api` by default) and
//! speak JSON. Authenticated endpoints expect `Authorization: Bearer <token>`.
//!
//! | Operation | Method + path | Auth |
//! |-----------|---------------|------|
//! | Create account | `POST /create` | no |
//! | Recover wallet | `POST /recover` | no |
//! | Login | `POST /login` | no |
//! | Logout | `POST /logout` | yes |
//! | Balance | `GET /balance` | yes |
//! | Address | `GET /address` | yes |
//! | Send | `POST /send` | yes |

pub mod gateway;
pub mod models;

pub use gateway::{ApiGateway, ApiResponse};

pub const CREATE_PATH: &str = "/create";
pub const RECOVER_PATH: &str = "/recover";
pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
pub const BALANCE_PATH: &str = "/balance";
pub const ADDRESS_PATH: &str = "/address";
pub const SEND_PATH: &str = "/send";
