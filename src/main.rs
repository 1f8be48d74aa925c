// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use smr_wallet_client::{config::ClientConfig, logging, shell::Shell, WalletClient};
use tokio::io::{stdin, stdout, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(config.log_format);
    info!(
        api = %config.endpoint("/"),
        timeout_secs = config.timeout.map(|t| t.as_secs()),
        "SMR wallet client starting"
    );

    let client = match WalletClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to initialise wallet client");
            return ExitCode::FAILURE;
        }
    };

    let shutdown_client = client.clone();
    let mut shell = Shell::new(client, BufReader::new(stdin()), stdout());

    let result = tokio::select! {
        result = shell.run() => result,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted; signing out");
            Ok(())
        }
    };

    // Covers Ctrl-C and I/O errors; makes no call after a normal `quit`.
    shutdown_client.logout().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "terminal I/O failed");
            ExitCode::FAILURE
        }
    }
}
