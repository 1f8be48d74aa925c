// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Line-oriented terminal front-end.
//!
//! One command per line. Secrets (`password`, `confirm`, `phrase`) are read
//! from the line that follows the command, so they never appear in a command
//! line that might be echoed into a log or shell history.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use zeroize::Zeroizing;

use crate::{
    auth::AuthMode,
    client::WalletClient,
    ui::{Screen, StatusKind},
};

pub const HELP: &str = "\
Commands:
  mode alias|phrase|create   choose how to sign in
  name <account>             set the account name
  password                   enter the password on the next line
  confirm                    repeat the password (create mode)
  phrase                     enter the recovery phrase on the next line
  submit                     create / recover & sign in / sign in
  balance                    refresh the balance
  address                    show your receive address
  send <recipient> <amount>  send SMR
  logout                     sign out and wipe secrets
  status                     show the current screen
  help                       this text
  quit                       sign out and exit";

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<R, W> {
    client: WalletClient,
    lines: Lines<R>,
    out: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(client: WalletClient, input: R, out: W) -> Self {
        Self {
            client,
            lines: input.lines(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read and run commands until `quit` or end of input.
    ///
    /// Always signs out before returning so no secret outlives the loop.
    pub async fn run(&mut self) -> std::io::Result<()> {
        self.write(HELP).await?;
        self.render().await?;

        loop {
            self.prompt().await?;
            let Some(line) = self.lines.next_line().await? else {
                break;
            };
            if self.dispatch(line.trim()).await? == Flow::Quit {
                break;
            }
            self.render().await?;
        }

        self.client.logout().await;
        Ok(())
    }

    async fn dispatch(&mut self, line: &str) -> std::io::Result<Flow> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = parts.collect();

        // Results are already on the status line; the shell only renders it.
        match (command, args.as_slice()) {
            ("mode", [mode]) => match mode.parse::<AuthMode>() {
                Ok(mode) => {
                    let _ = self.client.select_mode(mode).await;
                }
                Err(message) => self.write(&message).await?,
            },
            ("name", [name]) => self.client.set_account_name(name),
            ("password", []) => {
                let secret = self.read_secret("Password").await?;
                self.client.set_password(secret);
            }
            ("confirm", []) => {
                let secret = self.read_secret("Repeat password").await?;
                self.client.set_confirm_password(secret);
            }
            ("phrase", []) => {
                let secret = self.read_secret("Recovery phrase").await?;
                self.client.set_recovery_phrase(secret);
            }
            ("submit", []) => {
                let _ = self.client.submit().await;
            }
            ("balance", []) => {
                let _ = self.client.refresh_balance().await;
            }
            ("address", []) => {
                let _ = self.client.load_my_address().await;
            }
            ("send", [recipient, amount]) => {
                self.client.set_send_fields(recipient, amount);
                let _ = self.client.send().await;
            }
            ("logout", []) => self.client.logout().await,
            ("status", []) => {}
            ("help", []) => self.write(HELP).await?,
            ("quit" | "exit", []) => return Ok(Flow::Quit),
            _ => self.write("Unknown command; type `help`").await?,
        }

        Ok(Flow::Continue)
    }

    async fn read_secret(&mut self, label: &str) -> std::io::Result<Zeroizing<String>> {
        self.out.write_all(format!("{label}: ").as_bytes()).await?;
        self.out.flush().await?;
        let line = self.lines.next_line().await?.unwrap_or_default();
        Ok(Zeroizing::new(line))
    }

    async fn prompt(&mut self) -> std::io::Result<()> {
        let busy = if self.client.is_busy() { "…" } else { "" };
        self.out.write_all(format!("{busy}> ").as_bytes()).await?;
        self.out.flush().await
    }

    async fn render(&mut self) -> std::io::Result<()> {
        let display = self.client.display();
        let mut text = String::new();

        match display.screen {
            Screen::SignIn => {
                text.push_str(&format!(
                    "[sign in: {} mode, submit = {}]\n",
                    display.mode,
                    display.mode.action_label()
                ));
                if let Some(phrase) = &display.pending_recovery_phrase {
                    text.push_str("Recovery phrase (shown once, write it down):\n  ");
                    text.push_str(phrase);
                    text.push('\n');
                }
            }
            Screen::Wallet => {
                let label = self
                    .client
                    .session()
                    .read(|session| session.account_label().map(str::to_string))
                    .await;
                match label {
                    Some(label) => text.push_str(&format!(
                        "[wallet: {} ({label})]\n",
                        display.account_name
                    )),
                    None => text.push_str(&format!("[wallet: {}]\n", display.account_name)),
                }
                text.push_str(&format!("  balance: {} SMR\n", display.balance));
                let address = if display.address.is_empty() {
                    "-"
                } else {
                    display.address.as_str()
                };
                text.push_str(&format!("  address: {address}\n"));
            }
        }

        if let Some(status) = &display.status {
            let tag = match status.kind {
                StatusKind::Info => "ok",
                StatusKind::Error => "error",
            };
            text.push_str(&format!("{tag}: {}\n", status.text));
        }

        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await
    }

    async fn write(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        session::SessionStore,
        test_support::{MockWalletService, MOCK_MNEMONIC, MOCK_TOKEN},
    };
    use axum::http::StatusCode;

    async fn run_script(service: &MockWalletService, script: &str) -> (String, WalletClient) {
        let session = SessionStore::new();
        let client = WalletClient::with_gateway(service.gateway(session.clone()), session);
        let mut shell = Shell::new(client.clone(), script.as_bytes(), Vec::new());
        shell.run().await.unwrap();
        let output = String::from_utf8(shell.into_output()).unwrap();
        (output, client)
    }

    #[tokio::test]
    async fn create_account_shows_phrase_then_signs_in() {
        let service = MockWalletService::start().await;
        let script = "\
mode create
name alice
password
hunter22
confirm
hunter22
submit
submit
balance
quit
";
        let (output, client) = run_script(&service, script).await;

        assert!(output.contains(MOCK_MNEMONIC));
        assert!(output.contains("[sign in: phrase mode, submit = Recover & sign in]"));
        assert!(output.contains("[wallet: alice (Account alice)]"));
        assert!(output.contains("balance: 1.500000 SMR"));
        assert!(!output.contains("hunter22"));
        assert_eq!(service.calls("/logout"), 1);
        assert!(!client.session().is_authenticated().await);
        assert!(client.with_ui(|ui| ui.secrets_empty()));
    }

    #[tokio::test]
    async fn wallet_header_omits_missing_account_label() {
        let service = MockWalletService::start().await;
        service.respond(
            "/login",
            StatusCode::OK,
            serde_json::json!({ "token": MOCK_TOKEN }),
        );
        let (output, _) = run_script(&service, "name carol\npassword\npw\nsubmit\nquit\n").await;

        assert!(output.contains("[wallet: carol]\n"));
        assert!(!output.contains("[wallet: carol ("));
    }

    #[tokio::test]
    async fn invalid_send_is_reported_without_calling_out() {
        let service = MockWalletService::start().await;
        let script = "\
name bob
password
pw
submit
send not-an-address 1
";
        let (output, _) = run_script(&service, script).await;

        assert!(output.contains("error: Invalid recipient address"));
        assert_eq!(service.calls("/send"), 0);
    }

    #[tokio::test]
    async fn unknown_input_is_harmless() {
        let service = MockWalletService::start().await;
        let (output, _) = run_script(&service, "mode vault\nfly\n\nquit\n").await;

        assert!(output.contains("Unknown mode `vault`"));
        assert!(output.contains("Unknown command"));
        assert_eq!(service.total_calls(), 0);
    }
}
