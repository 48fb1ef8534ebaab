//! Interactive login that prints a session string for `TELEGRAM_SESSION`.
//!
//! Prompts go to stderr so stdout carries only the session string.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, bail};
use stock_helper_mcp::adapters::TelegramAppSettings;
use stock_helper_mcp::shell;
use stock_helper_provider::{SignInOutcome, TelegramLogin};

fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{label}: ");
    io::stderr().flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        bail!("stdin closed before {label} was entered");
    }
    Ok(line.trim().to_string())
}

async fn login() -> anyhow::Result<String> {
    let app = TelegramAppSettings::from_env().context("Failed to load Telegram settings")?;
    let login = TelegramLogin::connect(app.api_id, &app.api_hash)
        .await
        .context("Failed to connect to Telegram")?;

    let phone = prompt("Phone number (international format)")?;
    let code = login
        .request_code(&phone)
        .await
        .context("Failed to request login code")?;
    let received = prompt("Login code")?;

    match login.sign_in(&code, &received).await.context("Sign-in failed")? {
        SignInOutcome::SignedIn => {}
        SignInOutcome::PasswordRequired(challenge) => {
            let label = match challenge.hint() {
                Some(hint) if !hint.is_empty() => format!("2FA password (hint: {hint})"),
                _ => "2FA password".to_string(),
            };
            let password = prompt(&label)?;
            login
                .check_password(challenge, &password)
                .await
                .context("Password check failed")?;
        }
    }

    Ok(login.session_string())
}

#[tokio::main]
async fn main() -> ExitCode {
    shell::init_tracing();

    match login().await {
        Ok(session) => {
            eprintln!("Signed in. Set TELEGRAM_SESSION to the line below:");
            println!("{session}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
