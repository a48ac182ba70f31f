// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::default_trait_access,
    clippy::let_and_return,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

mod credentials;
mod dispatch;
mod options;
mod prompt;
mod settings;

use options::{Command, Options};

/// Authenticates once and runs `command` against the resulting session.
async fn run(
    options: &Options,
    command: Command,
    stdin: &mut impl prompt::Reader,
    out: &mut impl std::io::Write,
) -> Result<()> {
    let settings = settings::Settings::load(options.config.as_deref())?;
    let endpoint = settings.endpoint(options.endpoint.as_ref())?;

    let credentials = credentials::collect(options, &settings, stdin)?;

    let mut client = provisioning_client_async::Client::new(endpoint)
        .context("could not create provisioning client")?;
    if let Some(timeout) = settings.timeout() {
        client = client.with_timeout(timeout);
    }
    log::debug!("Using provisioning endpoint {}", client.endpoint());

    let session = client
        .login(&credentials)
        .await
        .with_context(|| format!("could not authenticate as {}", credentials.email))?;

    dispatch::execute(&session, command, stdin, out).await
}

#[tokio::main]
async fn main() {
    if let Err(err) = logger::try_init(log::LevelFilter::Warn) {
        eprintln!("could not initialize logger: {}", err);
    }

    let options = Options::parse();

    // Incomplete options show usage and end the run without an error status.
    let command = if let Some(command) = Command::from_options(&options) {
        command
    } else {
        let _ = Options::command().print_help();
        return;
    };

    let mut stdin = prompt::Stdin::default();
    let mut stdout = std::io::stdout();

    if let Err(err) = run(&options, command, &mut stdin, &mut stdout).await {
        let status = exit_status(&err);
        if status == 0 {
            println!("{}", err);
        } else {
            eprintln!("{:?}", err);
        }

        std::process::exit(status);
    }
}

/// A password mismatch is a user-facing outcome of `create`, not a failure.
fn exit_status(err: &anyhow::Error) -> i32 {
    if err.is::<dispatch::PasswordMismatch>() {
        0
    } else {
        1
    }
}
