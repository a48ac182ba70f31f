// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(about = "Serves an in-memory provisioning API for local testing")]
struct Options {
    #[arg(long, value_name = "PORT", default_value_t = 8080)]
    port: u16,

    #[arg(long, value_name = "EMAIL", default_value = "admin@example.com")]
    admin: String,

    #[arg(long, value_name = "PASSWORD", default_value = "admin-password")]
    password: String,

    #[arg(long, value_name = "DOMAIN", default_value = "example.com")]
    domain: String,

    #[arg(long, value_name = "COUNT", default_value_t = mock_provisioning_server::DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    logger::try_init(log::LevelFilter::Debug)?;

    let options = Options::parse();

    let server = mock_provisioning_server::MockServer::start(&mock_provisioning_server::Options {
        bind: ([127, 0, 0, 1], options.port).into(),
        admin_email: options.admin,
        admin_password: options.password,
        domain: options.domain,
        page_size: options.page_size,
    })?;

    println!("Listening on {}.", server.endpoint());

    server.join().await;

    Ok(())
}
