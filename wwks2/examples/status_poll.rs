//! Connect to a WWKS peer and poll its status once.
//!
//! Usage: `cargo run --example status_poll -- <host> [port]`

use anyhow::Context;
use wwks2::{Client, Subscriber, SubscriberType};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let host = args.next().context("usage: status_poll <host> [port]")?;
    let port = match args.next() {
        Some(p) => p.parse().context("invalid port")?,
        None => wwks2::DEFAULT_PORT,
    };

    let subscriber = Subscriber::new(
        100,
        SubscriberType::Ims,
        "wwks2",
        "status_poll",
        env!("CARGO_PKG_VERSION"),
    );

    let mut client = Client::new(host, port, subscriber);
    client.connect().await?;

    let status = client.status(true).await?;
    println!("Peer state: {} {}", status.state, status.state_text);
    for component in &status.components {
        println!("  {}", component);
    }

    client.keep_alive().await?;
    client.disconnect().await?;

    Ok(())
}
