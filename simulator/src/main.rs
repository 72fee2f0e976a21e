use anyhow::Context;
use clap::Parser;
use retrocade_simulator::{Api, Simulator};
use retrocade_types::casino::STARTING_BALANCE;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Starting balance in cents.
    #[arg(short, long, default_value_t = STARTING_BALANCE)]
    balance: u64,

    /// Seed the outcome source for a reproducible run.
    #[arg(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Create logger
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let simulator = Simulator::new(args.balance, args.seed);
    let api = Api::new(simulator);
    let app = api.router();

    // Start server
    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await.context("axum server error")?;

    Ok(())
}
