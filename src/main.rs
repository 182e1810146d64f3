//! fairprice: price-fairness evaluation service.
//!
//! Single-binary Tokio application that serves one POST endpoint: given a
//! quote, category, and location it classifies the price against a
//! CPI-adjusted regional benchmark, and returns a detailed report when the
//! caller's payment session verifies.

use clap::Parser;
use tracing::{error, info};

use fairprice::{config, server};

/// Price-fairness evaluation server.
#[derive(Parser)]
#[command(name = "fairprice", about = "Price-fairness evaluation service")]
struct Cli {
    /// Bind address override (host:port).
    #[arg(long)]
    bind: Option<String>,

    /// Path to a config.toml.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fairprice=info,bls_client=info,stripe_client=info,evaluator=info".into()
            }),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    let mut app_config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("Config error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(bind) = cli.bind {
        app_config.bind_addr = bind;
    }

    let bind_addr = app_config.bind_addr.clone();
    let state = server::AppState::from_config(app_config);
    let router = server::create_router(state);

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    info!("Listening on {}", bind_addr);

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
