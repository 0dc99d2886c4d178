//! Certificate Verification Platform - command line client
//!
//! Verifies certificates by public ID and lets administrators manage them
//! through the certificate backend.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use certificate_client::cli::Cli;
use certificate_client::handlers::{self, AppState};
use certificate_client::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "certctl=info,certificate_client=info,reqwest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    tracing::debug!(
        environment = %config.environment,
        api = %config.api.base_url,
        "configuration loaded"
    );

    let state = AppState::new(config);
    match handlers::run(&state, cli.command).await {
        Ok(reply) => {
            println!("{}", reply.render(cli.json)?);
            Ok(())
        }
        Err(err) => {
            tracing::debug!(error = %err, code = err.code(), "command failed");
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&err.to_response())?);
            } else {
                eprintln!("{}", err.user_message());
            }
            std::process::exit(1);
        }
    }
}
