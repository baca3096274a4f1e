//! Discussion Client Main Entry Point
//!
//! Runs one command against the discussion core and prints the result as JSON.

use std::env;

use discussion_client::commands::run;
use discussion_client::{ClientConfig, ClientError, Command, Dependencies};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
///
/// Logs go to stderr so stdout carries only command output.
fn init_tracing() -> Result<(), ClientError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("discussion_client=info,discussion_core=info"));

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| ClientError::Tracing(e.to_string()))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .pretty(),
            )
            .try_init()
            .map_err(|e| ClientError::Tracing(e.to_string()))?;
    }

    info!(
        service_name = "discussion-client",
        service_version = env!("CARGO_PKG_VERSION"),
        json,
        "Tracing initialized"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    dotenv().ok();
    init_tracing()?;

    let args: Vec<String> = env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let deps = match ClientConfig::from_env().and_then(Dependencies::new) {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match run(command, &deps).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            Err(e)
        }
    }
}
