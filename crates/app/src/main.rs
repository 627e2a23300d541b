//! Gigboard API client - command-line entry point.

mod cli;
mod context;
mod error;

use std::process::ExitCode;

use clap::Parser;
use gigboard_domain::Locale;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::context::AppContext;
use crate::error::AppError;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let locale = std::env::var("LANG").map_or(Locale::English, |tag| Locale::from_language_tag(&tag));

    let result = tokio::select! {
        result = run(cli) => result,
        _ = tokio::signal::ctrl_c() => Err(AppError::Interrupted),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {}", e.user_message(locale));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let ctx = AppContext::from_env()?;
    tracing::debug!("Gigboard v{}", env!("CARGO_PKG_VERSION"));
    cli::run(cli.command, &ctx).await
}
