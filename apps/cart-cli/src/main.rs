//! # rocket-cart
//!
//! ```text
//! rocket-cart [--config PATH] show
//! rocket-cart [--config PATH] add ID
//! rocket-cart [--config PATH] remove ID
//! rocket-cart [--config PATH] update ID AMOUNT
//! ```
//!
//! Exit codes: 0 committed or nothing to do, 1 rejected, 2 startup failure.

use std::process::ExitCode;

use clap::Parser;
use rocket_cart_cli::{init_tracing, run, Cli};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let report = match run(cli).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "rocket-cart failed");
            return ExitCode::from(2);
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!(error = %e, "Failed to render report");
            return ExitCode::from(2);
        }
    }

    if report.is_rejected() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
