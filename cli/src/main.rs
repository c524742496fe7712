//! BIG-IQ regkey license assignment
//!
//! Assigns a registration key from a BIG-IQ regkey pool to a BIG-IP, or
//! revokes it, and prints the result as JSON on stdout. Logs go to stderr.
//!
//! Usage:
//!   bigiq-regkey --server bigiq.example.com --user admin --password secret \
//!     --pool my-regkey-pool --key XXXX-XXXX-XXXX-XXXX-XXXX \
//!     --device 1.1.1.1 --managed false \
//!     --device-username admin --device-password secret

use std::process::ExitCode;
use anyhow::Result;
use bigiq_regkey::RegkeyError;
use bigiq_regkey_cli::{Args, Settings, failure_result, run};
use clap::Parser;
use serde_json::Value;
use tracing::{Level, error, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match execute(args).await {
        Ok(result) => {
            println!("{result}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            if let Some(RegkeyError::Rest(rest)) = err.downcast_ref::<RegkeyError>()
                && rest.is_auth_failure()
            {
                warn!("Check the BIG-IQ user, password and auth provider");
            }
            println!("{}", failure_result(&err));
            ExitCode::FAILURE
        }
    }
}

async fn execute(args: Args) -> Result<Value> {
    let settings = Settings::from_args(args)?;
    let outcome = run(&settings).await?;
    Ok(serde_json::to_value(outcome)?)
}
