use anyhow::Result;
use clap::Parser;
use tfwork::{cli, logger};
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logger::init(cli.verbose)?;
    info!(version = env!("CARGO_PKG_VERSION"), "tfwork start");

    match cli::run(cli) {
        Ok(result) => {
            info!("tfwork finished successfully");
            Ok(result)
        }
        Err(err) => {
            error!(error = ?err, "tfwork failed");
            Err(err)
        }
    }
}
