//! Pipeline entry point: deploy only, configured entirely from the environment.

use std::process::ExitCode;

use chart_deploy::{commands, logging};

use clap::Parser;
use tracing::error;

#[derive(Parser)]
#[command(author, version, about = "Release the deployment identified by DEPLOYMENT_TOKEN")]
struct Cli {
    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,

    #[command(flatten)]
    deploy: commands::deploy::DeployArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    match commands::deploy::run(cli.deploy).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
