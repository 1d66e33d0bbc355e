use std::process::ExitCode;

use chart_deploy::{commands, logging};

use clap::{Parser, Subcommand};
use tracing::error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Look up the deployment for DEPLOYMENT_TOKEN and release it with helm")]
    Deploy(commands::deploy::DeployArgs),

    #[command(about = "Run pre-flight checks")]
    Check(commands::check::CheckArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Commands::Deploy(args) => commands::deploy::run(args).await,
        Commands::Check(args) => commands::check::run(args).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
