use std::process::{Command, ExitCode};

use anyhow::{anyhow, Result};
use clap::Args;
use colored::*;

use super::args::ClusterArgs;
use crate::defaults::{HELM_BIN, TOKEN_ENV};
use crate::infra::db;
use crate::infra::process::SystemRunner;

#[derive(Args, Clone)]
pub struct CheckArgs {
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    #[command(flatten)]
    pub cluster: ClusterArgs,

    #[arg(long, env = "HELM_BIN", default_value = HELM_BIN)]
    pub helm: String,

    #[arg(long, help = "Skip the database round-trip")]
    pub skip_database: bool,
}

pub async fn run(args: CheckArgs) -> Result<ExitCode> {
    println!("{}", "Running Pre-flight Checks...".bold().blue());

    let mut all_passed = true;

    // 1. Tools
    println!("\n{}", "1. Dependencies".bold());
    for tool in [&args.cluster.kubectl, &args.helm] {
        if check_command(tool) {
            println!("  {} {} found.", "✔".green(), tool);
        } else {
            println!("  {} {} NOT found in PATH.", "✘".red(), tool);
            all_passed = false;
        }
    }

    // 2. Token
    println!("\n{}", "2. Deployment token".bold());
    match args.token.as_deref() {
        Some(t) if !t.is_empty() => println!("  {} {} is set.", "✔".green(), TOKEN_ENV),
        _ => println!("  {} {} is missing. Deploy will refuse to run.", "⚠".yellow(), TOKEN_ENV),
    }

    // 3. Database secret and connection
    println!("\n{}", "3. Database".bold());
    let store = args.cluster.store(SystemRunner);
    match store.credentials() {
        Ok(creds) => {
            println!(
                "  {} Secret {}/{} readable (host {}, database {}).",
                "✔".green(),
                args.cluster.secret_namespace,
                args.cluster.secret_name,
                creds.host,
                creds.dbname
            );

            if args.skip_database {
                println!("  {} Skipping connection check.", "⚠".yellow());
            } else {
                match db::ping(&creds).await {
                    Ok(()) => println!("  {} Connected to {}.", "✔".green(), creds.host),
                    Err(e) => {
                        println!("  {} {:#}", "✘".red(), e);
                        all_passed = false;
                    }
                }
            }
        }
        Err(e) => {
            println!("  {} {:#}", "✘".red(), e);
            all_passed = false;
        }
    }

    println!("\n{}", "Summary".bold());
    if all_passed {
        println!("{}", "All checks passed! Ready to deploy.".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{}", "Some checks failed. Please review above.".red().bold());
        Err(anyhow!("Pre-flight check failed."))
    }
}

fn check_command(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
