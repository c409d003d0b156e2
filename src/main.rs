mod cli;
mod telemetry;

use std::process::ExitCode;

use ai_llm_service::LlmService;
use clap::Parser;
use colored::Colorize;
use mr_reviewer::{ReviewRun, run_review};
use tracing::error;

use crate::cli::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine: CI usually passes plain env vars.
    dotenvy::dotenv().ok();

    let args = Args::parse();

    if let Err(e) = telemetry::init() {
        eprintln!("failed to initialize logging: {e}");
    }

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let llm = LlmService::from_config(args.llm_config())?;
    let cfg = args.review_config();

    let run = match run_review(&cfg, &llm).await {
        Ok(run) => run,
        Err(e) => {
            if e.is_auth_failure() {
                eprintln!(
                    "{}",
                    "GitLab rejected the token; check GITLAB_PRIVATE_TOKEN (needs read_api scope)."
                        .yellow()
                );
            }
            return Err(e.into());
        }
    };

    match run {
        ReviewRun::NoMatchingFiles => {
            println!("{}", "No matching files found in this MR.".yellow());
        }
        ReviewRun::ModelFailed { error } => {
            println!("{} {error}", "LLM analysis failed:".red());
        }
        ReviewRun::Completed {
            outcome,
            report_path,
        } => {
            let status = if outcome.is_ok {
                "PASSED".green().bold()
            } else {
                "FAILED".red().bold()
            };
            println!("\n{} {status}", "MR Review Status:".bold());
            println!("{}", "-".repeat(50));
            println!("{}", outcome.report);
            println!("{}", "-".repeat(50));
            println!("Report saved to {}", report_path.display());
        }
    }
    Ok(())
}
