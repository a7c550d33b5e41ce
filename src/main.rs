use std::time::Duration;

mod config;
mod convert;
mod db;
mod error;
mod models;
mod pipeline;

use config::Config;
use convert::AksharamukhaClient;
use db::Repository;
use error::Result;
use pipeline::{run_backfill, run_crosslink};

const KNOWN_LANGS: &[&str] = &["Devanagari", "Kannada", "Malayalam", "Tamil", "Telugu"];

fn print_usage() {
    eprintln!("Usage: stotra-subtitler <source-language>");
    eprintln!("       stotra-subtitler --crosslink <target-language>");
    eprintln!("Languages: {}", KNOWN_LANGS.join(", "));
}

#[tokio::main]
async fn main() -> Result<()> {
    // Progress and outcome reporting goes to stdout for the operator
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Check for --crosslink flag (Devanagari -> target-script linking)
    let crosslink_target = if args.len() >= 3 && args[1] == "--crosslink" {
        Some(args[2].clone())
    } else {
        None
    };

    let source_lang = if crosslink_target.is_none() {
        args.get(1).filter(|a| !a.starts_with("--")).cloned()
    } else {
        None
    };

    if crosslink_target.is_none() && source_lang.is_none() {
        print_usage();
        std::process::exit(1);
    }

    // Load configuration; a missing store path aborts before any work
    let config = Config::load()?;
    let repository = Repository::new(config.db_path()?).await?;
    let converter = AksharamukhaClient::new(
        config.convert_api_base.clone(),
        Duration::from_secs(config.request_timeout_secs),
    );

    if let Some(target) = crosslink_target {
        let report = run_crosslink(&repository, &converter, &config, &target).await?;
        println!(
            "Cross-linked {} {} records ({} processed, {} skipped, {} errored)",
            report.updated, target, report.processed, report.skipped, report.errored
        );
    } else if let Some(lang) = source_lang {
        let report = run_backfill(&repository, &converter, &config, &lang).await?;
        println!(
            "Backfilled {} {} records ({} processed, {} skipped, {} errored)",
            report.updated, lang, report.processed, report.skipped, report.errored
        );
    }

    Ok(())
}
