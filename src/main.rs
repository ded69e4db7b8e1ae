//! Gateway Probe - Authentication Gateway Security Test Harness
//!
//! A CLI tool that probes an external authentication gateway for injection,
//! authentication bypass, token forgery, and abuse-resistance weaknesses.
//! The gateway is treated as a black box: every scenario sends a crafted
//! request and asserts the response falls within a security-safe range.
//!
//! ## Usage
//!
//! ```bash
//! # Run the full scenario catalog
//! gateway-probe scan --base-url http://localhost:8080
//!
//! # Run one scenario
//! gateway-probe scan --scenario 10
//!
//! # Run one attack family, skipping the slow recovery probe
//! gateway-probe scan --category abuse --skip 20
//!
//! # List available scenarios
//! gateway-probe list --detailed
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use gateway_probe::{cli, config, dataset, models, output, runner};

use cli::Args;
use config::{EnvConfig, ProbeConfig};
use dataset::TestDataset;
use models::Scenario;
use output::{OutputFormat, ResultFormatter};
use runner::ScenarioRunner;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    match args.command {
        cli::Command::Scan(scan_args) => {
            run_scan(scan_args).await?;
        }
        cli::Command::List(list_args) => {
            list_scenarios(list_args);
        }
        cli::Command::Env => {
            config::print_env_help();
        }
    }

    Ok(())
}

async fn run_scan(args: cli::ScanArgs) -> Result<()> {
    let env = EnvConfig::load();

    let mut config = ProbeConfig::from_env(&env);
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }

    let data_dir = args.data_dir.clone().or_else(|| env.data_dir.clone());
    let dataset = TestDataset::load_or_builtin(data_dir.as_deref())?;

    info!("Probing gateway at {}", config.base_url);

    let format = OutputFormat::from_str(&args.format)
        .or_else(|| env.format.as_deref().and_then(OutputFormat::from_str))
        .unwrap_or(OutputFormat::Table);

    let mut formatter = ResultFormatter::new(format);
    if args.no_color {
        formatter = formatter.no_color();
    }

    let targets = if let Some(number) = args.scenario {
        let scenario = Scenario::from_number(number)
            .ok_or_else(|| anyhow::anyhow!("Invalid scenario number: {number}"))?;
        vec![scenario]
    } else if let Some(category) = &args.category {
        let scenarios = Scenario::in_category(category);
        if scenarios.is_empty() {
            anyhow::bail!(
                "Unknown category: {category}. Use injection, unauthorized, oauth, jwt, or abuse."
            );
        }
        scenarios
    } else {
        Scenario::all()
    };

    let runner = ScenarioRunner::new(config, dataset)?.with_skip(args.skip_numbers());
    let summary = runner.run_scenarios(&targets).await;

    let report = formatter.format_summary(&summary);
    println!("{report}");

    if format == OutputFormat::Table && !summary.is_clean() {
        println!("{}", formatter.format_failures(&summary));
    }

    if let Some(output_path) = &args.output {
        std::fs::write(output_path, &report)?;
        println!("Report saved to: {output_path}");
    }

    if !summary.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}

fn list_scenarios(args: cli::ListArgs) {
    println!("\nGateway Security Probe Scenarios (24 total)\n");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut current_category = "";

    for scenario in Scenario::all() {
        let category = scenario.category();
        if category != current_category {
            if !current_category.is_empty() {
                println!();
            }
            println!("\n{category} Scenarios:");
            println!("──────────────────────────────────────────────────────────────────────");
            current_category = category;
        }

        if args.detailed {
            println!(
                "  {:2}. {:24} [{}]",
                scenario.number(),
                scenario.name(),
                scenario.category()
            );
        } else {
            println!("  {:2}. {}", scenario.number(), scenario.name());
        }
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}
