//! ems-dispatch - EMS base and hospital destination planner
//!
//! # Usage
//!
//! ```bash
//! # Plan a dispatch for one patient
//! ems-dispatch dispatch --lat 14.65 --lon 121.10 --severity high --condition "Heart attack"
//!
//! # Dump hospitals and EMS bases for a map view
//! ems-dispatch maps
//!
//! # Check that the registries and models load
//! ems-dispatch health
//!
//! # Validate a config file and print the effective settings
//! ems-dispatch --config dispatch_config.toml check-config
//! ```
//!
//! # Environment Variables
//!
//! - `EMS_DISPATCH_CONFIG`: Path to the TOML config (default: ./dispatch_config.toml)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};

use ems_dispatch::{DispatchConfig, DispatchContext, RequestFailure};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "ems-dispatch")]
#[command(about = "EMS dispatch planner: nearest base, destination hospital, response time")]
#[command(version)]
struct CliArgs {
    /// Path to a dispatch_config.toml (overrides the search order)
    #[arg(short, long, env = "EMS_DISPATCH_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Plan a dispatch for a single patient and print the plan as JSON
    Dispatch {
        /// Patient latitude (decimal degrees)
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Patient longitude (decimal degrees)
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// low | medium | high
        #[arg(long)]
        severity: String,
        /// Condition label, e.g. "Heart attack"
        #[arg(long)]
        condition: String,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print every hospital and EMS base as JSON
    Maps,

    /// Load everything and print a health report
    Health,

    /// Validate the configuration and print the effective TOML
    CheckConfig,
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<DispatchConfig> {
    match path {
        Some(p) => DispatchConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => DispatchConfig::load().context("Failed to load dispatch configuration"),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_json);

    let config = load_config(args.config.as_ref())?;

    if let SubCommand::CheckConfig = args.command {
        info!(
            service = %config.service.name,
            region = %config.service.region_name,
            "Configuration valid"
        );
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let ctx = DispatchContext::from_config(&config)
        .context("Failed to initialise dispatch context")?;

    match args.command {
        SubCommand::Dispatch {
            lat,
            lon,
            severity,
            condition,
            pretty,
        } => match ctx.dispatch_raw(lat, lon, &severity, &condition) {
            Ok(plan) => print_json(&plan, pretty)?,
            Err(RequestFailure::Invalid(e)) => {
                error!(error = %e, "Rejected dispatch request");
                anyhow::bail!("invalid request: {}", e);
            }
            Err(RequestFailure::Dispatch(e)) => {
                error!(error = %e, class = ?e.class(), "Dispatch failed");
                return Err(e).context("Dispatch failed");
            }
        },
        SubCommand::Maps => print_json(&ctx.maps(), true)?,
        SubCommand::Health => print_json(&ctx.health(), true)?,
        SubCommand::CheckConfig => {}
    }

    Ok(())
}
