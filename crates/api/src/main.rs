//! mspdash - MSP billing dashboard
//!
//! Computes monthly invoices and the client dashboard from the encrypted
//! billing store and prints them as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::{Parser, Subcommand};
use mspdash_infra::config;
use mspdash_lib::utils::logging::init_tracing;
use mspdash_lib::{
    compute_dashboard, compute_invoice, dashboard_page, get_app_health, init_database,
    AppContext, DashboardPageRequest,
};
use serde::Serialize;
use tracing::{debug, info};

/// mspdash - MSP billing dashboard
#[derive(Parser, Debug)]
#[command(name = "mspdash")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (JSON or TOML); environment variables are used when absent
    #[arg(short, long, env = "MSPDASH_CONFIG")]
    config: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute one client's invoice for a billing month
    Invoice {
        /// Client account number
        account_number: String,

        /// Billing year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Billing month 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,
    },

    /// Show the client dashboard for the current month
    Dashboard {
        /// Case-insensitive match on client name or account number
        #[arg(short, long)]
        search: Option<String>,

        /// Column to sort by (name, bill, hours, workstations, ...)
        #[arg(long)]
        sort_by: Option<String>,

        /// asc or desc
        #[arg(long)]
        sort_order: Option<String>,

        /// 1-based page number
        #[arg(long)]
        page: Option<u32>,

        /// Rows per page
        #[arg(long)]
        per_page: Option<u32>,

        /// Print every row without search or pagination
        #[arg(long, conflicts_with_all = ["search", "page", "per_page"])]
        all: bool,
    },

    /// Create or verify the database schema
    InitDb,

    /// Report database and configuration health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads MSPDASH_CONFIG.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) => debug!(error = %e, "no .env file loaded"),
    }

    let app_config = match &cli.config {
        Some(path) => config::load_from_file(Some(path.clone())),
        None => config::load(),
    }
    .context("failed to load configuration")?;

    let ctx = Arc::new(
        AppContext::new_with_config(app_config)
            .await
            .context("failed to initialise application context")?,
    );
    info!("mspdash ready");

    match cli.command {
        Commands::Invoice { account_number, year, month } => {
            let today = Utc::now().date_naive();
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());
            print_json(&compute_invoice(&ctx, account_number, year, month).await?)
        }
        Commands::Dashboard { sort_by, sort_order, all: true, .. } => {
            print_json(&compute_dashboard(&ctx, sort_by, sort_order).await?)
        }
        Commands::Dashboard { search, sort_by, sort_order, page, per_page, all: false } => {
            let request = DashboardPageRequest { search, sort_by, sort_order, page, per_page };
            print_json(&dashboard_page(&ctx, request).await?)
        }
        Commands::InitDb => print_json(&init_database(&ctx).await?),
        Commands::Health => {
            let report = get_app_health(&ctx).await;
            print_json(&report)?;
            if report.is_healthy {
                Ok(())
            } else {
                anyhow::bail!(report.message.unwrap_or_else(|| "unhealthy".to_string()))
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
