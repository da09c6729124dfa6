//! Print a month's cost allocation from a JSON ledger document.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};
use mockable::{Clock, DefaultClock};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use messbook::domain::ports::HouseholdRepository;
use messbook::domain::{BillingMonth, MonthlyReport, allocate_monthly_costs, find_orphaned_records};
use messbook::outbound::json_store::JsonLedgerStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Summary and per-member blocks.
    #[default]
    Text,
    /// The `MonthlyCosts` document.
    Json,
}

/// `monthly-report` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "monthly-report",
    about = "Split a month's shopping and rent across household members",
    version
)]
struct CliArgs {
    /// JSON ledger document to read.
    #[arg(long, value_name = "path")]
    ledger: Utf8PathBuf,
    /// Month as `YYYY-MM`; defaults to the current UTC month.
    #[arg(long, value_name = "YYYY-MM")]
    month: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    // stdout carries only the report.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| eyre!("initialise tracing: {err}"))?;
    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    let output = runtime.block_on(render(&args, &DefaultClock))?;
    print!("{output}");
    Ok(())
}

async fn render(args: &CliArgs, clock: &dyn Clock) -> Result<String> {
    let month = match &args.month {
        Some(raw) => BillingMonth::parse(raw.as_str()).wrap_err("invalid --month")?,
        None => BillingMonth::from_naive(clock.utc().date_naive()),
    };
    let store = JsonLedgerStore::open_existing(&args.ledger)
        .wrap_err_with(|| format!("open ledger {}", args.ledger))?;
    let ledger = store
        .load_ledger()
        .await
        .map_err(|err| eyre!("read ledger {}: {err}", args.ledger))?;

    let orphans = find_orphaned_records(&ledger, &month);
    if !orphans.is_empty() {
        warn!(
            %month,
            meal_entries = orphans.meal_entry_ids.len(),
            rent_payments = orphans.rent_payment_ids.len(),
            "records reference missing members"
        );
    }

    let costs = allocate_monthly_costs(&ledger, &month);
    match args.format {
        OutputFormat::Text => Ok(MonthlyReport::new(&costs).to_string()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&costs).wrap_err("encode costs")?;
            json.push('\n');
            Ok(json)
        }
    }
}
