use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use balance_forecast::{ChartData, Config, horizon_days, report};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    /// Balance at the end of every day
    Table,
    /// Upcoming payments and every payment as it lands
    Events,
    /// Chart data for an external plotter
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "balance-forecast", about = "Project a cash balance forward from scheduled payments")]
struct Cli {
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
    #[arg(long, help = "Horizon in 30-day months; overrides the config file")]
    months: Option<u32>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    let currency_symbol = config.currency_symbol.clone();

    let mut params = config.into_params().context("Invalid configuration")?;
    if let Some(months) = cli.months {
        params.num_days = horizon_days(months)?;
    }
    info!("Projecting {} days from {}", params.num_days, params.start_date);

    let result = params.run().context("Simulation failed")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Table => {
            report::write_table(&mut out, &result, params.start_balance, &currency_symbol)?
        }
        OutputFormat::Events => report::write_events(
            &mut out,
            &params.payments,
            &result,
            params.start_balance,
            &currency_symbol,
        )?,
        OutputFormat::Json => writeln!(out, "{}", ChartData::from_result(&result).to_json()?)?,
    }
    out.flush()?;
    Ok(())
}
