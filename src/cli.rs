//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::{write_trades, CsvTradeSource};
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{
    validate_allocation_fraction, validate_starting_cash, SIMULATION_SECTION,
};
use crate::domain::error::CashtrackError;
use crate::domain::sample::sample_trades;
use crate::domain::simulation::{
    simulate_records, SimulationConfig, SimulationResult, DEFAULT_STARTING_CASH,
};
use crate::domain::sizing::DEFAULT_ALLOCATION_FRACTION;
use crate::domain::summary::RunSummary;
use crate::domain::trade::validate_records;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;
use crate::ports::trade_source::TradeSource;

const DEFAULT_SAMPLE_PATH: &str = "sample_trades.csv";

#[derive(Parser, Debug)]
#[command(
    name = "cashtrack",
    about = "Daily cash balance tracker for fractional position sizing"
)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate daily cash balances for a trades CSV
    Simulate {
        #[arg(short, long)]
        trades: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        #[arg(long)]
        starting_cash: Option<f64>,
        #[arg(long)]
        fraction: Option<f64>,
    },
    /// Write the built-in sample trades to a CSV file
    Sample {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Load and validate a trades CSV without simulating
    Validate {
        #[arg(short, long)]
        trades: PathBuf,
    },
}

/// Install the stderr log subscriber. Safe to call more than once.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            trades,
            config,
            output_dir,
            starting_cash,
            fraction,
        } => run_simulate(
            &trades,
            config.as_ref(),
            output_dir.as_ref(),
            starting_cash,
            fraction,
        ),
        Command::Sample { output } => run_sample(output.as_ref()),
        Command::Validate { trades } => run_validate(&trades),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = CashtrackError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Build the simulation config from file values, then apply command-line
/// overrides. File values are only checked for keys that are not overridden.
pub fn build_simulation_config(
    adapter: &dyn ConfigPort,
    starting_cash: Option<f64>,
    fraction: Option<f64>,
) -> Result<SimulationConfig, CashtrackError> {
    if starting_cash.is_none() {
        validate_starting_cash(adapter)?;
    }
    if fraction.is_none() {
        validate_allocation_fraction(adapter)?;
    }

    let config = SimulationConfig::new(
        starting_cash.unwrap_or_else(|| {
            adapter.get_double(SIMULATION_SECTION, "starting_cash", DEFAULT_STARTING_CASH)
        }),
        fraction.unwrap_or_else(|| {
            adapter.get_double(
                SIMULATION_SECTION,
                "allocation_fraction",
                DEFAULT_ALLOCATION_FRACTION,
            )
        }),
    );
    config.validate()?;
    Ok(config)
}

pub fn resolve_output_dir(output_override: Option<&PathBuf>, config: &dyn ConfigPort) -> PathBuf {
    if let Some(dir) = output_override {
        return dir.clone();
    }
    config
        .get_string("output", "directory")
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load, simulate and report. Returns the result for callers that need it.
pub fn run_simulation_pipeline(
    source: &dyn TradeSource,
    report: &dyn ReportPort,
    config: &SimulationConfig,
    output_dir: &Path,
) -> Result<(SimulationResult, RunSummary, Vec<PathBuf>), CashtrackError> {
    let records = source.load_trades()?;
    info!(records = records.len(), "loaded trades");

    let result = simulate_records(&records, config)?;
    let summary = RunSummary::compute(&result, config.starting_cash);
    let written = report.write(&result, output_dir)?;
    Ok((result, summary, written))
}

fn run_simulate(
    trades_path: &PathBuf,
    config_path: Option<&PathBuf>,
    output_override: Option<&PathBuf>,
    starting_cash: Option<f64>,
    fraction: Option<f64>,
) -> ExitCode {
    let adapter = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            match load_config(path) {
                Ok(a) => a,
                Err(code) => return code,
            }
        }
        None => FileConfigAdapter::empty(),
    };

    let config = match build_simulation_config(&adapter, starting_cash, fraction) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let output_dir = resolve_output_dir(output_override, &adapter);

    eprintln!("Loading trades from {}", trades_path.display());
    let source = CsvTradeSource::new(trades_path.clone());

    match run_simulation_pipeline(&source, &CsvReportAdapter, &config, &output_dir) {
        Ok((result, summary, written)) => {
            print_summary(&summary, &config);
            if !result.warnings.is_empty() {
                eprintln!("\n=== Rejected Trades ===");
                for warning in &result.warnings {
                    eprintln!("  {warning}");
                }
            }
            eprintln!();
            for path in &written {
                eprintln!("Wrote {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn print_summary(summary: &RunSummary, config: &SimulationConfig) {
    eprintln!("\n=== Summary ===");
    eprintln!(
        "Allocation:            {:.1}% of cash per trade",
        config.allocation_fraction * 100.0
    );
    eprintln!("Starting Cash:         ${:.2}", summary.starting_cash);
    eprintln!("Final Portfolio Value: ${:.2}", summary.final_portfolio_value);
    eprintln!("Total Return:          {:.2}%", summary.total_return_pct);
    eprintln!("Total P&L:             ${:.2}", summary.total_pnl);
    eprintln!("Total Trades:          {}", summary.total_trades);
    eprintln!("Winning Trades:        {}", summary.winning_trades);
    eprintln!("Win Rate:              {:.1}%", summary.win_rate_pct);
    eprintln!("Average P&L per Trade: ${:.2}", summary.avg_pnl);
    eprintln!("Rejected Trades:       {}", summary.rejected_trades);
    eprintln!("Number of Days:        {}", summary.days);
    eprintln!("Maximum Cash Balance:  ${:.2}", summary.max_cash_balance);
    eprintln!("Minimum Cash Balance:  ${:.2}", summary.min_cash_balance);
    eprintln!("Max Active Positions:  {}", summary.max_active_positions);
}

fn run_sample(output: Option<&PathBuf>) -> ExitCode {
    let path = output
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SAMPLE_PATH));
    let trades = sample_trades();

    match write_trades(&path, &trades) {
        Ok(()) => {
            eprintln!("Wrote {} sample trades to {}", trades.len(), path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(trades_path: &PathBuf) -> ExitCode {
    eprintln!("Validating trades: {}", trades_path.display());
    let records = match CsvTradeSource::new(trades_path.clone()).load_trades() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let batch = validate_records(&records);
    for warning in &batch.warnings {
        eprintln!("  rejected: {warning}");
    }
    println!(
        "{} valid trades, {} rejected",
        batch.trades.len(),
        batch.warnings.len()
    );
    ExitCode::SUCCESS
}
