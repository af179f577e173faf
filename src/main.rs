use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use configuration::{Config, FraudProfile, load_config};
use core_types::WorkloadKind;
use engine::error::EngineError;
use engine::{ComputeEngine, WorkloadOutcome, WorkloadRequest};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Amount used for every fraud request fired by the stress command.
const STRESS_AMOUNT: Decimal = dec!(5000);
/// Balance used for every risk and portfolio request fired by the stress command.
const STRESS_BALANCE: Decimal = dec!(10000);

/// The main entry point for the riskbench workload engine.
#[tokio::main]
async fn main() -> Result<()> {
    // Load RISKBENCH_* overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();
    let mut config = load_config(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    // Execute the appropriate command
    match cli.command {
        Commands::Fraud(args) => {
            if let Some(profile) = args.profile {
                config.fraud.profile = profile;
                config.fraud.threshold = None;
            }
            let engine = ComputeEngine::new(&config)?;
            print_outcome(&WorkloadOutcome::Fraud(
                engine.check_fraud(args.account, args.amount)?,
            ))?;
        }
        Commands::Risk(args) => {
            let engine = ComputeEngine::new(&config)?;
            print_outcome(&WorkloadOutcome::Risk(
                engine.assess_risk(args.account, args.balance)?,
            ))?;
        }
        Commands::Portfolio(args) => {
            let engine = ComputeEngine::new(&config)?;
            print_outcome(&WorkloadOutcome::Portfolio(
                engine.optimize_portfolio(args.account, args.balance)?,
            ))?;
        }
        Commands::Primes(args) => {
            let engine = ComputeEngine::new(&config)?;
            print_outcome(&WorkloadOutcome::Primes(
                engine.search_primes(args.account, args.range)?,
            ))?;
        }
        Commands::PrimeAccount(args) => {
            let engine = ComputeEngine::new(&config)?;
            print_outcome(&WorkloadOutcome::PrimeAccount(
                engine.check_prime_account(args.account)?,
            ))?;
        }
        Commands::Stress(args) => {
            handle_stress(args, &config).await?;
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Runs CPU-heavy financial analytics workloads on a bounded worker pool.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single transaction for fraud.
    Fraud(FraudArgs),
    /// Run the Monte-Carlo risk assessment for an account balance.
    Risk(BalanceArgs),
    /// Optimise a 20-asset portfolio for an account.
    Portfolio(BalanceArgs),
    /// List the primes in an account's search window.
    Primes(PrimesArgs),
    /// Check whether an account's nth prime is odd.
    PrimeAccount(AccountArgs),
    /// Fire many concurrent requests at one shared engine.
    Stress(StressArgs),
}

#[derive(Parser)]
struct FraudArgs {
    #[arg(long)]
    account: u64,
    /// The transaction amount (e.g., "250.75").
    #[arg(long)]
    amount: Decimal,
    /// Overrides the configured threshold with a named preset.
    #[arg(long, value_enum)]
    profile: Option<FraudProfile>,
}

#[derive(Parser)]
struct BalanceArgs {
    #[arg(long)]
    account: u64,
    /// The account balance (e.g., "10000.00").
    #[arg(long)]
    balance: Decimal,
}

#[derive(Parser)]
struct PrimesArgs {
    #[arg(long)]
    account: u64,
    /// Width of the search window.
    #[arg(long)]
    range: usize,
}

#[derive(Parser)]
struct AccountArgs {
    #[arg(long)]
    account: u64,
}

#[derive(Parser)]
struct StressArgs {
    /// Number of concurrent requests. Defaults to `stress.requests` from the config.
    #[arg(long)]
    requests: Option<usize>,
    /// Which workload to fire.
    #[arg(long, value_enum, default_value_t = StressWorkload::Mixed)]
    workload: StressWorkload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StressWorkload {
    Fraud,
    Risk,
    Portfolio,
    Primes,
    PrimeAccount,
    /// Cycles through every workload kind.
    Mixed,
}

impl StressWorkload {
    fn kind_for(&self, index: usize) -> WorkloadKind {
        match self {
            StressWorkload::Fraud => WorkloadKind::Fraud,
            StressWorkload::Risk => WorkloadKind::Risk,
            StressWorkload::Portfolio => WorkloadKind::Portfolio,
            StressWorkload::Primes => WorkloadKind::Primes,
            StressWorkload::PrimeAccount => WorkloadKind::PrimeAccount,
            StressWorkload::Mixed => WorkloadKind::ALL[index % WorkloadKind::ALL.len()],
        }
    }
}

/// Serializes an outcome as pretty JSON on stdout.
fn print_outcome(outcome: &WorkloadOutcome) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(())
}

// ==============================================================================
// Stress Command Logic
// ==============================================================================

fn build_request(kind: WorkloadKind, account_id: u64, prime_range: usize) -> WorkloadRequest {
    match kind {
        WorkloadKind::Fraud => WorkloadRequest::Fraud {
            account_id,
            amount: STRESS_AMOUNT,
        },
        WorkloadKind::Risk => WorkloadRequest::Risk {
            account_id,
            balance: STRESS_BALANCE,
        },
        WorkloadKind::Portfolio => WorkloadRequest::Portfolio {
            account_id,
            balance: STRESS_BALANCE,
        },
        WorkloadKind::Primes => WorkloadRequest::Primes {
            account_id,
            range_size: prime_range,
        },
        WorkloadKind::PrimeAccount => WorkloadRequest::PrimeAccount { account_id },
    }
}

/// Tallies of a stress run.
#[derive(Debug, Default)]
struct StressSummary {
    ok: usize,
    saturated: usize,
    failed: usize,
    computation_times: Vec<u64>,
}

impl StressSummary {
    fn record(&mut self, result: &Result<WorkloadOutcome, EngineError>) {
        match result {
            Ok(outcome) => {
                self.ok += 1;
                self.computation_times.push(outcome.computation_time_nanos());
            }
            Err(e) if e.is_transient() => self.saturated += 1,
            Err(_) => self.failed += 1,
        }
    }

    fn min_nanos(&self) -> Option<u64> {
        self.computation_times.iter().copied().min()
    }

    fn max_nanos(&self) -> Option<u64> {
        self.computation_times.iter().copied().max()
    }

    fn mean_nanos(&self) -> Option<u64> {
        if self.computation_times.is_empty() {
            return None;
        }
        let total: u128 = self.computation_times.iter().map(|&t| u128::from(t)).sum();
        u64::try_from(total / self.computation_times.len() as u128).ok()
    }

    fn to_table(&self) -> Table {
        let millis = |nanos: Option<u64>| {
            nanos.map_or_else(|| "-".to_string(), |n| format!("{:.3}", n as f64 / 1e6))
        };

        let mut table = Table::new();
        table.set_header(vec!["Metric", "Value"]);
        table.add_row(vec!["ok".to_string(), self.ok.to_string()]);
        table.add_row(vec!["saturated".to_string(), self.saturated.to_string()]);
        table.add_row(vec!["failed".to_string(), self.failed.to_string()]);
        table.add_row(vec!["min (ms)".to_string(), millis(self.min_nanos())]);
        table.add_row(vec!["mean (ms)".to_string(), millis(self.mean_nanos())]);
        table.add_row(vec!["max (ms)".to_string(), millis(self.max_nanos())]);
        table
    }
}

/// Fires concurrent requests at one shared engine and prints a summary table.
async fn handle_stress(args: StressArgs, config: &Config) -> Result<()> {
    let requests = args.requests.unwrap_or(config.stress.requests);
    let engine = Arc::new(ComputeEngine::new(config)?);
    println!(
        "Starting stress run: {} {:?} requests on {} workers (capacity {})",
        requests,
        args.workload,
        config.pool.workers,
        config.pool.workers + config.pool.queue_capacity
    );

    // Set up the progress bar
    let progress_bar = ProgressBar::new(requests as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );

    // The engine blocks its caller until the fan-in completes, so every request
    // gets its own blocking thread.
    let tasks: Vec<_> = (0..requests)
        .map(|index| {
            let engine = Arc::clone(&engine);
            let pb_clone = progress_bar.clone();
            let kind = args.workload.kind_for(index);
            let request = build_request(
                kind,
                config.stress.base_account_id + index as u64,
                config.stress.prime_range,
            );

            tokio::task::spawn_blocking(move || {
                let result = engine.execute(request);
                pb_clone.inc(1);
                pb_clone.set_message(format!("{kind} done"));
                result
            })
        })
        .collect();

    // Wait for all concurrent tasks to complete
    let results = join_all(tasks).await;
    progress_bar.finish_with_message("Stress run complete!");

    let mut summary = StressSummary::default();
    for result in results {
        match result {
            Ok(outcome) => {
                if let Err(e) = &outcome {
                    tracing::warn!(error = %e, "Request failed.");
                }
                summary.record(&outcome);
            }
            Err(e) => {
                eprintln!("A task panicked: {}", e);
                summary.failed += 1;
            }
        }
    }

    println!("{}", summary.to_table());
    tracing::info!(pool = ?engine.pool_stats(), "Pool state after stress run.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::PrimeAccountCheck;

    fn outcome(nanos: u64) -> Result<WorkloadOutcome, EngineError> {
        Ok(WorkloadOutcome::PrimeAccount(PrimeAccountCheck {
            account_id: 1,
            n: 1001,
            nth_prime: 7933,
            is_prime_account: true,
            computation_time_nanos: nanos,
        }))
    }

    #[test]
    fn mixed_workload_cycles_every_kind() {
        let kinds: Vec<_> = (0..6).map(|i| StressWorkload::Mixed.kind_for(i)).collect();
        assert_eq!(
            kinds,
            vec![
                WorkloadKind::Fraud,
                WorkloadKind::Risk,
                WorkloadKind::Portfolio,
                WorkloadKind::Primes,
                WorkloadKind::PrimeAccount,
                WorkloadKind::Fraud,
            ]
        );
        assert_eq!(StressWorkload::Risk.kind_for(3), WorkloadKind::Risk);
    }

    #[test]
    fn requests_carry_their_account() {
        let request = build_request(WorkloadKind::Primes, 42, 500);
        assert_eq!(request.kind(), WorkloadKind::Primes);
        assert_eq!(request.account_id(), 42);

        let check = build_request(WorkloadKind::PrimeAccount, 7, 500);
        assert_eq!(check, WorkloadRequest::PrimeAccount { account_id: 7 });
    }

    #[test]
    fn summary_tracks_timings_of_successes() {
        let mut summary = StressSummary::default();
        summary.record(&outcome(1_000));
        summary.record(&outcome(3_000));

        assert_eq!(summary.ok, 2);
        assert_eq!(summary.min_nanos(), Some(1_000));
        assert_eq!(summary.mean_nanos(), Some(2_000));
        assert_eq!(summary.max_nanos(), Some(3_000));
    }

    #[test]
    fn empty_summary_has_no_timings() {
        let summary = StressSummary::default();
        assert_eq!(summary.mean_nanos(), None);
        assert!(summary.to_table().to_string().contains("saturated"));
    }
}
