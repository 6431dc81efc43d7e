//! Scaling probe for the trading optimizer.
//!
//! Runs each strategy family across growing series lengths, verifies
//! results against a full-table DP baseline below `--verify-limit`, and
//! reports wall time and RSS deltas in csv, table, or json form.

use std::env;
use std::time::Instant;

use sysinfo::{get_current_pid, ProcessRefreshKind, System};
use trade_dp::{evaluate, ConstraintConfig, PriceSeries, TransactionCap};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("trade_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("trade_probe: verifying up to n = {}", options.verify_limit);

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/4] unconstrained (greedy sweep)...");
    measurements.extend(run_family(
        "greedy",
        &[4_096, 16_384, 65_536, 262_144],
        ConstraintConfig::default(),
        &options,
        &mut sys,
    ));

    eprintln!("[2/4] capped at 8 transactions...");
    measurements.extend(run_family(
        "capped_8",
        &[1_024, 4_096, 16_384, 65_536],
        ConstraintConfig::builder().max_transactions(8).build().unwrap(),
        &options,
        &mut sys,
    ));

    eprintln!("[3/4] cooldown 2 + fee 0.5 (collapsed tabulation)...");
    measurements.extend(run_family(
        "cooldown_fee",
        &[1_024, 4_096, 16_384, 65_536],
        ConstraintConfig::builder().cooldown_days(2).fee(0.5).build().unwrap(),
        &options,
        &mut sys,
    ));

    eprintln!("[4/4] all three axes (cap 16, cooldown 1, fee 0.25)...");
    measurements.extend(run_family(
        "combined",
        &[1_024, 4_096, 16_384],
        ConstraintConfig::builder()
            .max_transactions(16)
            .cooldown_days(1)
            .fee(0.25)
            .build()
            .unwrap(),
        &options,
        &mut sys,
    ));

    print_summary(&measurements, &options);
    options.format.write(&measurements);
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 4_096usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = parse_limit(value)?;
            } else if arg == "--verify-limit" {
                let value: String = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = parse_limit(&value)?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin trade_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Maximum series length to verify against the full-table baseline (default: 4096)
  -h, --help                    Print this help message
"
        );
    }
}

fn parse_limit(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| "verify limit must be a positive integer".to_string())
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone)]
struct Measurement {
    scenario: &'static str,
    len: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    status: VerificationStatus,
    detail: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }
}

fn run_family(
    scenario: &'static str,
    sizes: &[usize],
    config: ConstraintConfig,
    options: &Options,
    sys: &mut System,
) -> Vec<Measurement> {
    sizes
        .iter()
        .enumerate()
        .map(|(idx, &len)| {
            eprint!("      [{}/{}] n = {len}... ", idx + 1, sizes.len());
            let prices = synthetic_walk(len);
            let series = PriceSeries::new(prices.clone()).expect("walk prices are finite");

            let before = rss_kib(sys);
            let start = Instant::now();
            let result = evaluate(&series, &config);
            let wall_s = start.elapsed().as_secs_f64();
            let rss_delta_kib = rss_kib(sys).saturating_sub(before);

            let (status, detail) = if len <= options.verify_limit {
                let baseline = full_table_profit(&prices, &config);
                if (result.max_profit - baseline).abs() <= 1e-6 {
                    (VerificationStatus::Passed, None)
                } else {
                    (
                        VerificationStatus::Failed,
                        Some(format!("baseline {baseline}, got {}", result.max_profit)),
                    )
                }
            } else {
                (VerificationStatus::NotChecked, None)
            };

            eprintln!(
                "profit = {:.2}, trades = {}, time = {:.3}s, status = {}",
                result.max_profit,
                result.trades.len(),
                wall_s,
                status.label()
            );

            Measurement {
                scenario,
                len,
                wall_s,
                rss_delta_kib,
                status,
                detail,
            }
        })
        .collect()
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    let passed = measurements
        .iter()
        .filter(|m| m.status == VerificationStatus::Passed)
        .count();
    let failed: Vec<&Measurement> = measurements
        .iter()
        .filter(|m| m.status == VerificationStatus::Failed)
        .collect();
    let unchecked = measurements.len() - passed - failed.len();

    eprintln!();
    eprintln!(
        "Summary: {} runs, {} passed, {} failed, {} above the verify limit ({})",
        measurements.len(),
        passed,
        failed.len(),
        unchecked,
        options.verify_limit
    );
    for m in &failed {
        eprintln!(
            "  FAILED {} n={}: {}",
            m.scenario,
            m.len,
            m.detail.as_deref().unwrap_or("")
        );
    }
    eprintln!();
}

fn write_csv(measurements: &[Measurement]) {
    println!("scenario,len,wall_s,rss_delta_kib,status,detail");
    for m in measurements {
        let detail = m.detail.as_deref().unwrap_or("").replace('"', "'");
        println!(
            "{},{},{:.4},{},{},\"{}\"",
            m.scenario,
            m.len,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            detail
        );
    }
}

fn write_table(measurements: &[Measurement]) {
    let col = measurements
        .iter()
        .map(|m| m.scenario.len())
        .max()
        .unwrap_or(8)
        .max("scenario".len());
    println!(
        "{:<col$}  {:>8}  {:>10}  {:>14}  {:>12}",
        "scenario", "len", "wall_s", "rss_delta_kib", "status"
    );
    for m in measurements {
        println!(
            "{:<col$}  {:>8}  {:>10.4}  {:>14}  {:>12}",
            m.scenario,
            m.len,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label()
        );
    }
}

fn write_json(measurements: &[Measurement]) {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = match &m.detail {
            Some(d) => format!("\"{}\"", d.replace('"', "'")),
            None => "null".to_string(),
        };
        println!(
            "  {{\"scenario\":\"{}\",\"len\":{},\"wall_s\":{:.4},\"rss_delta_kib\":{},\"status\":\"{}\",\"detail\":{}}}{}",
            m.scenario,
            m.len,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            detail,
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory()
    } else {
        0
    }
}

/// Deterministic pseudo-random walk (xorshift), no external RNG needed.
fn synthetic_walk(len: usize) -> Vec<f64> {
    let mut state = 0x9e37_79b9_7f4a_7c15u64;
    let mut price = 100.0f64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let step = ((state % 2_001) as f64 - 1_000.0) / 1_000.0;
            price += step;
            price
        })
        .collect()
}

/// Full-table DP baseline mirroring the published recurrence with float
/// sentinels; tracks the transaction dimension even for unbounded caps.
fn full_table_profit(prices: &[f64], config: &ConstraintConfig) -> f64 {
    let n = prices.len();
    if n < 2 {
        return 0.0;
    }
    let k = match config.max_transactions() {
        TransactionCap::AtMost(k) => k.min(n / 2).max(1),
        TransactionCap::Unbounded => n / 2,
    };
    let cooldown = config.cooldown_days();
    let fee = config.fee();
    let neg = f64::NEG_INFINITY;

    let mut hold = vec![neg; k + 1];
    let mut rest = vec![neg; k + 1];
    let mut cool = vec![vec![neg; cooldown + 1]; k + 1];
    rest[0] = 0.0;
    hold[1] = -prices[0];

    for &p in &prices[1..] {
        let prev_hold = hold.clone();
        let prev_rest = rest.clone();
        let prev_cool = cool.clone();
        for t in 1..=k {
            hold[t] = prev_hold[t].max(prev_rest[t - 1] - p);
        }
        for t in 0..=k {
            let sale = prev_hold[t] + p - fee;
            let arrival = if cooldown == 0 { sale } else { prev_cool[t][1] };
            rest[t] = prev_rest[t].max(arrival);
            for d in 1..cooldown {
                cool[t][d] = prev_cool[t][d + 1];
            }
            if cooldown > 0 {
                cool[t][cooldown] = sale;
            }
        }
    }

    let mut best = 0.0f64;
    for t in 0..=k {
        best = best.max(rest[t]);
        for d in 1..=cooldown {
            best = best.max(cool[t][d]);
        }
    }
    best
}
