//! Return series performance report CLI.
//!
//! Prints total, annualized, volatility, correlation and Sharpe tables for a
//! return series read from CSV, followed by its calendar return table.
//!
//! Usage: `perform FILE [--benchmark FILE]... [--risk-free FILE] [--freq F] [--method M] [--meta]`
//! Example: `cargo run --bin perform --features cli -- fund.csv --benchmark spy.csv --freq M`

use std::{
    env,
    error::Error,
    path::{Path, PathBuf},
    process,
};

use perform::{
    analytics::{
        AnnualizedReturnOptions, CorrelationOptions, ReturnSeries, SharpeOptions,
        TotalReturnOptions, VolatilityOptions,
    },
    primitives::{CompoundMethod, Frequency, Label},
    read_csv,
};
use polars::prelude::DataFrame;
use tracing::{info, warn};

const USAGE: &str =
    "Usage: perform FILE [--benchmark FILE]... [--risk-free FILE] [--freq F] [--method M] [--meta]";

/// Parsed command line.
#[derive(Debug)]
struct Args {
    subject: PathBuf,
    benchmarks: Vec<PathBuf>,
    risk_free: Option<PathBuf>,
    freq: Frequency,
    method: CompoundMethod,
    meta: bool,
}

fn main() {
    init_logging();

    let raw: Vec<String> = env::args().skip(1).collect();
    if raw.is_empty() || raw.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("{USAGE}");
        eprintln!("Example: perform fund.csv --benchmark spy.csv --freq M --meta");
        process::exit(1);
    }

    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(cfg!(debug_assertions))
        .init();
}

fn parse_args(raw: &[String]) -> Result<Args, Box<dyn Error>> {
    let mut subject = None;
    let mut benchmarks = Vec::new();
    let mut risk_free = None;
    let mut freq = Frequency::Monthly;
    let mut method = CompoundMethod::Geometric;
    let mut meta = false;

    let mut iter = raw.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next().cloned().ok_or_else(|| format!("{flag} requires a value"))
        };
        match arg.as_str() {
            "--benchmark" | "-b" => benchmarks.push(PathBuf::from(value(arg)?)),
            "--risk-free" | "-r" => risk_free = Some(PathBuf::from(value(arg)?)),
            "--freq" | "-f" => freq = value(arg)?.parse()?,
            "--method" | "-m" => method = value(arg)?.parse()?,
            "--meta" => meta = true,
            flag if flag.starts_with('-') => return Err(format!("unknown flag {flag}").into()),
            path if subject.is_none() => subject = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument {extra}").into()),
        }
    }

    let subject = subject.ok_or("missing return series FILE")?;
    Ok(Args { subject, benchmarks, risk_free, freq, method, meta })
}

/// Label a companion series by its file stem.
fn label_for(path: &Path) -> Option<Label> {
    path.file_stem().map(|stem| Label::new(stem.to_string_lossy()))
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut rs = ReturnSeries::from_frame(&read_csv(&args.subject)?)?;
    info!(
        series = rs.name(),
        observations = rs.series().len(),
        start = ?rs.series().start(),
        end = ?rs.series().end(),
        "loaded return series"
    );

    for path in &args.benchmarks {
        rs.add_benchmark_frame(&read_csv(path)?, label_for(path))?;
    }
    if let Some(path) = &args.risk_free {
        rs.add_risk_free_frame(&read_csv(path)?, label_for(path))?;
    }

    let total = rs.get_total_return(&TotalReturnOptions {
        method: args.method,
        meta: args.meta,
        ..Default::default()
    })?;
    print_table("Total return", &total.to_frame()?);

    let annualized = rs.get_annualized_return(&AnnualizedReturnOptions {
        method: args.method,
        meta: args.meta,
        ..Default::default()
    })?;
    print_table("Annualized return", &annualized.to_frame()?);

    let volatility = rs.get_annualized_volatility(&VolatilityOptions {
        freq: Some(args.freq),
        meta: args.meta,
        ..Default::default()
    })?;
    print_table("Annualized volatility", &volatility.to_frame()?);

    if rs.benchmarks().is_empty() {
        info!("no benchmarks given, skipping correlation");
    } else {
        let correlation = rs.get_correlation(&CorrelationOptions {
            freq: args.freq,
            meta: args.meta,
            ..Default::default()
        })?;
        print_table("Correlation", &correlation.to_frame()?);
    }

    let sharpe =
        rs.get_sharpe(&SharpeOptions { freq: args.freq, meta: args.meta, ..Default::default() })?;
    print_table("Sharpe ratio", &sharpe.to_frame()?);

    match rs.calendar_returns(args.method) {
        Ok(table) => print_table("Calendar returns", &table),
        Err(e) => warn!(error = %e, "skipping calendar returns"),
    }

    Ok(())
}

fn print_table(title: &str, df: &DataFrame) {
    println!("\n{title}");
    println!("{df}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn parses_flags() {
        let parsed = parse_args(&args(&[
            "fund.csv",
            "--benchmark",
            "spy.csv",
            "-b",
            "agg.csv",
            "--risk-free",
            "tbill.csv",
            "--freq",
            "W",
            "--method",
            "continuous",
            "--meta",
        ]))
        .unwrap();

        assert_eq!(parsed.subject, PathBuf::from("fund.csv"));
        assert_eq!(parsed.benchmarks.len(), 2);
        assert_eq!(parsed.risk_free, Some(PathBuf::from("tbill.csv")));
        assert_eq!(parsed.freq, Frequency::Weekly);
        assert_eq!(parsed.method, CompoundMethod::Continuous);
        assert!(parsed.meta);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(&args(&["--meta"])).is_err());
        assert!(parse_args(&args(&["fund.csv", "--method", "contnuuous"])).is_err());
        assert!(parse_args(&args(&["fund.csv", "--freq"])).is_err());
        assert!(parse_args(&args(&["fund.csv", "other.csv"])).is_err());
    }

    #[test]
    fn labels_from_file_stem() {
        assert_eq!(label_for(Path::new("data/spy.csv")), Some(Label::new("spy")));
    }
}
