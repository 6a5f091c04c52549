use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use nw_rust::dist::{self, AnomalyLog, CostModel};
use nw_rust::io::fasta;

#[derive(Parser, Debug)]
#[command(name = "nw-rust", author, version, about = "Weighted Needleman-Wunsch edit distance over FASTA sequences", arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Engine {
    /// Top-down recursion with a full memo table
    Memo,
    /// Bottom-up linear-space scan (default)
    Iter,
    /// Cache-aware fixed-size tiling
    Blocked,
    /// Cache-oblivious recursive bisection
    Oblivious,
}

#[derive(clap::Args, Debug)]
struct CommonOpts {
    /// First FASTA file (first record is used)
    seq_a: PathBuf,
    /// Second FASTA file (first record is used)
    seq_b: PathBuf,
    /// Substitution cost between mismatching known bases
    #[arg(long = "substitution", default_value_t = 1)]
    substitution: u64,
    /// Substitution cost when either base is the N wildcard
    #[arg(long = "unknown", default_value_t = 2)]
    unknown: u64,
    /// Insertion/deletion (gap) cost
    #[arg(long = "indel", default_value_t = 2)]
    indel: u64,
    /// Feed the engines the raw record bytes, line feeds included
    #[arg(long = "keep-newlines")]
    keep_newlines: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the distance between the first records of two FASTA files
    Distance {
        #[command(flatten)]
        common: CommonOpts,
        /// Engine variant (all variants return the same value)
        #[arg(long, value_enum, default_value_t = Engine::Iter)]
        engine: Engine,
        /// Tile edge length for the blocked engine
        #[arg(long = "tile-size", default_value_t = dist::DEFAULT_TILE)]
        tile_size: usize,
        /// Base-case threshold for the cache-oblivious engine
        #[arg(long, default_value_t = dist::DEFAULT_THRESHOLD)]
        threshold: usize,
    },
    /// Run all four engines on the same pair, check agreement, report timings
    Compare {
        #[command(flatten)]
        common: CommonOpts,
        #[arg(long = "tile-size", default_value_t = dist::DEFAULT_TILE)]
        tile_size: usize,
        #[arg(long, default_value_t = dist::DEFAULT_THRESHOLD)]
        threshold: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Distance { common, engine, tile_size, threshold } => {
            run_distance(&common, engine, tile_size, threshold)
        }
        Commands::Compare { common, tile_size, threshold } => {
            run_compare(&common, tile_size, threshold)
        }
    }
}

fn load_pair(common: &CommonOpts) -> Result<(Vec<u8>, Vec<u8>)> {
    let read: fn(&std::path::Path) -> Result<Vec<u8>> = if common.keep_newlines {
        fasta::read_raw_sequence
    } else {
        fasta::read_first_sequence
    };
    Ok((read(&common.seq_a)?, read(&common.seq_b)?))
}

fn cost_model(common: &CommonOpts) -> CostModel {
    CostModel {
        substitution: common.substitution,
        unknown: common.unknown,
        indel: common.indel,
    }
}

fn run_distance(common: &CommonOpts, engine: Engine, tile_size: usize, threshold: usize) -> Result<()> {
    let (a, b) = load_pair(common)?;
    let costs = cost_model(common);

    let mut log = AnomalyLog::new();
    let d = match engine {
        Engine::Memo => dist::distance_memoized_logged(&a, &b, &costs, &mut log)?,
        Engine::Iter => dist::distance_iterative_logged(&a, &b, &costs, &mut log)?,
        Engine::Blocked => dist::distance_blocked_logged(&a, &b, &costs, tile_size, &mut log)?,
        Engine::Oblivious => dist::distance_oblivious_logged(&a, &b, &costs, threshold, &mut log)?,
    };
    log.report();

    println!("seq_a: {} ({} symbols)", common.seq_a.display(), a.len());
    println!("seq_b: {} ({} symbols)", common.seq_b.display(), b.len());
    println!("distance: {d}");
    Ok(())
}

fn run_compare(common: &CommonOpts, tile_size: usize, threshold: usize) -> Result<()> {
    let (a, b) = load_pair(common)?;
    let costs = cost_model(common);

    println!("run: {}", chrono::Utc::now().to_rfc3339());
    println!("seq_a: {} ({} symbols)", common.seq_a.display(), a.len());
    println!("seq_b: {} ({} symbols)", common.seq_b.display(), b.len());
    println!(
        "costs: substitution={} unknown={} indel={}",
        costs.substitution, costs.unknown, costs.indel
    );

    let mut results: Vec<(&str, u64)> = Vec::new();
    let mut log = AnomalyLog::new();

    let t = Instant::now();
    let d = dist::distance_memoized_logged(&a, &b, &costs, &mut log)?;
    println!("memoized:        {:>12} ({:.3?})", d, t.elapsed());
    results.push(("memoized", d));

    let t = Instant::now();
    let d = dist::distance_iterative_logged(&a, &b, &costs, &mut log)?;
    println!("iterative:       {:>12} ({:.3?})", d, t.elapsed());
    results.push(("iterative", d));

    let t = Instant::now();
    let d = dist::distance_blocked_logged(&a, &b, &costs, tile_size, &mut log)?;
    println!("blocked({:>5}):  {:>12} ({:.3?})", tile_size, d, t.elapsed());
    results.push(("blocked", d));

    let t = Instant::now();
    let d = dist::distance_oblivious_logged(&a, &b, &costs, threshold, &mut log)?;
    println!("oblivious({:>3}): {:>12} ({:.3?})", threshold, d, t.elapsed());
    results.push(("oblivious", d));

    log.report();

    let reference = results[0].1;
    if results.iter().any(|&(_, d)| d != reference) {
        bail!("engines disagree: {:?}", results);
    }
    println!("all engines agree: {reference}");
    Ok(())
}
