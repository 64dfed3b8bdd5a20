//! Chained Hash Table CLI
//!
//! A command-line front end for exercising the table by hand.
//!
//! # Commands
//!
//! - `demo` - Run the insert/search/delete walkthrough on an 11-bucket table
//! - `run` - Execute a command script from a file or stdin
//! - `bench` - Time inserts and lookups and report chain statistics

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Instant;

use chaintab::demo::run_demo;
use chaintab::script::format_stats;
use chaintab::table::{DEFAULT_BUCKET_COUNT, PRIME, TableStats};
use chaintab::{ChainedHashTable, OutputFormat, Session, TableConfig};
use tracing_subscriber::EnvFilter;

/// Bucket count of the walkthrough table
const DEMO_BUCKET_COUNT: usize = 11;

#[derive(Parser)]
#[command(name = "chaintab")]
#[command(version = "0.1.0")]
#[command(about = "Chained hash table with universal hashing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Number of buckets (default: 101, or 11 for `demo`)
    #[arg(long, global = true)]
    buckets: Option<usize>,

    /// Seed for the hash coefficients (default: OS randomness)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print dumps and stats as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through inserts, an update, searches and deletes
    Demo,

    /// Execute a command script
    Run {
        /// Script file (default: stdin)
        file: Option<PathBuf>,
    },

    /// Run performance benchmark
    Bench {
        /// Number of keys to insert
        #[arg(short, long, default_value = "100000")]
        count: u64,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let result = match cli.command {
        Commands::Demo => {
            let config = build_table_config(cli.buckets, cli.seed, DEMO_BUCKET_COUNT);
            cmd_demo(&config, format)
        }
        Commands::Run { file } => {
            let config = build_table_config(cli.buckets, cli.seed, DEFAULT_BUCKET_COUNT);
            cmd_run(file, &config, format)
        }
        Commands::Bench { count } => {
            let config = build_table_config(cli.buckets, cli.seed, DEFAULT_BUCKET_COUNT);
            cmd_bench(count, &config)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Build table config from CLI args
fn build_table_config(
    buckets: Option<usize>,
    seed: Option<u64>,
    default_buckets: usize,
) -> TableConfig {
    let mut config = TableConfig {
        bucket_count: default_buckets,
        ..TableConfig::default()
    };
    if let Some(n) = buckets {
        config.bucket_count = n;
    }
    config.seed = seed;
    config
}

fn print_hash_function<K, V>(table: &ChainedHashTable<K, V>) {
    let hasher = table.hasher();
    println!(
        "h(k) = (({} * k + {}) mod {}) mod {}",
        hasher.a(),
        hasher.b(),
        PRIME,
        hasher.bucket_count()
    );
}

fn cmd_demo(config: &TableConfig, format: OutputFormat) -> anyhow::Result<()> {
    let mut table = ChainedHashTable::from_config(config)?;
    print_hash_function(&table);
    println!();

    let stdout = io::stdout();
    run_demo(&mut table, format, &mut stdout.lock())?;
    Ok(())
}

fn cmd_run(
    file: Option<PathBuf>,
    config: &TableConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut session = Session::from_config(config, format)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let executed = match file {
        Some(path) => {
            let file = File::open(&path)
                .map_err(|e| anyhow::anyhow!("Cannot open {}: {}", path.display(), e))?;
            session.run(BufReader::new(file), &mut out)?
        }
        None => session.run(io::stdin().lock(), &mut out)?,
    };

    tracing::info!(executed, "script complete");
    Ok(())
}

fn fill(table: &mut ChainedHashTable<u64, u64>, keys: impl Iterator<Item = u64>) -> f64 {
    let start = Instant::now();
    for key in keys {
        table.insert(key, key);
    }
    start.elapsed().as_secs_f64()
}

fn print_stats(stats: &TableStats) {
    println!("  {}", format_stats(stats));
}

fn cmd_bench(count: u64, config: &TableConfig) -> anyhow::Result<()> {
    println!("Running benchmark with {} keys...", count);

    let mut table = ChainedHashTable::from_config(config)?;
    print_hash_function(&table);

    let insert_secs = fill(&mut table, 0..count);

    let start = Instant::now();
    let mut hits = 0u64;
    for key in 0..count {
        if table.search(&key).is_some() {
            hits += 1;
        }
    }
    let search_secs = start.elapsed().as_secs_f64();
    anyhow::ensure!(hits == count, "lost keys: {} of {} found", hits, count);

    println!("\nSequential keys 0..{}:", count);
    println!("  Insert: {:.3}s ({:.0} ops/s)", insert_secs, count as f64 / insert_secs);
    println!("  Search: {:.3}s ({:.0} ops/s)", search_secs, count as f64 / search_secs);
    print_stats(&table.stats());

    // Every key a multiple of the bucket count: a fixed `k mod m` hash would
    // put all of them in bucket 0.
    let stride = config.bucket_count as u64;
    let mut strided = ChainedHashTable::from_config(config)?;
    let strided_secs = fill(&mut strided, (0..count).map(|k| k.wrapping_mul(stride)));

    println!("\nStrided keys k * {} (worst case for k mod {}):", stride, stride);
    println!("  Insert: {:.3}s ({:.0} ops/s)", strided_secs, count as f64 / strided_secs);
    print_stats(&strided.stats());

    Ok(())
}
