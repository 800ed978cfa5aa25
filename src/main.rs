use std::io::{self, BufWriter, Write};

use clap::Parser;
use randf::Rand;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to write samples: {0}")]
    Write(#[from] io::Error),
}

/// Print random f32 values drawn uniformly from [0, 1].
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Seed; values congruent modulo 2^31 - 1 give the same output
    #[arg(long, short, default_value_t = randf::DEFAULT_SEED, allow_hyphen_values = true)]
    seed: i64,

    /// Number of values to print
    #[arg(long, short = 'n', default_value_t = 10)]
    count: usize,

    /// Also print the IEEE-754 bit pattern of each value
    #[arg(long)]
    bits: bool,
}

fn init_logging() {
    // RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_samples(args: &Args, out: &mut impl Write) -> Result<(), CliError> {
    let mut rng = Rand::new();
    rng.seed(args.seed);
    for _ in 0..args.count {
        let value = rng.float32();
        if args.bits {
            writeln!(out, "{:#010x} {}", value.to_bits(), value)?;
        } else {
            writeln!(out, "{value}")?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<(), CliError> {
    init_logging();
    let args = Args::parse();
    tracing::info!(seed = args.seed, count = args.count, "generating");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match write_samples(&args, &mut out) {
        Err(CliError::Write(err)) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
