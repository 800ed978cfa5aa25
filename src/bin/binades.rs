use std::io::{self, BufWriter, Write};

use clap::Parser;
use itertools::Itertools;
use randf::float::exponent_field;
use randf::Rand;
use tracing_subscriber::EnvFilter;

/// Compare how often each binade [2^-k, 2^-k+1) is hit with the expected 2^-k.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, short, default_value_t = randf::DEFAULT_SEED, allow_hyphen_values = true)]
    seed: i64,

    #[arg(long, short = 'n', default_value_t = 1_000_000)]
    samples: usize,

    /// Deepest binade to report
    #[arg(long, short, default_value_t = 12)]
    depth: u32,
}

#[derive(Debug, Default)]
struct Tally {
    by_exponent: Vec<(u32, usize)>,
    zeros: usize,
    ones: usize,
    subnormals: usize,
}

fn tally(rng: &mut Rand, samples: usize) -> Tally {
    let mut tally = Tally::default();
    let counts = (0..samples)
        .map(|_| rng.float32())
        .inspect(|v| {
            if *v == 0.0 {
                tally.zeros += 1;
            } else if *v == 1.0 {
                tally.ones += 1;
            } else if v.is_subnormal() {
                tally.subnormals += 1;
            }
        })
        .map(exponent_field)
        .counts();
    tally.by_exponent = counts.into_iter().sorted_by(|a, b| b.0.cmp(&a.0)).collect();
    tally
}

fn init_logging() {
    // RUST_LOG overrides the default level; the report owns stdout
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_report(out: &mut impl Write, tally: &Tally, samples: usize, depth: u32) -> io::Result<()> {
    let n = samples as f64;
    writeln!(out, "{:>4} {:>12} {:>12} {:>8}", "k", "observed", "expected", "sigma")?;
    for k in 1..=depth.min(126) {
        // 1.0 is counted with the top binade
        let exp = 127 - k;
        let count: usize = tally
            .by_exponent
            .iter()
            .filter(|(e, _)| *e == exp || (k == 1 && *e == 127))
            .map(|(_, c)| c)
            .sum();
        let p = 0.5f64.powi(k as i32);
        let observed = count as f64 / n;
        let std_err = (p * (1.0 - p) / n).sqrt();
        writeln!(
            out,
            "{:>4} {:>12.8} {:>12.8} {:>8.2}",
            k,
            observed,
            p,
            (observed - p) / std_err
        )?;
    }
    writeln!(
        out,
        "exact 0.0: {}  exact 1.0: {}  subnormal: {}",
        tally.zeros, tally.ones, tally.subnormals
    )
}

fn main() -> io::Result<()> {
    init_logging();
    let args = Args::parse();
    tracing::info!(seed = args.seed, samples = args.samples, "tallying binades");

    let mut rng = Rand::new();
    rng.seed(args.seed);
    let tally = tally(&mut rng, args.samples);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_report(&mut out, &tally, args.samples, args.depth)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_covers_every_sample() {
        let mut rng = Rand::new();
        let tally = tally(&mut rng, 10_000);
        let total: usize = tally.by_exponent.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 10_000);
        assert!(tally.by_exponent.windows(2).all(|w| w[0].0 > w[1].0));
        assert!(tally.by_exponent[0].0 <= 127);
    }

    #[test]
    fn report_holds_only_the_table() {
        let mut rng = Rand::new();
        rng.seed(42);
        let tally = tally(&mut rng, 10_000);
        let mut out = Vec::new();
        write_report(&mut out, &tally, 10_000, 4).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // header, one row per binade, boundary counts
        assert_eq!(lines.len(), 6);
        assert!(lines[0].trim_start().starts_with('k'));
        assert!(lines[1].trim_start().starts_with('1'));
        assert!(lines[5].starts_with("exact 0.0:"));
    }
}
