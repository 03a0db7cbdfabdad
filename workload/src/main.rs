//! Runs a random mix of operations on a keyset collection and checks every result against a
//! collection from the standard library.
#![deny(unsafe_code)]

mod run;
mod test_run;

use clap::{Parser, ValueEnum};
use rand::{rngs::SmallRng, SeedableRng};
use run::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    Hash,
    Ordered,
    Combined,
    Unique,
    UniqueCombined,
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Collection to exercise.
    #[clap(short, long, value_enum)]
    kind: Kind,
    /// Number of operations to perform.
    #[clap(short = 'n', long, default_value = "10000")]
    ops: usize,
    /// Initial number of buckets of hash based collections.
    #[clap(short, long, default_value = "10")]
    capacity: usize,
    #[clap(short, long, default_value = "0")]
    seed: u64,
    /// Number of distinct values to draw from.
    #[clap(short = 'r', long, default_value = "1000")]
    key_range: u64,
    /// Log at debug level unless KEYSET_LOG is set.
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    let args = Args::parse();

    color_eyre::install()?;
    if args.verbose {
        keyset_logger::setup_with_default("debug");
    } else {
        keyset_logger::setup();
    }

    color_eyre::eyre::ensure!(args.key_range > 0, "the key range must not be empty");

    let config = Config {
        ops: args.ops,
        capacity: args.capacity,
        key_range: args.key_range,
    };
    let mut rng = SmallRng::seed_from_u64(args.seed);

    log::info!(
        "running {} operations on {:?}, seed {}",
        args.ops,
        args.kind,
        args.seed
    );

    let summary = match args.kind {
        Kind::Hash => run::hash(&config, &mut rng)?,
        Kind::Ordered => run::ordered(&config, &mut rng)?,
        Kind::Combined => run::combined(&config, &mut rng)?,
        Kind::Unique => run::unique(&config, &mut rng)?,
        Kind::UniqueCombined => run::unique_combined(&config, &mut rng)?,
    };

    log::info!("{summary}");

    Ok(())
}
