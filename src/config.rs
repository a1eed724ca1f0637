//! Command-line front end and the validated parameter bundle it produces.

use clap::Parser;

use crate::error::{Result, SimError};

/// Distributed outer-totalistic cellular automaton over a Cartesian process mesh.
#[derive(Parser, Debug)]
#[command(name = "lifemesh", version, about)]
pub struct Cli {
    /// Global PRNG seed.
    pub seed: i64,

    /// Side length of the square domain.
    #[arg(long, default_value_t = 768)]
    pub length: usize,

    /// Probability that an interior cell starts alive.
    #[arg(long, default_value_t = 0.49)]
    pub prob: f64,

    /// Maximum number of generations to advance.
    #[arg(long = "max-steps", default_value_t = 7680)]
    pub max_steps: u64,

    /// Steps between interval log records on the controller rank.
    #[arg(long = "print-interval", default_value_t = 100)]
    pub print_interval: u64,

    /// Dump a per-tile PBM bitmap after the run.
    #[arg(long = "write-to-file", action = clap::ArgAction::Set, default_value_t = true)]
    pub write_to_file: bool,

    /// Disable early stopping on population collapse/explosion.
    #[arg(long = "no-early-stopping", default_value_t = false)]
    pub no_early_stopping: bool,
}

/// Validated, immutable run parameters threaded into the simulation core.
#[derive(Clone, Debug)]
pub struct Params {
    pub seed: i64,
    pub length: usize,
    pub prob: f64,
    pub max_steps: u64,
    pub print_interval: u64,
    pub write_to_file: bool,
    pub early_stopping: bool,
}

impl TryFrom<Cli> for Params {
    type Error = SimError;

    fn try_from(cli: Cli) -> std::result::Result<Self, Self::Error> {
        if !(0.0..=1.0).contains(&cli.prob) {
            return Err(SimError::Config(format!(
                "prob must be in [0, 1], got {}",
                cli.prob
            )));
        }
        if cli.length == 0 {
            return Err(SimError::Config("length must be > 0".into()));
        }
        if cli.print_interval == 0 {
            return Err(SimError::Config("print_interval must be > 0".into()));
        }

        Ok(Params {
            seed: cli.seed,
            length: cli.length,
            prob: cli.prob,
            max_steps: cli.max_steps,
            print_interval: cli.print_interval,
            write_to_file: cli.write_to_file,
            early_stopping: !cli.no_early_stopping,
        })
    }
}

/// Parse and validate the command line, independently on every process.
///
/// Every process under `mpirun`/`mpiexec` sees the same `argv`, so parsing
/// happens before the process group is joined and needs no broadcast.
pub fn parse() -> Result<Params> {
    let cli = Cli::parse();
    Params::try_from(cli)
}
