use anyhow::Context;

use lifemesh::config;
use lifemesh::error::SimError;
use lifemesh::io::{dump_filename, write_pbm};
use lifemesh::logging;
use lifemesh::sim::{RunOutcome, SimulationState, StopReason};
use lifemesh::step;

fn main() -> anyhow::Result<()> {
    let params = config::parse().context("invalid configuration")?;

    let universe = mpi::initialize().ok_or_else(|| SimError::Resource("MPI_Init failed".into()))?;
    let world = universe.world();

    logging::init(world.rank());
    if world.rank() == 0 {
        logging::log_config(params.length, params.prob, params.seed, params.max_steps);
    }

    let mut sim = SimulationState::init(world, &params)?;

    let outcome = step::run(&mut sim)?;
    match outcome {
        RunOutcome::Completed { steps } => {
            tracing::info!(steps, "run completed");
        }
        RunOutcome::StoppedEarly { at_step, reason } => {
            let reason = match reason {
                StopReason::Collapse => "collapse",
                StopReason::Explosion => "explosion",
            };
            tracing::info!(at_step, reason, "run stopped early");
        }
    }

    if params.write_to_file {
        let filename = dump_filename(sim.descriptor.row, sim.descriptor.col);
        if let Err(err) = write_pbm(&filename, sim.buffer.current()) {
            tracing::warn!(rank = sim.rank(), error = %err, "frame dump failed");
        }
    }

    // Implicit group-exit barrier: `universe` is dropped here, finalizing MPI.
    Ok(())
}
