//! Simulation state: bring-up, teardown, and the population thresholds
//! that gate early stopping.

use mpi::collective::SystemOperation;
use mpi::topology::SimpleCommunicator;
use mpi::traits::*;

use crate::config::Params;
use crate::error::Result;
use crate::halo::HaloWorkspace;
use crate::init::bernoulli_fill;
use crate::logging;
use crate::seed::rank_seed;
use crate::tile::TileBuffer;
use crate::topology::{build_descriptor, ProcessDescriptor};

/// Why the step loop stopped before reaching `max_steps`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StopReason {
    Collapse,
    Explosion,
}

/// The outcome of running the step loop to completion or early exit.
#[derive(Clone, Copy, Debug)]
pub enum RunOutcome {
    Completed { steps: u64 },
    StoppedEarly { at_step: u64, reason: StopReason },
}

/// Everything one process needs to run its share of the simulation.
pub struct SimulationState<'p> {
    pub world: SimpleCommunicator,
    pub descriptor: ProcessDescriptor,
    pub buffer: TileBuffer,
    pub workspace: HaloWorkspace,
    pub params: &'p Params,
    pub threshold_low: u64,
    pub threshold_high: u64,
}

impl<'p> SimulationState<'p> {
    /// Bring-up: derive topology, allocate tile and workspace, fan out
    /// seeds, Bernoulli-fill, reduce `L0`, compute thresholds.
    pub fn init(world: SimpleCommunicator, params: &'p Params) -> Result<Self> {
        let rank = world.rank();
        let n_proc = world.size() as u32;
        let seed = rank_seed(params.seed, n_proc, rank);

        let descriptor = build_descriptor(rank, n_proc, params.length, seed)?;
        logging::log_worker_placement(
            rank,
            descriptor.row,
            descriptor.col,
            descriptor.height,
            descriptor.width,
        );

        let mut buffer = TileBuffer::new(descriptor.height, descriptor.width);
        let workspace = HaloWorkspace::new(descriptor.height, descriptor.width);

        let local_live = bernoulli_fill(buffer.current_mut(), params.prob, descriptor.seed);

        let mut l0: u64 = 0;
        world.all_reduce_into(&local_live, &mut l0, SystemOperation::sum());

        let threshold_low = (l0 as f64 * 2.0 / 3.0) as u64;
        let threshold_high = (l0 as f64 * 3.0 / 2.0) as u64;

        Ok(Self {
            world,
            descriptor,
            buffer,
            workspace,
            params,
            threshold_low,
            threshold_high,
        })
    }

    pub fn rank(&self) -> i32 {
        self.descriptor.rank
    }

    pub fn is_controller(&self) -> bool {
        self.descriptor.rank == 0
    }
}
