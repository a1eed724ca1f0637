//! Non-blocking four-way halo exchange over the process mesh.

use mpi::request::scope;
use mpi::topology::SimpleCommunicator;
use mpi::traits::*;

use crate::cell::Cell;
use crate::error::{Result, SimError};
use crate::tile::Tile;
use crate::topology::{Direction, Neighbour, ProcessDescriptor};

/// Scratch buffers for one generation's exchange: one send and one receive
/// line per direction, indexed by `Direction::index()`.
pub struct HaloWorkspace {
    send: [Vec<Cell>; 4],
    recv: [Vec<Cell>; 4],
}

impl HaloWorkspace {
    pub fn new(height: usize, width: usize) -> Self {
        let mk_h = || vec![Cell::DEAD; width];
        let mk_v = || vec![Cell::DEAD; height];
        Self {
            send: [mk_h(), mk_h(), mk_v(), mk_v()],
            recv: [mk_h(), mk_h(), mk_v(), mk_v()],
        }
    }
}

/// Byte view of a cell line for wire transfer. `Cell` is `repr(transparent)`
/// over `u8`, so this is a safe reinterpretation of the slice.
fn as_bytes(cells: &[Cell]) -> &[u8] {
    // SAFETY: Cell is #[repr(transparent)] over u8.
    unsafe { std::slice::from_raw_parts(cells.as_ptr() as *const u8, cells.len()) }
}

fn as_bytes_mut(cells: &mut [Cell]) -> &mut [u8] {
    // SAFETY: Cell is #[repr(transparent)] over u8.
    unsafe { std::slice::from_raw_parts_mut(cells.as_mut_ptr() as *mut u8, cells.len()) }
}

/// Run one generation's halo exchange: post all four receives, copy edges
/// into send buffers, post all four synchronous sends, then wait on
/// receives and sends in that order before scattering into the halo.
///
/// Directions whose neighbour is `Neighbour::None` are skipped entirely;
/// the corresponding halo edge keeps whatever zero-fill it was allocated
/// with, which the caller never overwrites on that edge.
pub fn exchange(
    world: &SimpleCommunicator,
    descriptor: &ProcessDescriptor,
    workspace: &mut HaloWorkspace,
    tile: &mut Tile,
) -> Result<()> {
    // Fill send buffers from the current interior edges.
    workspace.send[Direction::Up.index()].copy_from_slice(&tile.top_interior_row());
    workspace.send[Direction::Down.index()].copy_from_slice(&tile.bottom_interior_row());
    workspace.send[Direction::Left.index()].copy_from_slice(&tile.left_interior_col());
    workspace.send[Direction::Right.index()].copy_from_slice(&tile.right_interior_col());

    let result = scope(|scope| {
        let mut recv_requests = Vec::with_capacity(4);
        let mut send_requests = Vec::with_capacity(4);

        // Destructure into four disjoint `&mut` slots up front: indexing
        // `workspace.recv[dir.index()]` with a runtime index inside the loop
        // borrows the whole array mutably on every iteration, and the
        // borrow checker cannot see that the four indices never collide.
        let [r_up, r_down, r_left, r_right] = &mut workspace.recv;
        let recv_slots = [r_up, r_down, r_left, r_right];

        for (dir, recv_slot) in Direction::ALL.into_iter().zip(recv_slots) {
            if let Neighbour::Rank(peer) = descriptor.neighbour(dir) {
                let process = world.process_at_rank(peer);
                let recv_buf = as_bytes_mut(recv_slot);
                recv_requests.push(process.immediate_receive_into(scope, recv_buf));
            }
        }

        for dir in Direction::ALL {
            if let Neighbour::Rank(peer) = descriptor.neighbour(dir) {
                let process = world.process_at_rank(peer);
                let send_buf = as_bytes(&workspace.send[dir.index()]);
                send_requests.push(process.immediate_synchronous_send(scope, send_buf));
            }
        }

        for req in recv_requests {
            req.wait();
        }
        for req in send_requests {
            req.wait();
        }

        Ok::<(), SimError>(())
    });
    result?;

    if descriptor.neighbour(Direction::Up).rank().is_some() {
        tile.set_top_halo(&workspace.recv[Direction::Up.index()]);
    }
    if descriptor.neighbour(Direction::Down).rank().is_some() {
        tile.set_bottom_halo(&workspace.recv[Direction::Down.index()]);
    }
    if descriptor.neighbour(Direction::Left).rank().is_some() {
        tile.set_left_halo(&workspace.recv[Direction::Left.index()]);
    }
    if descriptor.neighbour(Direction::Right).rank().is_some() {
        tile.set_right_halo(&workspace.recv[Direction::Right.index()]);
    }

    Ok(())
}
