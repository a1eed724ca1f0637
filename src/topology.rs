//! Cartesian process mesh: factoring the process count, per-process tile
//! assignment, and neighbour discovery.

use crate::error::{Result, SimError};

/// One of the four cardinal exchange directions. Fixes the workspace slot
/// order used throughout halo exchange (§4.3): `[Up, Down, Left, Right]`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub const fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// A neighbour rank, or the sentinel meaning "edge of the non-periodic axis".
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Neighbour {
    Rank(i32),
    None,
}

impl Neighbour {
    pub const fn rank(self) -> Option<i32> {
        match self {
            Neighbour::Rank(r) => Some(r),
            Neighbour::None => None,
        }
    }
}

/// Factor `p` into `(rows, cols)` with `rows * cols == p` and `rows <= cols`,
/// choosing the pair closest to a square. Mirrors the balanced factorization
/// an `MPI_Dims_create` call would produce for a 2-D grid.
pub fn factor_mesh(p: u32) -> (u32, u32) {
    assert!(p > 0, "process count must be positive");
    let mut rows = (p as f64).sqrt() as u32;
    while rows > 0 && p % rows != 0 {
        rows -= 1;
    }
    let rows = rows.max(1);
    let cols = p / rows;
    (rows, cols)
}

/// Per-axis chunk size: every position except the last gets `floor(n / d)`,
/// the last absorbs the remainder. See spec §4.1 / §9 (edge load imbalance).
pub fn chunk_size(n: usize, pos: u32, d: u32) -> usize {
    let base = n / d as usize;
    if pos + 1 == d {
        n - base * (d as usize - 1)
    } else {
        base
    }
}

/// Immutable per-process description of its place in the mesh.
#[derive(Clone, Debug)]
pub struct ProcessDescriptor {
    pub rank: i32,
    pub n_proc: u32,
    pub mesh_rows: u32,
    pub mesh_cols: u32,
    pub row: u32,
    pub col: u32,
    pub height: usize,
    pub width: usize,
    pub neighbours: [Neighbour; 4],
    pub seed: u32,
}

impl ProcessDescriptor {
    pub fn neighbour(&self, dir: Direction) -> Neighbour {
        self.neighbours[dir.index()]
    }
}

/// Derive topology and per-process tile assignment for `rank` out of
/// `n_proc` processes tiling an `n x n` domain.
///
/// Periodic wrap applies to the column axis; the row axis is a hard edge
/// (row 0 and the last row have no vertical neighbour there).
pub fn build_descriptor(rank: i32, n_proc: u32, n: usize, seed: u32) -> Result<ProcessDescriptor> {
    let (mesh_rows, mesh_cols) = factor_mesh(n_proc);

    if n < mesh_rows as usize || n < mesh_cols as usize {
        return Err(SimError::Config(format!(
            "domain side {n} is too small for a {mesh_rows}x{mesh_cols} process mesh"
        )));
    }

    let row = (rank as u32) / mesh_cols;
    let col = (rank as u32) % mesh_cols;

    let height = chunk_size(n, row, mesh_rows);
    let width = chunk_size(n, col, mesh_cols);

    let up = if row == 0 {
        Neighbour::None
    } else {
        Neighbour::Rank(rank_of(row - 1, col, mesh_cols))
    };
    let down = if row + 1 == mesh_rows {
        Neighbour::None
    } else {
        Neighbour::Rank(rank_of(row + 1, col, mesh_cols))
    };
    // Column axis wraps: col 0's left neighbour is the last column.
    let left_col = (col + mesh_cols - 1) % mesh_cols;
    let right_col = (col + 1) % mesh_cols;
    let left = Neighbour::Rank(rank_of(row, left_col, mesh_cols));
    let right = Neighbour::Rank(rank_of(row, right_col, mesh_cols));

    Ok(ProcessDescriptor {
        rank,
        n_proc,
        mesh_rows,
        mesh_cols,
        row,
        col,
        height,
        width,
        neighbours: [up, down, left, right],
        seed,
    })
}

fn rank_of(row: u32, col: u32, mesh_cols: u32) -> i32 {
    (row * mesh_cols + col) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_square_counts_exactly() {
        assert_eq!(factor_mesh(4), (2, 2));
        assert_eq!(factor_mesh(9), (3, 3));
    }

    #[test]
    fn factors_prefer_closest_to_square() {
        assert_eq!(factor_mesh(8), (2, 4));
        assert_eq!(factor_mesh(1), (1, 1));
        assert_eq!(factor_mesh(6), (2, 3));
    }

    #[test]
    fn chunk_size_absorbs_remainder_on_last_position() {
        assert_eq!(chunk_size(10, 0, 3), 3);
        assert_eq!(chunk_size(10, 1, 3), 3);
        assert_eq!(chunk_size(10, 2, 3), 4);
    }

    #[test]
    fn coverage_sums_to_n_squared() {
        let n = 17usize;
        let n_proc = 6u32;
        let (rows, cols) = factor_mesh(n_proc);
        assert!(n >= rows as usize && n >= cols as usize);

        let mut total = 0usize;
        for rank in 0..n_proc as i32 {
            let d = build_descriptor(rank, n_proc, n, 0).unwrap();
            total += d.height * d.width;
        }
        assert_eq!(total, n * n);
    }

    #[test]
    fn row_axis_has_hard_edges_col_axis_wraps() {
        let d = build_descriptor(0, 4, 4, 0).unwrap(); // (row, col) = (0, 0) on a 2x2 mesh
        assert_eq!(d.neighbour(Direction::Up), Neighbour::None);
        assert_ne!(d.neighbour(Direction::Down), Neighbour::None);
        // column wraps: rank 0's left neighbour is column mesh_cols-1 of the same row
        assert_eq!(d.neighbour(Direction::Left), Neighbour::Rank(1));
        assert_eq!(d.neighbour(Direction::Right), Neighbour::Rank(1));
    }

    #[test]
    fn rejects_mesh_larger_than_domain() {
        assert!(build_descriptor(0, 16, 2, 0).is_err());
    }
}
