//! The augmented per-process sub-lattice: interior cells plus a one-cell halo.

use crate::cell::Cell;

/// A `(height+2) x (width+2)` row-major buffer. Indices `1..=height` by
/// `1..=width` are the interior; the outer ring is the halo.
#[derive(Clone, Debug)]
pub struct Tile {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Tile {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            cells: vec![Cell::DEAD; (height + 2) * (width + 2)],
        }
    }

    pub const fn interior_height(&self) -> usize {
        self.height
    }

    pub const fn interior_width(&self) -> usize {
        self.width
    }

    const fn stride(&self) -> usize {
        self.width + 2
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        i * self.stride() + j
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Cell {
        self.cells[self.index(i, j)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, cell: Cell) {
        let idx = self.index(i, j);
        self.cells[idx] = cell;
    }

    /// Zero every halo cell (the outer ring). Called at allocation and
    /// whenever a neighbourless edge needs re-establishing.
    pub fn zero_halo(&mut self) {
        let h = self.height;
        let w = self.width;
        for j in 0..=w + 1 {
            self.set(0, j, Cell::DEAD);
            self.set(h + 1, j, Cell::DEAD);
        }
        for i in 0..=h + 1 {
            self.set(i, 0, Cell::DEAD);
            self.set(i, w + 1, Cell::DEAD);
        }
    }

    pub fn top_interior_row(&self) -> Vec<Cell> {
        (1..=self.width).map(|j| self.get(1, j)).collect()
    }

    pub fn bottom_interior_row(&self) -> Vec<Cell> {
        (1..=self.width).map(|j| self.get(self.height, j)).collect()
    }

    pub fn left_interior_col(&self) -> Vec<Cell> {
        (1..=self.height).map(|i| self.get(i, 1)).collect()
    }

    pub fn right_interior_col(&self) -> Vec<Cell> {
        (1..=self.height).map(|i| self.get(i, self.width)).collect()
    }

    pub fn set_top_halo(&mut self, row: &[Cell]) {
        for (j, &c) in row.iter().enumerate() {
            self.set(0, j + 1, c);
        }
    }

    pub fn set_bottom_halo(&mut self, row: &[Cell]) {
        for (j, &c) in row.iter().enumerate() {
            self.set(self.height + 1, j + 1, c);
        }
    }

    pub fn set_left_halo(&mut self, col: &[Cell]) {
        for (i, &c) in col.iter().enumerate() {
            self.set(i + 1, 0, c);
        }
    }

    pub fn set_right_halo(&mut self, col: &[Cell]) {
        for (i, &c) in col.iter().enumerate() {
            self.set(i + 1, self.width + 1, c);
        }
    }
}

/// Two tiles of identical shape with a rotating current/next designation.
///
/// Replaces the source's raw-pointer swap: rotation is an index flip, and
/// the invariant that `step()` fully overwrites the next tile means no
/// zero-initialization is needed on rotation.
pub struct TileBuffer {
    slots: [Tile; 2],
    current: usize,
}

impl TileBuffer {
    pub fn new(height: usize, width: usize) -> Self {
        let mut a = Tile::new(height, width);
        let mut b = Tile::new(height, width);
        a.zero_halo();
        b.zero_halo();
        Self {
            slots: [a, b],
            current: 0,
        }
    }

    pub fn current(&self) -> &Tile {
        &self.slots[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Tile {
        &mut self.slots[self.current]
    }

    /// Borrow the current tile immutably and the next tile mutably at once,
    /// for the stencil sweep which reads one and writes the other.
    pub fn current_and_next_mut(&mut self) -> (&Tile, &mut Tile) {
        let (lo, hi) = self.slots.split_at_mut(1);
        if self.current == 0 {
            (&lo[0], &mut hi[0])
        } else {
            (&hi[0], &mut lo[0])
        }
    }

    pub fn rotate(&mut self) {
        self.current = 1 - self.current;
    }
}
