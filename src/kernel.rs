//! The local stencil sweep: one full pass over a tile's interior.

use crate::cell::update_cell;
use crate::tile::Tile;

/// Advance `current`'s interior into `next` under the 5-cell cross rule,
/// returning the number of interior cells that are alive in `next`.
///
/// Halo cells are read but never written; `next`'s halo is left untouched
/// by this function (halo exchange owns it).
pub fn sweep(current: &Tile, next: &mut Tile) -> u64 {
    let h = current.interior_height();
    let w = current.interior_width();
    let mut live = 0u64;

    for i in 1..=h {
        for j in 1..=w {
            let sum = current.get(i, j).0
                + current.get(i - 1, j).0
                + current.get(i + 1, j).0
                + current.get(i, j - 1).0
                + current.get(i, j + 1).0;
            let new = update_cell(sum);
            next.set(i, j, new);
            if new.is_alive() {
                live += 1;
            }
        }
    }

    live
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    fn plus_fixture() -> (Tile, Tile) {
        // 3x3 still life: a plus shape. Interior indices 1..=3.
        let mut t = Tile::new(3, 3);
        t.zero_halo();
        let alive = [(1, 2), (2, 1), (2, 2), (2, 3), (3, 2)];
        for (i, j) in alive {
            t.set(i, j, Cell::ALIVE);
        }
        let next = Tile::new(3, 3);
        (t, next)
    }

    #[test]
    fn centre_of_plus_fixture_has_neighbour_sum_five() {
        // Matches the reference fixture for compute_state_sum: a plus
        // shape centred in a 3x3 block sums to 5 at its centre.
        let (current, _next) = plus_fixture();
        let sum = current.get(2, 2).0
            + current.get(1, 2).0
            + current.get(3, 2).0
            + current.get(2, 1).0
            + current.get(2, 3).0;
        assert_eq!(sum, 5);
        assert!(update_cell(sum).is_alive());
    }

    #[test]
    fn plus_fixture_sweep_is_dense_under_this_rule() {
        // Under s in {2,4,5} every interior cell of the plus fixture picks
        // up a neighbour sum of 2 or 5 (this rule is far more permissive
        // than Conway's B3/S23), so the whole interior goes live.
        let (current, mut next) = plus_fixture();
        let live = sweep(&current, &mut next);
        assert_eq!(live, 9);
        for i in 1..=3 {
            for j in 1..=3 {
                assert!(next.get(i, j).is_alive(), "expected ({i},{j}) alive");
            }
        }
    }

    #[test]
    fn neighbour_permutation_does_not_change_outcome() {
        // The rule depends only on the sum, so any arrangement of 2 alive
        // neighbours (plus a dead centre) must agree on the outcome.
        use crate::cell::update_cell;
        let orders = [
            [1u8, 1, 0, 0],
            [1, 0, 1, 0],
            [0, 1, 0, 1],
            [0, 0, 1, 1],
        ];
        let sums: Vec<u8> = orders.iter().map(|n| n.iter().sum::<u8>()).collect();
        let results: Vec<_> = sums.iter().map(|&s| update_cell(s).is_alive()).collect();
        assert!(results.iter().all(|&r| r == results[0]));
    }

    #[test]
    fn s2_empty_grid_stays_empty() {
        let mut current = Tile::new(8, 8);
        current.zero_halo();
        let mut next = Tile::new(8, 8);
        let live = sweep(&current, &mut next);
        assert_eq!(live, 0);
    }
}
