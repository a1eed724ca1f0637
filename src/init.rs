//! Random initialization: Bernoulli fill of the interior, zero halo.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cell::Cell;
use crate::tile::Tile;

/// Seed a PRNG from `seed` and fill `tile`'s interior with independent
/// Bernoulli(`prob`) draws; the halo is left zeroed. Returns the local
/// live-cell count.
pub fn bernoulli_fill(tile: &mut Tile, prob: f64, seed: u32) -> u64 {
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut live = 0u64;

    for i in 1..=tile.interior_height() {
        for j in 1..=tile.interior_width() {
            let alive = rng.random::<f64>() < prob;
            tile.set(i, j, Cell::from_bool(alive));
            if alive {
                live += 1;
            }
        }
    }

    tile.zero_halo();
    live
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_probability_yields_empty_interior() {
        let mut t = Tile::new(10, 10);
        let live = bernoulli_fill(&mut t, 0.0, 1);
        assert_eq!(live, 0);
    }

    #[test]
    fn probability_one_yields_full_interior() {
        let mut t = Tile::new(6, 6);
        let live = bernoulli_fill(&mut t, 1.0, 1);
        assert_eq!(live, 36);
    }

    #[test]
    fn halo_is_zero_after_fill() {
        let mut t = Tile::new(4, 4);
        bernoulli_fill(&mut t, 1.0, 99);
        for j in 0..=5 {
            assert!(!t.get(0, j).is_alive());
            assert!(!t.get(5, j).is_alive());
        }
        for i in 0..=5 {
            assert!(!t.get(i, 0).is_alive());
            assert!(!t.get(i, 5).is_alive());
        }
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let mut a = Tile::new(5, 5);
        let mut b = Tile::new(5, 5);
        let la = bernoulli_fill(&mut a, 0.5, 123);
        let lb = bernoulli_fill(&mut b, 0.5, 123);
        assert_eq!(la, lb);
        for i in 1..=5 {
            for j in 1..=5 {
                assert_eq!(a.get(i, j), b.get(i, j));
            }
        }
    }
}
