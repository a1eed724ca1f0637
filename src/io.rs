//! Per-tile PBM (P1) bitmap dump, the one piece of per-process file I/O.

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::tile::Tile;

const PIXELS_PER_LINE: usize = 32;

/// Write `tile`'s interior as a plain-ASCII PBM (P1) file. Alive cells map
/// to pixel `0` (ink), dead cells to `1` (paper), so colonies print as
/// black on white. Lines wrap every 32 pixels.
pub fn write_pbm(path: impl AsRef<Path>, tile: &Tile) -> Result<()> {
    let height = tile.interior_height();
    let width = tile.interior_width();

    let mut out = String::new();
    out.push_str("P1\n");
    out.push_str(&format!("{width} {height}\n"));

    let mut cursor = 0usize;
    for i in 1..=height {
        for j in 1..=width {
            let pixel = if tile.get(i, j).is_alive() { 0 } else { 1 };
            cursor += 1;
            if cursor == 1 {
                out.push_str(&pixel.to_string());
            } else if cursor < PIXELS_PER_LINE {
                out.push(' ');
                out.push_str(&pixel.to_string());
            } else {
                out.push(' ');
                out.push_str(&pixel.to_string());
                out.push('\n');
                cursor = 0;
            }
        }
    }
    if cursor != 0 {
        out.push('\n');
    }

    let mut file = std::fs::File::create(path)?;
    file.write_all(out.as_bytes())?;
    Ok(())
}

/// Filename for this process's dump: `cell_<row>_<col>.pbm`.
pub fn dump_filename(row: u32, col: u32) -> String {
    format!("cell_{row}_{col}.pbm")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn header_and_inversion_for_a_small_tile() {
        let mut t = Tile::new(3, 3);
        // Vertical stripe down the middle column.
        for i in 1..=3 {
            t.set(i, 2, Cell::ALIVE);
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cell_0_0.pbm");
        write_pbm(&path, &t).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("P1"));
        assert_eq!(lines.next(), Some("3 3"));
        assert_eq!(lines.next(), Some("1 0 1 1 0 1 1 0 1"));
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn wraps_every_32_pixels() {
        let mut t = Tile::new(1, 40);
        for j in 1..=40 {
            t.set(1, j, Cell::DEAD);
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cell_0_0.pbm");
        write_pbm(&path, &t).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let body: Vec<&str> = contents.lines().skip(2).collect();
        assert_eq!(body.len(), 2);
        assert_eq!(body[0].split(' ').count(), 32);
        assert_eq!(body[1].split(' ').count(), 8);
    }

    #[test]
    fn writing_twice_is_idempotent() {
        let mut t = Tile::new(2, 2);
        t.set(1, 1, Cell::ALIVE);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cell_0_0.pbm");
        write_pbm(&path, &t).unwrap();
        let first = std::fs::read(&path).unwrap();
        write_pbm(&path, &t).unwrap();
        let second = std::fs::read(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn filename_pattern_uses_mesh_coordinates() {
        assert_eq!(dump_filename(1, 2), "cell_1_2.pbm");
    }
}
