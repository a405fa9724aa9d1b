//! Factory functions for wall layouts used in tests and scripted sessions.

use shared::{WallCell, WorldExport};

/// Bare cells from coordinate pairs, in the given order.
pub fn cells(coords: &[(i32, i32)]) -> Vec<WallCell> {
    coords.iter().map(|&(x, z)| WallCell::bare(x, z)).collect()
}

/// Straight run of `len` cells along +x starting at `(x, z)`.
pub fn line_x(x: i32, z: i32, len: i32) -> Vec<WallCell> {
    (0..len).map(|i| WallCell::bare(x + i, z)).collect()
}

/// Straight run of `len` cells along +z starting at `(x, z)`.
pub fn line_z(x: i32, z: i32, len: i32) -> Vec<WallCell> {
    (0..len).map(|i| WallCell::bare(x, z + i)).collect()
}

/// L-shaped corner: `(0,0)`, `(1,0)`, `(0,1)`.
pub fn corner() -> Vec<WallCell> {
    cells(&[(0, 0), (1, 0), (0, 1)])
}

/// Closed rectangular outline with `w` by `d` cells on its outer edge.
///
/// Cells run clockwise from `(0, 0)`. `w` and `d` must be at least 2.
pub fn room(w: i32, d: i32) -> Vec<WallCell> {
    let mut out = Vec::new();
    out.extend((0..w).map(|x| WallCell::bare(x, 0)));
    out.extend((1..d).map(|z| WallCell::bare(w - 1, z)));
    out.extend((0..w - 1).rev().map(|x| WallCell::bare(x, d - 1)));
    out.extend((1..d - 1).rev().map(|z| WallCell::bare(0, z)));
    out
}

/// Filled `w` by `d` block of cells, row by row.
pub fn block(w: i32, d: i32) -> Vec<WallCell> {
    (0..d)
        .flat_map(|z| (0..w).map(move |x| WallCell::bare(x, z)))
        .collect()
}

/// Cells whose stored flags are all set, as a stale save might contain.
pub fn stale_flags(coords: &[(i32, i32)]) -> Vec<WallCell> {
    coords
        .iter()
        .map(|&(x, z)| WallCell {
            x,
            z,
            north: true,
            east: true,
            south: true,
            west: true,
        })
        .collect()
}

/// Shareable world file content.
pub fn world_export(name: &str, walls: Vec<WallCell>) -> WorldExport {
    WorldExport {
        name: name.to_string(),
        walls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_perimeter() {
        let r = room(3, 3);
        assert_eq!(r.len(), 8);
        assert!(!r.iter().any(|c| c.at(1, 1)));
    }

    #[test]
    fn test_room_has_no_duplicates() {
        let r = room(4, 5);
        for (i, a) in r.iter().enumerate() {
            assert!(!r[i + 1..].iter().any(|b| b.at(a.x, a.z)), "{a:?}");
        }
        assert_eq!(r.len(), 2 * 4 + 2 * 5 - 4);
    }

    #[test]
    fn test_block_size() {
        assert_eq!(block(3, 2).len(), 6);
    }
}
