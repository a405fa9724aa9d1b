//! Authoritative set of occupied wall cells

use std::collections::HashSet;

use shared::{GridCell, Side, WallCell};

/// Occupied cells in insertion order. At most one entry per `(x, z)`.
#[derive(Debug, Default, Clone)]
pub struct WallTopology {
    cells: Vec<GridCell>,
    /// Monotonically increasing version counter for mesh invalidation
    version: u64,
}

impl WallTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a topology from loaded cells, collapsing duplicates
    pub fn from_cells(cells: &[WallCell]) -> Self {
        let mut topology = Self::new();
        topology.replace_all(cells);
        topology
    }

    /// Current topology version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, x: i32, z: i32) -> bool {
        self.cells.iter().any(|c| c.x == x && c.z == z)
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Insert a cell. Returns `false` and leaves the store unchanged if one
    /// already exists at `(x, z)`.
    pub fn add_wall(&mut self, x: i32, z: i32) -> bool {
        if self.contains(x, z) {
            tracing::debug!(x, z, "Ignoring add of existing wall cell");
            return false;
        }
        self.cells.push(GridCell::new(x, z));
        self.version += 1;
        true
    }

    /// Remove the cell at `(x, z)`. Returns `false` if there was none.
    pub fn remove_wall(&mut self, x: i32, z: i32) -> bool {
        let Some(idx) = self.cells.iter().position(|c| c.x == x && c.z == z) else {
            tracing::debug!(x, z, "Ignoring remove of missing wall cell");
            return false;
        };
        self.cells.remove(idx);
        self.version += 1;
        true
    }

    /// Replace the whole store. Flags on the input are ignored; the first
    /// occurrence of a duplicated coordinate wins.
    pub fn replace_all(&mut self, cells: &[WallCell]) {
        let mut seen = HashSet::with_capacity(cells.len());
        let before = cells.len();
        self.cells = cells
            .iter()
            .map(WallCell::cell)
            .filter(|c| seen.insert(*c))
            .collect();
        if self.cells.len() != before {
            tracing::warn!(
                dropped = before - self.cells.len(),
                "Collapsed duplicate wall cells"
            );
        }
        self.version += 1;
    }

    /// Remove every cell
    pub fn clear(&mut self) {
        self.cells.clear();
        self.version += 1;
    }

    /// Unflagged snapshot in insertion order, ready for regeneration
    pub fn snapshot(&self) -> Vec<WallCell> {
        self.cells.iter().copied().map(WallCell::from).collect()
    }
}

/// True iff `snapshot` holds a cell at `(x, z)` whose flag for `side` is still clear
pub fn check_adjacency(x: i32, z: i32, side: Side, snapshot: &[WallCell]) -> bool {
    snapshot
        .iter()
        .find(|c| c.at(x, z))
        .is_some_and(|c| !c.side(side))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_contains() {
        let mut t = WallTopology::new();
        assert!(t.add_wall(1, 2));
        assert!(t.contains(1, 2));
        assert!(!t.contains(2, 1));
        assert_eq!(t.len(), 1);
        assert_eq!(t.version(), 1);
    }

    #[test]
    fn test_duplicate_add_rejected() {
        let mut t = WallTopology::new();
        assert!(t.add_wall(0, 0));
        assert!(!t.add_wall(0, 0));
        assert_eq!(t.len(), 1);
        assert_eq!(t.version(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut t = WallTopology::new();
        t.add_wall(0, 0);
        assert!(t.remove_wall(0, 0));
        let v = t.version();
        assert!(!t.remove_wall(0, 0));
        assert!(t.is_empty());
        assert_eq!(t.version(), v);
    }

    #[test]
    fn test_remove_needs_exact_match() {
        let mut t = WallTopology::new();
        t.add_wall(3, 4);
        assert!(!t.remove_wall(4, 3));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_replace_all_first_wins() {
        let mut t = WallTopology::new();
        t.add_wall(9, 9);
        let mut flagged = WallCell::bare(0, 0);
        flagged.east = true;
        t.replace_all(&[flagged, WallCell::bare(1, 0), WallCell::bare(0, 0)]);
        assert_eq!(t.cells(), &[GridCell::new(0, 0), GridCell::new(1, 0)]);
        // Loaded flags never reach the snapshot
        assert_eq!(t.snapshot()[0], WallCell::bare(0, 0));
    }

    #[test]
    fn test_snapshot_keeps_insertion_order() {
        let mut t = WallTopology::new();
        t.add_wall(5, 0);
        t.add_wall(-1, 0);
        t.add_wall(2, 2);
        let xs: Vec<i32> = t.snapshot().iter().map(|c| c.x).collect();
        assert_eq!(xs, vec![5, -1, 2]);
    }

    #[test]
    fn test_check_adjacency() {
        let mut flagged = WallCell::bare(1, 0);
        flagged.west = true;
        let snapshot = vec![WallCell::bare(0, 0), flagged];
        assert!(check_adjacency(0, 0, Side::East, &snapshot));
        assert!(!check_adjacency(1, 0, Side::West, &snapshot));
        assert!(check_adjacency(1, 0, Side::North, &snapshot));
        assert!(!check_adjacency(7, 7, Side::North, &snapshot));
    }
}
