//! Procedural wall generation from a topology snapshot

use shared::{Side, WallCell};

use super::primitives::{WallPrimitive, WallStyle};
use super::BuildError;
use crate::state::topology::check_adjacency;
use crate::viewport::mesh::MeshData;

/// Opaque surface shared by every wall primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallMaterial {
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
}

impl From<&WallStyle> for WallMaterial {
    fn from(style: &WallStyle) -> Self {
        Self {
            color: style.color_f32(),
            roughness: style.roughness,
            metalness: style.metalness,
        }
    }
}

/// Installed wall artifact: one merged geometry, one material
#[derive(Debug, Clone, PartialEq)]
pub struct WallMesh {
    pub geometry: MeshData,
    pub material: WallMaterial,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub name: &'static str,
}

impl WallMesh {
    pub const NAME: &'static str = "walls";

    pub fn new(geometry: MeshData, style: &WallStyle) -> Self {
        Self {
            geometry,
            material: WallMaterial::from(style),
            cast_shadow: true,
            receive_shadow: true,
            name: Self::NAME,
        }
    }

    /// Artifact with zero vertices, installed for an empty topology
    pub fn empty(style: &WallStyle) -> Self {
        Self::new(MeshData::default(), style)
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }
}

/// Output of one generation pass
#[derive(Debug, Clone, PartialEq)]
pub struct WallBuild {
    pub mesh: WallMesh,
    /// Snapshot with refreshed side flags, in input order
    pub cells: Vec<WallCell>,
    pub primitives: Vec<WallPrimitive>,
}

impl WallBuild {
    pub fn column_count(&self) -> usize {
        self.primitives.iter().filter(|p| !p.is_beam()).count()
    }

    pub fn beam_count(&self) -> usize {
        self.primitives.iter().filter(|p| p.is_beam()).count()
    }

    pub fn beams(&self) -> impl Iterator<Item = &WallPrimitive> {
        self.primitives.iter().filter(|p| p.is_beam())
    }
}

/// Build the merged wall mesh for `snapshot`.
///
/// Incoming flags are discarded. Every cell gets a column; every pair of
/// orthogonally adjacent cells gets exactly one beam, emitted by whichever
/// cell of the pair comes first in `snapshot`.
pub fn generate_walls(snapshot: &[WallCell], style: &WallStyle) -> Result<WallBuild, BuildError> {
    if snapshot.is_empty() {
        return Ok(WallBuild {
            mesh: WallMesh::empty(style),
            cells: Vec::new(),
            primitives: Vec::new(),
        });
    }

    let mut working: Vec<WallCell> = snapshot
        .iter()
        .map(|c| WallCell::bare(c.x, c.z))
        .collect();
    let mut primitives = Vec::with_capacity(snapshot.len() * 3);

    for i in 0..working.len() {
        let mut cell = working[i];
        primitives.push(WallPrimitive::column(cell.cell(), style));

        for side in Side::ALL {
            let Some(n) = cell.cell().neighbor(side) else {
                continue;
            };
            if !working.iter().any(|c| c.at(n.x, n.z)) {
                continue;
            }
            cell.set_side(side, true);
            // The neighbor already flagged its side toward us if it was visited first
            if check_adjacency(n.x, n.z, side.opposite(), &working) {
                primitives.push(WallPrimitive::beam(cell.cell(), side, style));
            }
        }

        working[i] = cell;
    }

    let color = style.color_f32();
    let parts: Vec<MeshData> = primitives.iter().map(|p| p.to_mesh(color)).collect();
    let geometry = MeshData::merge(&parts)?;

    Ok(WallBuild {
        mesh: WallMesh::new(geometry, style),
        cells: working,
        primitives,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn cells(coords: &[(i32, i32)]) -> Vec<WallCell> {
        coords.iter().map(|&(x, z)| WallCell::bare(x, z)).collect()
    }

    #[test]
    fn test_empty_snapshot_gives_empty_mesh() {
        let build = generate_walls(&[], &WallStyle::default()).unwrap();
        assert!(build.mesh.is_empty());
        assert!(build.cells.is_empty());
        assert_eq!(build.mesh.geometry.vertex_count(), 0);
    }

    #[test]
    fn test_single_cell_is_one_column() {
        let build = generate_walls(&cells(&[(3, 4)]), &WallStyle::default()).unwrap();
        assert_eq!(build.column_count(), 1);
        assert_eq!(build.beam_count(), 0);
        assert_eq!(build.mesh.geometry.vertex_count(), 24);
        assert_eq!(build.cells[0].connection_count(), 0);
    }

    #[test]
    fn test_pair_emits_one_beam_at_midpoint() {
        let build = generate_walls(&cells(&[(0, 0), (1, 0)]), &WallStyle::default()).unwrap();
        assert_eq!(build.column_count(), 2);
        assert_eq!(build.beam_count(), 1);
        let beam = build.beams().next().unwrap();
        assert_eq!(beam.center, Vec3::new(0.5, 1.0, 0.0));
        assert!(build.cells[0].east);
        assert!(build.cells[1].west);
    }

    #[test]
    fn test_flags_are_symmetric() {
        let build = generate_walls(
            &cells(&[(0, 0), (0, 1), (1, 1), (1, 0), (5, 5)]),
            &WallStyle::default(),
        )
        .unwrap();
        for cell in &build.cells {
            for side in Side::ALL {
                let n = cell.cell().neighbor(side).unwrap();
                let neighbor = build.cells.iter().find(|c| c.at(n.x, n.z));
                match neighbor {
                    Some(other) => {
                        assert!(cell.side(side));
                        assert!(other.side(side.opposite()));
                    }
                    None => assert!(!cell.side(side)),
                }
            }
        }
        // Closed square: four sides, four beams
        assert_eq!(build.beam_count(), 4);
    }

    #[test]
    fn test_stale_flags_are_ignored() {
        let mut stale = WallCell::bare(0, 0);
        stale.north = true;
        stale.east = true;
        let build = generate_walls(&[stale], &WallStyle::default()).unwrap();
        assert_eq!(build.cells[0], WallCell::bare(0, 0));
    }

    #[test]
    fn test_order_does_not_change_beam_count() {
        let a = generate_walls(&cells(&[(0, 0), (1, 0), (2, 0)]), &WallStyle::default()).unwrap();
        let b = generate_walls(&cells(&[(2, 0), (0, 0), (1, 0)]), &WallStyle::default()).unwrap();
        assert_eq!(a.beam_count(), 2);
        assert_eq!(b.beam_count(), 2);
    }

    #[test]
    fn test_material_and_shadows() {
        let build = generate_walls(&cells(&[(0, 0)]), &WallStyle::default()).unwrap();
        assert!(build.mesh.cast_shadow);
        assert!(build.mesh.receive_shadow);
        assert_eq!(build.mesh.material.roughness, 0.8);
        assert_eq!(build.mesh.material.metalness, 0.0);
        assert_eq!(build.mesh.name, "walls");
    }

    #[test]
    fn test_cells_at_grid_edge() {
        let build = generate_walls(
            &cells(&[(i32::MAX, 0), (i32::MIN, 0), (i32::MAX - 1, 0), (0, i32::MIN)]),
            &WallStyle::default(),
        )
        .unwrap();
        assert_eq!(build.column_count(), 4);
        // Only the MAX / MAX-1 pair touches; MAX does not wrap around to MIN
        assert_eq!(build.beam_count(), 1);
        let max = build.cells.iter().find(|c| c.at(i32::MAX, 0)).unwrap();
        assert!(max.west && !max.east);
        let min = build.cells.iter().find(|c| c.at(i32::MIN, 0)).unwrap();
        assert_eq!(min.connection_count(), 0);
    }
}
